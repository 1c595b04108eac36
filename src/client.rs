//! Dependency-Track API client.
//!
//! Owns the HTTP connection pool, the credential, and the cache of the
//! connected server's version. Builds requests, executes them, and turns
//! the outcome into typed results or a [`DtrackError`]. Resource operations
//! are implemented via traits on the model types.

use std::env;
use std::sync::Arc;
use std::time::Duration;

use reqwest::header::HeaderValue;
use reqwest::{Method, Response};
use serde::de::DeserializeOwned;
use url::Url;

use crate::error::{DtrackError, Result};
use crate::models::About;
use crate::pagination::{Page, TOTAL_COUNT_SUPPORT};
use crate::request::{Request, RequestOption};
use crate::response::{self, ResponseMeta};
use crate::version::{ServerVersion, VersionRegistry};

const USER_AGENT: &str = concat!("dtrack/", env!("CARGO_PKG_VERSION"));
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(300);
const API_KEY_HEADER: &str = "x-api-key";

/// How requests authenticate against the server.
#[derive(Clone)]
pub enum Credential {
    /// A Dependency-Track API key, sent as `X-Api-Key`.
    ApiKey(String),
    /// A bearer token, sent as `Authorization: Bearer`.
    Bearer(String),
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Credential::ApiKey(_) => f.write_str("ApiKey(..)"),
            Credential::Bearer(_) => f.write_str("Bearer(..)"),
        }
    }
}

/// Low-level Dependency-Track API client.
///
/// This struct is cheaply cloneable; clones share the same connection pool
/// and the same resolved server version. Two clients built separately never
/// share a version cache, so pointing a fresh client at an upgraded server
/// picks up the new version.
///
/// # Example
///
/// ```no_run
/// use dtrack::DtrackClient;
///
/// # async fn example() -> dtrack::Result<()> {
/// // Create from environment variables
/// let client = DtrackClient::from_env()?;
///
/// // Or configure manually
/// let client = DtrackClient::new("https://dtrack.example.com", "odt_secret")?;
/// println!("connected to {}", client.server_version().await?);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct DtrackClient {
    http: reqwest::Client,
    base_url: Arc<Url>,
    credential: Option<Credential>,
    versions: Arc<VersionRegistry>,
}

impl std::fmt::Debug for DtrackClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DtrackClient")
            .field("base_url", &self.base_url.as_str())
            .field("server_version", &self.versions.cached())
            .finish_non_exhaustive()
    }
}

impl DtrackClient {
    /// Create a client from environment variables.
    ///
    /// Uses `DTRACK_URL` for the server and either `DTRACK_API_KEY` or
    /// `DTRACK_BEARER_TOKEN` for authentication.
    ///
    /// # Errors
    ///
    /// Returns an error if `DTRACK_URL` or both credentials are unset.
    pub fn from_env() -> Result<Self> {
        let base_url = env::var("DTRACK_URL").map_err(|_| {
            DtrackError::ConfigMissing("DTRACK_URL environment variable not set".to_string())
        })?;

        let credential = match (env::var("DTRACK_API_KEY"), env::var("DTRACK_BEARER_TOKEN")) {
            (Ok(key), _) => Credential::ApiKey(key),
            (Err(_), Ok(token)) => Credential::Bearer(token),
            (Err(_), Err(_)) => {
                return Err(DtrackError::ConfigMissing(
                    "DTRACK_API_KEY or DTRACK_BEARER_TOKEN environment variable not set"
                        .to_string(),
                ))
            }
        };

        Self::builder(&base_url).credential(credential).build()
    }

    /// Create a client for `base_url` authenticating with an API key.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid.
    pub fn new(base_url: &str, api_key: &str) -> Result<Self> {
        Self::builder(base_url).api_key(api_key).build()
    }

    /// Start configuring a client for `base_url`.
    pub fn builder(base_url: &str) -> ClientBuilder {
        ClientBuilder {
            base_url: base_url.to_string(),
            credential: None,
            timeout: DEFAULT_TIMEOUT,
            server_version: None,
        }
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Build a request for an API path, applying `options` in order.
    pub fn request(
        &self,
        method: Method,
        path: &str,
        options: &[&dyn RequestOption],
    ) -> Result<Request> {
        Request::build(&self.base_url, method, path, options)
    }

    // -------------------------------------------------------------------------
    // Version gating
    // -------------------------------------------------------------------------

    /// The connected server's version, fetched on first use.
    ///
    /// Concurrent first calls share a single `GET /api/version`.
    ///
    /// # Errors
    ///
    /// Fetch failures surface as they happened (transport, HTTP, or decode);
    /// they are not reported as [`DtrackError::Version`] and are not cached.
    pub async fn server_version(&self) -> Result<ServerVersion> {
        self.versions.resolve(|| self.fetch_server_version()).await
    }

    /// Fail with [`DtrackError::Version`] unless the server is at least `required`.
    pub async fn assert_version_at_least(&self, required: ServerVersion) -> Result<()> {
        self.versions
            .assert_at_least(required, || self.fetch_server_version())
            .await
    }

    /// Whether the server is at least `required`.
    pub async fn is_version_at_least(&self, required: ServerVersion) -> Result<bool> {
        self.versions
            .is_at_least(required, || self.fetch_server_version())
            .await
    }

    async fn fetch_server_version(&self) -> Result<ServerVersion> {
        let about = About::get(self).await?;
        let version = about.server_version()?;
        tracing::debug!(%version, "resolved server version");
        Ok(version)
    }

    // -------------------------------------------------------------------------
    // Execution
    // -------------------------------------------------------------------------

    /// Execute a request and decode the JSON body into `T`.
    pub async fn execute<T: DeserializeOwned>(&self, request: Request) -> Result<(T, ResponseMeta)> {
        let response = self.send(request).await?;
        let meta = ResponseMeta::from_parts(response.status(), response.headers());
        let body = response.bytes().await?;
        Ok((response::decode(&body)?, meta))
    }

    /// Execute a request whose body is not wanted.
    ///
    /// The status is still classified; the body is never decoded.
    pub async fn execute_discard(&self, request: Request) -> Result<ResponseMeta> {
        let response = self.send(request).await?;
        Ok(ResponseMeta::from_parts(response.status(), response.headers()))
    }

    /// Execute a request and return the body as text.
    pub async fn execute_text(&self, request: Request) -> Result<(String, ResponseMeta)> {
        let response = self.send(request).await?;
        let meta = ResponseMeta::from_parts(response.status(), response.headers());
        let body = response.text().await?;
        Ok((body, meta))
    }

    /// Execute a list request and wrap the result in a [`Page`].
    ///
    /// Servers older than 4.0.0 do not report a total, so the page's total
    /// is its own length there. Newer servers' totals are taken verbatim,
    /// falling back to the page length when the header is missing.
    pub async fn execute_page<T: DeserializeOwned>(&self, request: Request) -> Result<Page<T>> {
        let (items, meta): (Vec<T>, _) = self.execute(request).await?;

        if !self.is_version_at_least(TOTAL_COUNT_SUPPORT).await? {
            return Ok(Page::complete(items));
        }

        match meta.total_count {
            Some(total) => Ok(Page::new(items, total)),
            None => Ok(Page::complete(items)),
        }
    }

    /// Send a request and classify its status.
    #[tracing::instrument(skip(self, request), fields(method = %request.method(), url = %request.url()))]
    async fn send(&self, request: Request) -> Result<Response> {
        let (method, url, headers, body, timeout) = request.into_parts();

        let mut builder = self.http.request(method, url).headers(headers);
        builder = match &self.credential {
            Some(Credential::ApiKey(key)) => builder.header(API_KEY_HEADER, key.as_str()),
            Some(Credential::Bearer(token)) => builder.bearer_auth(token),
            None => builder,
        };
        if let Some(body) = body {
            builder = builder.body(body);
        }
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        tracing::debug!("sending request");
        let response = builder.send().await?;

        Self::check_response(response).await
    }

    /// Check response status and convert errors.
    async fn check_response(response: Response) -> Result<Response> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        // A body that cannot be read still yields the status error.
        let body = response.bytes().await.unwrap_or_default();
        Err(response::classify(status, &body))
    }
}

/// Configuration for a [`DtrackClient`].
#[derive(Debug)]
pub struct ClientBuilder {
    base_url: String,
    credential: Option<Credential>,
    timeout: Duration,
    server_version: Option<ServerVersion>,
}

impl ClientBuilder {
    /// Authenticate with a Dependency-Track API key.
    pub fn api_key(self, key: &str) -> Self {
        self.credential(Credential::ApiKey(key.to_string()))
    }

    /// Authenticate with a bearer token.
    pub fn bearer_token(self, token: &str) -> Self {
        self.credential(Credential::Bearer(token.to_string()))
    }

    /// Set the credential.
    pub fn credential(mut self, credential: Credential) -> Self {
        self.credential = Some(credential);
        self
    }

    /// Default deadline for every request (300 seconds unless set).
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Use a known server version instead of fetching it.
    pub fn server_version(mut self, version: ServerVersion) -> Self {
        self.server_version = Some(version);
        self
    }

    /// Build the client.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL or credential is invalid.
    pub fn build(self) -> Result<DtrackClient> {
        // Ensure base URL ends with /
        let base_url_str = if self.base_url.ends_with('/') {
            self.base_url
        } else {
            format!("{}/", self.base_url)
        };

        let base_url = Url::parse(&base_url_str)?;

        if let Some(Credential::ApiKey(key) | Credential::Bearer(key)) = &self.credential {
            HeaderValue::from_str(key).map_err(|_| {
                DtrackError::ConfigMissing("credential contains invalid characters".to_string())
            })?;
        }

        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .brotli(true)
            .gzip(true)
            .deflate(true)
            .timeout(self.timeout)
            .build()?;

        let versions = match self.server_version {
            Some(version) => VersionRegistry::resolved(version),
            None => VersionRegistry::new(),
        };

        Ok(DtrackClient {
            http,
            base_url: Arc::new(base_url),
            credential: self.credential,
            versions: Arc::new(versions),
        })
    }
}
