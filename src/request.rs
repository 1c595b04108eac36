//! Outgoing request construction.
//!
//! A [`Request`] is built once per call: the API root joined with an
//! endpoint path, then every [`RequestOption`] applied in the order the
//! caller listed them. Options own a single concern each (a page, a sort,
//! a filter, a body) and may overwrite query keys set by earlier options.

use std::collections::BTreeMap;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::Method;
use serde::Serialize;
use url::Url;

use crate::error::{DtrackError, Result};

/// A mutator applied to a [`Request`] before it is sent.
///
/// Implementations touch nothing but the request they are given. Returning
/// an error aborts construction and nothing goes over the wire.
pub trait RequestOption {
    /// Apply this option to the request.
    fn apply(&self, request: &mut Request) -> Result<()>;
}

impl<F> RequestOption for F
where
    F: Fn(&mut Request) -> Result<()>,
{
    fn apply(&self, request: &mut Request) -> Result<()> {
        self(request)
    }
}

/// An outgoing API request.
#[derive(Debug, Clone)]
pub struct Request {
    method: Method,
    url: Url,
    query: BTreeMap<String, String>,
    headers: HeaderMap,
    body: Option<Vec<u8>>,
    timeout: Option<Duration>,
}

impl Request {
    /// Build a request for `path` under `base` and fold `options` over it.
    ///
    /// `path` is relative (`api/v1/component/...`); a leading slash is
    /// tolerated so the path never escapes a base URL that has its own
    /// path prefix.
    pub fn build(
        base: &Url,
        method: Method,
        path: &str,
        options: &[&dyn RequestOption],
    ) -> Result<Self> {
        let url = base.join(path.trim_start_matches('/'))?;

        let mut request = Self {
            method,
            url,
            query: BTreeMap::new(),
            headers: HeaderMap::new(),
            body: None,
            timeout: None,
        };

        for option in options {
            option.apply(&mut request)?;
        }

        Ok(request)
    }

    /// The HTTP method.
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// The endpoint URL, without query parameters.
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// All query parameters, ordered by key.
    pub fn query(&self) -> &BTreeMap<String, String> {
        &self.query
    }

    /// A single query parameter.
    pub fn query_param(&self, key: &str) -> Option<&str> {
        self.query.get(key).map(String::as_str)
    }

    /// Set a query parameter, replacing any earlier value for `key`.
    pub fn set_query(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.query.insert(key.into(), value.into());
    }

    /// The form-encoded query string (empty when no parameters are set).
    pub fn query_string(&self) -> String {
        url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.query.iter())
            .finish()
    }

    /// The full URL including query parameters.
    pub fn full_url(&self) -> Url {
        let mut url = self.url.clone();
        if !self.query.is_empty() {
            url.query_pairs_mut().extend_pairs(self.query.iter());
        }
        url
    }

    /// Request headers.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Set a header, replacing any earlier value.
    pub fn set_header(&mut self, name: HeaderName, value: &str) -> Result<()> {
        let value = HeaderValue::from_str(value)
            .map_err(|e| DtrackError::InvalidRequest(format!("invalid {name} header: {e}")))?;
        self.headers.insert(name, value);
        Ok(())
    }

    /// The encoded body, if any.
    pub fn body(&self) -> Option<&[u8]> {
        self.body.as_deref()
    }

    /// Set the body and its content type.
    pub fn set_body(&mut self, body: Vec<u8>, content_type: &str) -> Result<()> {
        self.set_header(CONTENT_TYPE, content_type)?;
        self.body = Some(body);
        Ok(())
    }

    /// Per-request deadline, if one was set.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    pub(crate) fn into_parts(
        self,
    ) -> (Method, Url, HeaderMap, Option<Vec<u8>>, Option<Duration>) {
        let url = self.full_url();
        (self.method, url, self.headers, self.body, self.timeout)
    }
}

/// Encode a value as the JSON request body.
pub struct JsonBody<'a, T: ?Sized>(&'a T);

/// Send `value` as the JSON request body.
pub fn with_body<T: Serialize + ?Sized>(value: &T) -> JsonBody<'_, T> {
    JsonBody(value)
}

impl<T: Serialize + ?Sized> RequestOption for JsonBody<'_, T> {
    fn apply(&self, request: &mut Request) -> Result<()> {
        let body = serde_json::to_vec(self.0)
            .map_err(|e| DtrackError::InvalidRequest(format!("failed to encode body: {e}")))?;
        request.set_body(body, "application/json")
    }
}

/// Ask the server for a specific representation.
pub struct Accept<'a>(pub &'a str);

impl RequestOption for Accept<'_> {
    fn apply(&self, request: &mut Request) -> Result<()> {
        request.set_header(ACCEPT, self.0)
    }
}

/// Abort the request if it has not completed within the given duration.
pub struct Deadline(pub Duration);

impl RequestOption for Deadline {
    fn apply(&self, request: &mut Request) -> Result<()> {
        request.timeout = Some(self.0);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("https://dtrack.example.com/").unwrap()
    }

    #[test]
    fn test_build_joins_path() {
        let req = Request::build(&base(), Method::GET, "api/v1/component/abc", &[]).unwrap();
        assert_eq!(req.url().as_str(), "https://dtrack.example.com/api/v1/component/abc");
        assert_eq!(*req.method(), Method::GET);
        assert!(req.query().is_empty());
        assert!(req.body().is_none());
    }

    #[test]
    fn test_build_keeps_base_prefix() {
        let base = Url::parse("https://example.com/dtrack/").unwrap();
        let req = Request::build(&base, Method::GET, "/api/version", &[]).unwrap();
        assert_eq!(req.url().as_str(), "https://example.com/dtrack/api/version");
    }

    #[test]
    fn test_options_apply_in_order() {
        let first = |r: &mut Request| -> Result<()> {
            r.set_query("sortName", "name");
            Ok(())
        };
        let second = |r: &mut Request| -> Result<()> {
            r.set_query("sortName", "version");
            Ok(())
        };

        let req = Request::build(&base(), Method::GET, "x", &[&first, &second]).unwrap();
        assert_eq!(req.query_param("sortName"), Some("version"));

        let req = Request::build(&base(), Method::GET, "x", &[&second, &first]).unwrap();
        assert_eq!(req.query_param("sortName"), Some("name"));
    }

    #[test]
    fn test_failing_option_aborts_build() {
        let failing =
            |_: &mut Request| -> Result<()> { Err(DtrackError::InvalidRequest("nope".into())) };
        let after = |_: &mut Request| -> Result<()> { panic!("must not run after a failure") };

        let err = Request::build(&base(), Method::GET, "x", &[&failing, &after]).unwrap_err();
        assert!(matches!(err, DtrackError::InvalidRequest(_)));
    }

    #[test]
    fn test_with_body_sets_json_and_content_type() {
        let value = serde_json::json!({"name": "acme", "version": "1.0"});
        let req = Request::build(&base(), Method::PUT, "x", &[&with_body(&value)]).unwrap();

        assert_eq!(
            req.headers().get(CONTENT_TYPE).unwrap(),
            "application/json"
        );
        let decoded: serde_json::Value = serde_json::from_slice(req.body().unwrap()).unwrap();
        assert_eq!(decoded, value);
    }

    #[test]
    fn test_accept_header() {
        let req = Request::build(
            &base(),
            Method::GET,
            "x",
            &[&Accept("application/vnd.cyclonedx+json")],
        )
        .unwrap();
        assert_eq!(
            req.headers().get(ACCEPT).unwrap(),
            "application/vnd.cyclonedx+json"
        );
    }

    #[test]
    fn test_full_url_encodes_query() {
        let mut req = Request::build(&base(), Method::GET, "api/v1/component/identity", &[]).unwrap();
        req.set_query("purl", "pkg:npm/lodash@4.17.21");
        req.set_query("name", "lodash");

        assert_eq!(req.query_string(), "name=lodash&purl=pkg%3Anpm%2Flodash%404.17.21");
        assert_eq!(
            req.full_url().as_str(),
            "https://dtrack.example.com/api/v1/component/identity?name=lodash&purl=pkg%3Anpm%2Flodash%404.17.21"
        );
    }

    #[test]
    fn test_deadline_option() {
        let req = Request::build(
            &base(),
            Method::GET,
            "x",
            &[&Deadline(Duration::from_secs(5))],
        )
        .unwrap();
        assert_eq!(req.timeout(), Some(Duration::from_secs(5)));
    }
}
