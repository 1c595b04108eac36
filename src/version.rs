//! Server version resolution and gating.
//!
//! Dependency-Track grew its API over many releases, so every operation
//! declares the oldest server version that supports it. The connected
//! server's version is fetched lazily, once per client, and then held for
//! the client's lifetime.

use std::fmt;
use std::future::Future;
use std::str::FromStr;

use tokio::sync::OnceCell;

use crate::error::{DtrackError, Result};

/// A `major.minor.patch` server version.
///
/// Ordering is numeric and field by field. Pre-release and build suffixes
/// (`4.11.0-SNAPSHOT`, `4.9.0+build.7`) are dropped while parsing, so a
/// pre-release server compares equal to its final release.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ServerVersion {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
}

impl ServerVersion {
    /// Create a version from its three components.
    pub const fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }
}

impl fmt::Display for ServerVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

impl FromStr for ServerVersion {
    type Err = DtrackError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || DtrackError::InvalidRequest(format!("invalid server version '{s}'"));

        let core = s
            .trim()
            .trim_start_matches('v')
            .split(['-', '+'])
            .next()
            .unwrap_or_default();

        let mut parts = core.split('.');
        let mut next = |required: bool| -> Result<u64> {
            match parts.next() {
                Some(p) => p.parse().map_err(|_| invalid()),
                None if required => Err(invalid()),
                None => Ok(0),
            }
        };

        let version = ServerVersion::new(next(true)?, next(false)?, next(false)?);
        if parts.next().is_some() {
            return Err(invalid());
        }
        Ok(version)
    }
}

/// Client-scoped cache of the connected server's version.
///
/// The first caller of [`VersionRegistry::resolve`] runs the fetch; callers
/// arriving while it is in flight wait for it and then share its result. A
/// failed fetch leaves the registry unresolved so the next call tries again.
#[derive(Debug, Default)]
pub struct VersionRegistry {
    cell: OnceCell<ServerVersion>,
}

impl VersionRegistry {
    /// Create an unresolved registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry that already knows the server version.
    pub fn resolved(version: ServerVersion) -> Self {
        Self {
            cell: OnceCell::new_with(Some(version)),
        }
    }

    /// The version, if it has already been resolved.
    pub fn cached(&self) -> Option<ServerVersion> {
        self.cell.get().copied()
    }

    /// Return the cached version, running `fetch` if nothing is cached yet.
    pub async fn resolve<F, Fut>(&self, fetch: F) -> Result<ServerVersion>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<ServerVersion>>,
    {
        self.cell.get_or_try_init(fetch).await.copied()
    }

    /// Fail with [`DtrackError::Version`] unless the server is at least `required`.
    pub async fn assert_at_least<F, Fut>(&self, required: ServerVersion, fetch: F) -> Result<()>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<ServerVersion>>,
    {
        let actual = self.resolve(fetch).await?;
        if actual < required {
            return Err(DtrackError::Version { required, actual });
        }
        Ok(())
    }

    /// Whether the server is at least `required`.
    ///
    /// Only a failed resolution is reported as an error.
    pub async fn is_at_least<F, Fut>(&self, required: ServerVersion, fetch: F) -> Result<bool>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<ServerVersion>>,
    {
        Ok(self.resolve(fetch).await? >= required)
    }
}
