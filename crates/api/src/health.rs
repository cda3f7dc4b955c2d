//! Dependency probes for `GET /health`.
//!
//! Each probe reports a plain boolean. Connection failures are logged and
//! turned into `false`; a probe never returns an error.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::net::TcpStream;
use url::Url;

use vibesip_db::DbPool;

/// Upper bound on a single cache connection attempt.
pub const CACHE_CONNECT_TIMEOUT: Duration = Duration::from_secs(2);

/// Port used for `redis://` and `rediss://` URLs without an explicit port.
pub const DEFAULT_CACHE_PORT: u16 = 6379;

/// A reachability probe for one external dependency.
#[async_trait]
pub trait DependencyCheck: Send + Sync {
    /// Short identifier used in logs.
    fn name(&self) -> &'static str;

    async fn is_healthy(&self) -> bool;
}

/// Probes the database with a trivial query.
pub struct DatabaseCheck {
    pool: DbPool,
}

impl DatabaseCheck {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DependencyCheck for DatabaseCheck {
    fn name(&self) -> &'static str {
        "database"
    }

    async fn is_healthy(&self) -> bool {
        match vibesip_db::health_check(&self.pool).await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(error = %e, "Database health probe failed");
                false
            }
        }
    }
}

/// Probes the cache by opening a TCP connection to its host and port.
///
/// An unconfigured cache counts as healthy.
pub struct CacheCheck {
    url: Option<String>,
}

impl CacheCheck {
    pub fn new(url: Option<String>) -> Self {
        Self { url }
    }
}

#[async_trait]
impl DependencyCheck for CacheCheck {
    fn name(&self) -> &'static str {
        "cache"
    }

    async fn is_healthy(&self) -> bool {
        let Some(raw) = self.url.as_deref() else {
            return true;
        };

        let Some((host, port)) = cache_address(raw) else {
            tracing::warn!("Cache URL could not be parsed");
            return false;
        };

        let connect = TcpStream::connect((host.as_str(), port));
        match tokio::time::timeout(CACHE_CONNECT_TIMEOUT, connect).await {
            Ok(Ok(_)) => true,
            Ok(Err(e)) => {
                tracing::warn!(%host, port, error = %e, "Cache health probe failed");
                false
            }
            Err(_) => {
                tracing::warn!(%host, port, "Cache health probe timed out");
                false
            }
        }
    }
}

/// Extract the host and port from a cache connection string.
///
/// Returns `None` when the URL is malformed, has no host, or has no port and
/// a scheme other than `redis`/`rediss`.
pub fn cache_address(raw: &str) -> Option<(String, u16)> {
    let url = Url::parse(raw).ok()?;
    let host = url.host_str()?.to_string();
    let port = url.port().or_else(|| match url.scheme() {
        "redis" | "rediss" => Some(DEFAULT_CACHE_PORT),
        _ => None,
    })?;
    Some((host, port))
}

/// Run every probe and pair each with its name.
pub async fn dependency_statuses(
    checks: &[Arc<dyn DependencyCheck>],
) -> Vec<(&'static str, bool)> {
    let mut statuses = Vec::with_capacity(checks.len());
    for check in checks {
        statuses.push((check.name(), check.is_healthy().await));
    }
    statuses
}

/// `"ok"` when every dependency is healthy, `"degraded"` otherwise.
pub fn overall_status(statuses: &[(&'static str, bool)]) -> &'static str {
    if statuses.iter().all(|(_, healthy)| *healthy) {
        "ok"
    } else {
        "degraded"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn redis_url_defaults_port() {
        assert_eq!(
            cache_address("redis://cache.internal"),
            Some(("cache.internal".to_string(), 6379))
        );
        assert_eq!(
            cache_address("rediss://user:pw@cache.internal:6380/0"),
            Some(("cache.internal".to_string(), 6380))
        );
    }

    #[test]
    fn unparsable_cache_url_has_no_address() {
        assert_eq!(cache_address("not a url"), None);
        assert_eq!(cache_address("memcached://cache.internal"), None);
    }

    #[test]
    fn overall_status_reduces_all() {
        assert_eq!(overall_status(&[]), "ok");
        assert_eq!(overall_status(&[("database", true), ("cache", true)]), "ok");
        assert_eq!(overall_status(&[("database", false), ("cache", true)]), "degraded");
    }

    #[tokio::test]
    async fn unconfigured_cache_is_healthy() {
        assert!(CacheCheck::new(None).is_healthy().await);
    }

    #[tokio::test]
    async fn malformed_cache_url_is_unhealthy() {
        assert!(!CacheCheck::new(Some("::nope::".into())).is_healthy().await);
    }
}
