//! Transport settings for [`HyperClient`](crate::HyperClient).
//!
//! The request builder has no per-call knobs: every [`Caller`](crate::Caller)
//! inherits these from the client it runs on. The shared client uses
//! [`ClientConfig::default`].

use std::time::Duration;

/// `User-Agent` sent when a request does not set its own.
pub const DEFAULT_USER_AGENT: &str = concat!("jsonreq/", env!("CARGO_PKG_VERSION"));

/// Settings of a [`HyperClient`](crate::HyperClient).
///
/// Start from the defaults and override with the `with_*` methods:
///
/// ```
/// use std::time::Duration;
/// use jsonreq::ClientConfig;
///
/// let config = ClientConfig::default().with_timeout(Duration::from_secs(5));
/// assert_eq!(config.connect_timeout, Duration::from_secs(10));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Limit for one whole round trip: connect, send and read the body.
    pub timeout: Duration,
    /// Limit for establishing the TCP connection.
    pub connect_timeout: Duration,
    /// Idle keep-alive connections kept per host.
    pub max_idle_per_host: usize,
    /// How long an idle connection stays in the pool.
    pub idle_timeout: Duration,
    /// Added as `User-Agent` unless the request carries one; `None` sends none.
    pub user_agent: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            max_idle_per_host: 32,
            idle_timeout: Duration::from_secs(90),
            user_agent: Some(DEFAULT_USER_AGENT.to_string()),
        }
    }
}

impl ClientConfig {
    /// Replace the round-trip timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Replace the connect timeout.
    #[must_use]
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Replace the idle pool size per host; `0` disables keep-alive reuse.
    #[must_use]
    pub fn with_max_idle_per_host(mut self, count: usize) -> Self {
        self.max_idle_per_host = count;
        self
    }

    /// Replace the idle connection lifetime.
    #[must_use]
    pub fn with_idle_timeout(mut self, timeout: Duration) -> Self {
        self.idle_timeout = timeout;
        self
    }

    /// Replace the default `User-Agent`, or drop it with `None`.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: Option<impl Into<String>>) -> Self {
        self.user_agent = user_agent.map(Into::into);
        self
    }
}

#[cfg(test)]
mod tests {
    use assert2::check;

    use super::*;

    #[test]
    fn defaults() {
        let config = ClientConfig::default();
        check!(config.timeout == Duration::from_secs(30));
        check!(config.connect_timeout == Duration::from_secs(10));
        check!(config.max_idle_per_host == 32);
        check!(config.idle_timeout == Duration::from_secs(90));
        check!(config.user_agent.as_deref() == Some(DEFAULT_USER_AGENT));
        check!(DEFAULT_USER_AGENT.starts_with("jsonreq/"));
    }

    #[test]
    fn overrides_leave_other_settings_alone() {
        let config = ClientConfig::default()
            .with_timeout(Duration::from_secs(60))
            .with_user_agent(Some("posts-cli/1.0"));

        check!(config.timeout == Duration::from_secs(60));
        check!(config.user_agent.as_deref() == Some("posts-cli/1.0"));
        check!(config.connect_timeout == Duration::from_secs(10));
        check!(config.max_idle_per_host == 32);
    }

    #[test]
    fn user_agent_can_be_disabled() {
        let config = ClientConfig::default().with_user_agent(None::<String>);
        check!(config.user_agent.is_none());
    }
}
