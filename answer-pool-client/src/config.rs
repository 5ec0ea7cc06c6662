use std::time::Duration;

pub const ENDPOINT_ENV: &str = "ANSWER_POOL_ENDPOINT";
pub const TIMEOUT_ENV: &str = "ANSWER_POOL_TIMEOUT_SECS";

/// Endpoint value shipped in templates before anyone deploys a server
pub const PLACEHOLDER_ENDPOINT: &str = "YOUR_ENDPOINT_URL_HERE";

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub endpoint: Option<String>,
    pub timeout: Duration,
    /// Serve the built-in answers when the endpoint cannot be reached
    pub mock_fallback: bool,
    pub poll_interval: Duration,
    pub confirmation_ttl: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            timeout: Duration::from_secs(10),
            mock_fallback: true,
            poll_interval: Duration::from_secs(30),
            confirmation_ttl: Duration::from_secs(5),
        }
    }
}

impl ClientConfig {
    /// Defaults overridden by `ANSWER_POOL_ENDPOINT` and
    /// `ANSWER_POOL_TIMEOUT_SECS`
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(endpoint) = std::env::var(ENDPOINT_ENV) {
            config.endpoint = Some(endpoint);
        }
        if let Some(secs) = std::env::var(TIMEOUT_ENV)
            .ok()
            .and_then(|value| value.trim().parse::<u64>().ok())
        {
            config.timeout = Duration::from_secs(secs);
        }

        config
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_mock_fallback(mut self, enabled: bool) -> Self {
        self.mock_fallback = enabled;
        self
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// The endpoint to call, or `None` when it is missing, blank, or still
    /// the placeholder
    pub fn configured_endpoint(&self) -> Option<&str> {
        self.endpoint
            .as_deref()
            .map(str::trim)
            .filter(|endpoint| !endpoint.is_empty() && *endpoint != PLACEHOLDER_ENDPOINT)
    }
}
