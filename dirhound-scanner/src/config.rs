use std::time::Duration;

/// Default browser identities rotated per request.
const DEFAULT_USER_AGENTS: &[&str] = &[
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.4 Safari/605.1.15",
    "Mozilla/5.0 (X11; Linux x86_64; rv:125.0) Gecko/20100101 Firefox/125.0",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:125.0) Gecko/20100101 Firefox/125.0",
    "Mozilla/5.0 (X11; Ubuntu; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/123.0.0.0 Safari/537.36",
];

/// Settings for a scan run. Fixed at startup; cloned into each worker.
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Number of concurrent workers in the pool.
    pub workers: usize,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Extra attempts after a failed request before giving up on a path.
    pub max_retries: usize,
    /// Pause between retry attempts.
    pub retry_pause: Duration,
    /// Randomized post-response delay range in milliseconds (min, max).
    /// A zero max disables throttling.
    pub throttle_ms: (u64, u64),
    /// Status codes treated as "not present" and excluded from findings.
    pub excluded_statuses: Vec<u16>,
    /// Identity strings, one chosen at random per request.
    pub user_agents: Vec<String>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            workers: 20,
            timeout: Duration::from_secs(5),
            max_retries: 3,
            retry_pause: Duration::from_millis(500),
            throttle_ms: (25, 150),
            excluded_statuses: vec![400, 404],
            user_agents: DEFAULT_USER_AGENTS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl ScanConfig {
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_max_retries(mut self, max_retries: usize) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn with_retry_pause(mut self, retry_pause: Duration) -> Self {
        self.retry_pause = retry_pause;
        self
    }

    pub fn with_throttle_ms(mut self, min: u64, max: u64) -> Self {
        self.throttle_ms = (min.min(max), max);
        self
    }

    pub fn with_excluded_statuses(mut self, statuses: Vec<u16>) -> Self {
        self.excluded_statuses = statuses;
        self
    }

    pub fn with_user_agents(mut self, user_agents: Vec<String>) -> Self {
        if !user_agents.is_empty() {
            self.user_agents = user_agents;
        }
        self
    }

    pub fn is_excluded(&self, status: u16) -> bool {
        self.excluded_statuses.contains(&status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_excludes_negative_signals() {
        let config = ScanConfig::default();
        assert!(config.is_excluded(404));
        assert!(config.is_excluded(400));
        assert!(!config.is_excluded(200));
        assert!(!config.is_excluded(403));
        assert!(!config.is_excluded(301));
    }

    #[test]
    fn default_has_user_agent_pool() {
        let config = ScanConfig::default();
        assert!(config.user_agents.len() >= 2);
    }

    #[test]
    fn worker_count_never_zero() {
        let config = ScanConfig::default().with_workers(0);
        assert_eq!(config.workers, 1);
    }

    #[test]
    fn throttle_range_stays_ordered() {
        let config = ScanConfig::default().with_throttle_ms(200, 100);
        assert!(config.throttle_ms.0 <= config.throttle_ms.1);
    }

    #[test]
    fn empty_user_agent_pool_is_ignored() {
        let config = ScanConfig::default().with_user_agents(Vec::new());
        assert!(!config.user_agents.is_empty());
    }
}
