use std::env;
use std::time::Duration;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_secs(2);

/// Classic connector hosts plus Power Automate workflow endpoints.
pub const DEFAULT_URL_PATTERNS: &[&str] = &[
    r"^https://outlook\.office(?:365)?\.com/",
    r"^https://[a-zA-Z0-9-]+\.webhook\.office\.com/",
    r"^https://[^/]+\.logic\.azure\.com(?::443)?/workflows/",
    r"^https://[^/]+\.environment\.api\.powerplatform\.com(?::443)?/",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebhookConfig {
    /// Per request timeout.
    pub timeout: Duration,
    /// Extra attempts after the first one.
    pub retries: u32,
    pub retry_delay: Duration,
    pub user_agent: String,
    pub validate_url: bool,
    pub url_patterns: Vec<String>,
}

impl Default for WebhookConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            retries: 0,
            retry_delay: DEFAULT_RETRY_DELAY,
            user_agent: default_user_agent(),
            validate_url: true,
            url_patterns: DEFAULT_URL_PATTERNS.iter().map(|p| p.to_string()).collect(),
        }
    }
}

pub fn default_user_agent() -> String {
    format!("tnotify/{}", env!("CARGO_PKG_VERSION"))
}

impl WebhookConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Reads the `TNOTIFY_*` variables through `lookup`; unparsable values
    /// keep their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut cfg = Self::default();
        if let Some(secs) = parse_u64(lookup("TNOTIFY_TIMEOUT_SECS")) {
            cfg.timeout = Duration::from_secs(secs);
        }
        if let Some(retries) = lookup("TNOTIFY_RETRIES").and_then(|v| v.trim().parse().ok()) {
            cfg.retries = retries;
        }
        if let Some(secs) = parse_u64(lookup("TNOTIFY_RETRY_DELAY_SECS")) {
            cfg.retry_delay = Duration::from_secs(secs);
        }
        if let Some(agent) = lookup("TNOTIFY_USER_AGENT").filter(|v| !v.trim().is_empty()) {
            cfg.user_agent = agent;
        }
        if let Some(skip) = lookup("TNOTIFY_SKIP_URL_VALIDATION") {
            cfg.validate_url = !matches!(
                skip.to_lowercase().as_str(),
                "1" | "true" | "yes" | "on"
            );
        }
        if let Some(patterns) = lookup("TNOTIFY_URL_PATTERNS") {
            cfg.url_patterns.extend(
                patterns
                    .split(',')
                    .map(str::trim)
                    .filter(|p| !p.is_empty())
                    .map(str::to_string),
            );
        }
        cfg
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_retries(mut self, retries: u32) -> Self {
        self.retries = retries;
        self
    }

    pub fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay = delay;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn with_url_validation(mut self, enabled: bool) -> Self {
        self.validate_url = enabled;
        self
    }

    pub fn with_url_patterns<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.url_patterns.extend(patterns.into_iter().map(Into::into));
        self
    }

    /// Upper bound on a whole delivery: every attempt times out and every
    /// pause between attempts is taken.
    pub fn total_budget(&self) -> Duration {
        self.timeout
            .saturating_mul(self.retries.saturating_add(1))
            .saturating_add(self.retry_delay.saturating_mul(self.retries))
    }
}

fn parse_u64(value: Option<String>) -> Option<u64> {
    value.and_then(|v| v.trim().parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults() {
        let cfg = WebhookConfig::default();
        assert_eq!(cfg.timeout, Duration::from_secs(5));
        assert_eq!(cfg.retries, 0);
        assert_eq!(cfg.retry_delay, Duration::from_secs(2));
        assert!(cfg.user_agent.starts_with("tnotify/"));
        assert!(cfg.validate_url);
        assert_eq!(cfg.url_patterns.len(), DEFAULT_URL_PATTERNS.len());
    }

    #[test]
    fn reads_environment() {
        let cfg = WebhookConfig::from_lookup(lookup(&[
            ("TNOTIFY_TIMEOUT_SECS", "10"),
            ("TNOTIFY_RETRIES", "3"),
            ("TNOTIFY_RETRY_DELAY_SECS", " 1 "),
            ("TNOTIFY_USER_AGENT", "ci-bot/1.0"),
            ("TNOTIFY_SKIP_URL_VALIDATION", "true"),
            ("TNOTIFY_URL_PATTERNS", r"^https://hooks\.example\.com/, ,^http://localhost"),
        ]));
        assert_eq!(cfg.timeout, Duration::from_secs(10));
        assert_eq!(cfg.retries, 3);
        assert_eq!(cfg.retry_delay, Duration::from_secs(1));
        assert_eq!(cfg.user_agent, "ci-bot/1.0");
        assert!(!cfg.validate_url);
        assert_eq!(cfg.url_patterns.len(), DEFAULT_URL_PATTERNS.len() + 2);
    }

    #[test]
    fn bad_values_keep_defaults() {
        let cfg = WebhookConfig::from_lookup(lookup(&[
            ("TNOTIFY_TIMEOUT_SECS", "soon"),
            ("TNOTIFY_RETRIES", "-1"),
            ("TNOTIFY_SKIP_URL_VALIDATION", "nope"),
        ]));
        assert_eq!(cfg, WebhookConfig::default());
    }

    #[test]
    fn total_budget_covers_all_attempts() {
        let cfg = WebhookConfig::default()
            .with_timeout(Duration::from_secs(5))
            .with_retries(2)
            .with_retry_delay(Duration::from_secs(2));
        assert_eq!(cfg.total_budget(), Duration::from_secs(19));
        assert_eq!(WebhookConfig::default().total_budget(), DEFAULT_TIMEOUT);
    }

    #[test]
    fn total_budget_saturates() {
        let cfg = WebhookConfig::default()
            .with_timeout(Duration::from_secs(u64::MAX))
            .with_retries(u32::MAX)
            .with_retry_delay(Duration::MAX);
        assert_eq!(cfg.total_budget(), Duration::MAX);
    }
}
