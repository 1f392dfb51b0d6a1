use std::env;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TelemetryConfig {
    pub service_name: String,
    pub service_version: String,
    pub json_logs: bool,
    /// Filter directives used when `RUST_LOG` is unset or invalid.
    pub default_filter: String,
}

impl TelemetryConfig {
    pub fn new(service_name: &str) -> Self {
        Self {
            service_name: service_name.to_string(),
            service_version: env!("CARGO_PKG_VERSION").to_string(),
            json_logs: true,
            default_filter: "info".into(),
        }
    }

    pub fn from_env(service_name: &str) -> Self {
        Self::from_lookup(service_name, |key| env::var(key).ok())
    }

    /// Same as [`TelemetryConfig::from_env`] with a custom variable source.
    pub fn from_lookup(service_name: &str, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut cfg = Self::new(service_name);
        if let Some(name) = lookup("OTEL_SERVICE_NAME").filter(|v| !v.trim().is_empty()) {
            cfg.service_name = name;
        }
        if let Some(format) = lookup("LOG_FORMAT") {
            cfg.json_logs = !matches!(format.to_lowercase().as_str(), "text" | "pretty" | "plain");
        }
        cfg
    }

    pub fn with_default_filter(mut self, directives: &str) -> Self {
        self.default_filter = directives.to_string();
        self
    }
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
    fn defaults_to_json() {
        let cfg = TelemetryConfig::from_lookup("tnotify", lookup(&[]));
        assert!(cfg.json_logs);
        assert_eq!(cfg.service_name, "tnotify");
        assert_eq!(cfg.default_filter, "info");
    }

    #[test]
    fn plain_formats_disable_json() {
        for format in ["text", "Pretty", "PLAIN"] {
            let cfg = TelemetryConfig::from_lookup("svc", lookup(&[("LOG_FORMAT", format)]));
            assert!(!cfg.json_logs, "{format}");
        }
        let cfg = TelemetryConfig::from_lookup("svc", lookup(&[("LOG_FORMAT", "json")]));
        assert!(cfg.json_logs);
    }

    #[test]
    fn default_filter_can_be_replaced() {
        let cfg = TelemetryConfig::new("svc").with_default_filter("warn,tnotify=debug");
        assert_eq!(cfg.default_filter, "warn,tnotify=debug");
        assert_eq!(cfg.service_name, "svc");
    }

    #[test]
    fn service_name_override() {
        let cfg = TelemetryConfig::from_lookup("svc", lookup(&[("OTEL_SERVICE_NAME", "ci-notify")]));
        assert_eq!(cfg.service_name, "ci-notify");
        let cfg = TelemetryConfig::from_lookup("svc", lookup(&[("OTEL_SERVICE_NAME", " ")]));
        assert_eq!(cfg.service_name, "svc");
    }
}
