use std::time::{Duration, Instant as StdInstant};

use bytes::Bytes;
use http::StatusCode;
use http::header::CONTENT_TYPE;
use metrics::{counter, histogram};
use regex::Regex;
use tokio::time::{Instant, sleep_until, timeout_at};
use tracing::{debug, info, warn};
use url::Url;

use crate::config::WebhookConfig;
use crate::error::DeliveryError;
use crate::notification::Notification;

/// Body Teams answers with when a connector accepted the message.
pub const EXPECTED_RESPONSE_TEXT: &str = "1";

const MAX_ERROR_BODY: usize = 512;

/// Stand-in for deadlines too far away for `Instant` to represent.
const FAR_FUTURE: Duration = Duration::from_secs(86_400 * 365 * 30);

pub struct WebhookClient {
    http: reqwest::Client,
    config: WebhookConfig,
    patterns: Vec<Regex>,
}

impl WebhookClient {
    pub fn new(config: WebhookConfig) -> Result<Self, DeliveryError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(DeliveryError::Transport)?;
        Self::with_http_client(http, config)
    }

    /// Uses a caller-built client; its own timeout and user agent win over
    /// the ones in `config`.
    pub fn with_http_client(
        http: reqwest::Client,
        config: WebhookConfig,
    ) -> Result<Self, DeliveryError> {
        let patterns = compile_patterns(&config.url_patterns)?;
        Ok(Self {
            http,
            config,
            patterns,
        })
    }

    pub fn config(&self) -> &WebhookConfig {
        &self.config
    }

    /// Accepts more URL shapes on top of the configured ones.
    pub fn add_url_patterns<I, S>(&mut self, patterns: I) -> Result<(), DeliveryError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let patterns: Vec<String> = patterns.into_iter().map(Into::into).collect();
        let compiled = compile_patterns(&patterns)?;
        self.patterns.extend(compiled);
        self.config.url_patterns.extend(patterns);
        Ok(())
    }

    /// Disables the URL shape check, e.g. for private webhook hosts.
    pub fn skip_url_validation(&mut self, skip: bool) {
        self.config.validate_url = !skip;
    }

    /// Parses `raw` and, unless disabled, checks it against the accepted
    /// patterns.
    pub fn validate_url(&self, raw: &str) -> Result<Url, DeliveryError> {
        let url = Url::parse(raw).map_err(DeliveryError::InvalidUrl)?;
        if !self.config.validate_url {
            debug!(host = url.host_str(), "webhook URL validation skipped");
            return Ok(url);
        }
        if self.patterns.iter().any(|pattern| pattern.is_match(raw)) {
            Ok(url)
        } else {
            Err(DeliveryError::UnexpectedUrl {
                host: url.host_str().map(str::to_string),
            })
        }
    }

    /// Sends with a deadline wide enough for every configured attempt.
    pub async fn send<N>(&self, url: &str, notification: &mut N) -> Result<(), DeliveryError>
    where
        N: Notification + ?Sized,
    {
        let deadline = instant_after(self.config.total_budget());
        self.send_with_deadline(url, notification, deadline).await
    }

    /// Validates, prepares and posts `notification`, retrying transient
    /// failures with a fixed pause until `deadline`.
    pub async fn send_with_deadline<N>(
        &self,
        url: &str,
        notification: &mut N,
        deadline: Instant,
    ) -> Result<(), DeliveryError>
    where
        N: Notification + ?Sized,
    {
        let url = self.validate_url(url).inspect_err(record_error)?;
        let payload = notification.prepare().map_err(DeliveryError::from).inspect_err(record_error)?;

        let attempts = self.config.retries.saturating_add(1);
        let mut last: Option<DeliveryError> = None;
        let mut attempt = 0;
        loop {
            if Instant::now() >= deadline {
                return Err(deadline_exceeded(attempt, last));
            }
            attempt += 1;
            counter!("tnotify_webhook_attempts_total").increment(1);

            let result = match timeout_at(deadline, self.post(&url, payload.clone())).await {
                Ok(result) => result,
                Err(_) => return Err(deadline_exceeded(attempt, last)),
            };

            match result {
                Ok(()) => {
                    info!(
                        host = url.host_str(),
                        attempt,
                        attempts,
                        bytes = payload.len(),
                        "notification delivered"
                    );
                    return Ok(());
                }
                Err(err) => {
                    record_error(&err);
                    if !err.is_retryable() || attempt >= attempts {
                        warn!(attempt, attempts, error = %err, "webhook delivery failed");
                        return Err(err);
                    }
                    warn!(
                        attempt,
                        attempts,
                        delay_ms = self.config.retry_delay.as_millis() as u64,
                        error = %err,
                        "webhook delivery attempt failed; retrying"
                    );
                    last = Some(err);
                }
            }

            let wake = instant_after(self.config.retry_delay);
            sleep_until(wake.min(deadline)).await;
        }
    }

    async fn post(&self, url: &Url, payload: Bytes) -> Result<(), DeliveryError> {
        let started = StdInstant::now();
        let response = self
            .http
            .post(url.clone())
            .header(CONTENT_TYPE, "application/json")
            .body(payload)
            .send()
            .await
            .map_err(DeliveryError::Transport)?;

        let status = response.status();
        histogram!(
            "tnotify_webhook_roundtrip_seconds",
            "status" => status.as_str().to_string()
        )
        .record(started.elapsed().as_secs_f64());

        let body = response.text().await.map_err(DeliveryError::Transport)?;
        map_response(status, body)
    }
}

fn map_response(status: StatusCode, body: String) -> Result<(), DeliveryError> {
    if !status.is_success() {
        return Err(DeliveryError::Status {
            status,
            body: truncate(body),
        });
    }
    let text = body.trim();
    if status == StatusCode::OK && !text.is_empty() && text != EXPECTED_RESPONSE_TEXT {
        return Err(DeliveryError::UnexpectedResponse {
            status,
            body: truncate(body),
        });
    }
    Ok(())
}

fn truncate(mut body: String) -> String {
    if body.len() > MAX_ERROR_BODY {
        let mut cut = MAX_ERROR_BODY;
        while !body.is_char_boundary(cut) {
            cut -= 1;
        }
        body.truncate(cut);
    }
    body
}

fn instant_after(delay: Duration) -> Instant {
    let now = Instant::now();
    now.checked_add(delay).unwrap_or_else(|| now + FAR_FUTURE)
}

fn compile_patterns(patterns: &[String]) -> Result<Vec<Regex>, DeliveryError> {
    patterns
        .iter()
        .map(|pattern| {
            Regex::new(pattern).map_err(|source| DeliveryError::InvalidPattern {
                pattern: pattern.clone(),
                source,
            })
        })
        .collect()
}

fn deadline_exceeded(attempts: u32, last: Option<DeliveryError>) -> DeliveryError {
    let err = DeliveryError::DeadlineExceeded {
        attempts,
        last: last.map(Box::new),
    };
    record_error(&err);
    err
}

fn record_error(err: &DeliveryError) {
    counter!("tnotify_webhook_errors_total", "kind" => err.kind()).increment(1);
}
