//! Health reporting
//!
//! The core treats a health reporter as a write-only accumulator: lines are
//! appended in call order throughout a network's retry sequence, a terminal
//! status is set exactly once, and the whole buffer is flushed to the sink in
//! a single delivery. Delivery failure is the sink's concern and never
//! propagates back into scheduling.

use async_trait::async_trait;
use chrono::Utc;

use crate::config::NetworkConfig;

const DEFAULT_ADDRESS: &str = "https://hc-ping.com";

/// Accumulates one network's run report
#[async_trait]
pub trait HealthReporter: Send {
    /// Begin a report; idempotent within one network run
    fn started(&mut self, message: &str);

    /// Append a line to the pending report buffer
    fn log(&mut self, line: &str);

    /// Append pre-formatted lines, preserving their order
    fn add_logs(&mut self, lines: &[String]);

    /// Mark the run successful; exactly one of success/failed per run
    fn success(&mut self, message: &str);

    /// Mark the run failed; exactly one of success/failed per run
    fn failed(&mut self, message: &str);

    /// Flush the buffer plus terminal status to the sink
    async fn send_log(&mut self);
}

/// Produces one reporter per network run
pub trait HealthReporterFactory: Send + Sync {
    fn create(&self, network: &NetworkConfig) -> Box<dyn HealthReporter>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ReportStatus {
    Success,
    Failed,
}

/// Reporter pinging a healthchecks.io style endpoint: `{address}/{uuid}` on
/// success, `{address}/{uuid}/fail` on failure, accumulated log lines as the
/// request body
pub struct HttpHealthReporter {
    client: reqwest::Client,
    network: String,
    address: Option<String>,
    uuid: Option<String>,
    enabled: bool,
    logs: Vec<String>,
    status: Option<ReportStatus>,
    started: bool,
}

impl HttpHealthReporter {
    pub fn new(client: reqwest::Client, network: &NetworkConfig) -> Self {
        Self {
            client,
            network: network.name.clone(),
            address: network.health_check.address.clone(),
            uuid: network.health_check.uuid.clone(),
            enabled: network.health_check.enabled,
            logs: Vec::new(),
            status: None,
            started: false,
        }
    }

    fn ping_url(&self, success: bool) -> Option<String> {
        let uuid = self.uuid.as_ref()?;
        let address = self.address.as_deref().unwrap_or(DEFAULT_ADDRESS);
        let address = address.trim_end_matches('/');
        if success {
            Some(format!("{address}/{uuid}"))
        } else {
            Some(format!("{address}/{uuid}/fail"))
        }
    }
}

#[async_trait]
impl HealthReporter for HttpHealthReporter {
    fn started(&mut self, message: &str) {
        if self.started {
            return;
        }
        self.started = true;
        self.log(message);
    }

    fn log(&mut self, line: &str) {
        log::info!("{}: {}", self.network, line);
        let stamped = format!("{} {}", Utc::now().format("%Y-%m-%d %H:%M:%S"), line);
        self.logs.push(stamped);
    }

    fn add_logs(&mut self, lines: &[String]) {
        self.logs.extend_from_slice(lines);
    }

    fn success(&mut self, message: &str) {
        self.status = Some(ReportStatus::Success);
        self.log(message);
    }

    fn failed(&mut self, message: &str) {
        self.status = Some(ReportStatus::Failed);
        self.log(message);
    }

    async fn send_log(&mut self) {
        let success = matches!(self.status, Some(ReportStatus::Success));
        let body = self.logs.join("\n");
        self.logs.clear();
        self.status = None;
        self.started = false;

        if !self.enabled {
            log::debug!("{}: health check disabled, report not sent", self.network);
            return;
        }

        let Some(url) = self.ping_url(success) else {
            log::debug!("{}: no health check uuid configured, report not sent", self.network);
            return;
        };

        match self.client.post(&url).body(body).send().await {
            Ok(response) if response.status().is_success() => {
                log::debug!("{}: health report delivered", self.network);
            }
            Ok(response) => {
                log::warn!("{}: health ping returned {}", self.network, response.status());
            }
            Err(e) => {
                log::error!("{}: health ping failed: {}", self.network, e);
            }
        }
    }
}

/// Factory for [`HttpHealthReporter`], one shared HTTP client
pub struct HttpHealthFactory {
    client: reqwest::Client,
}

impl HttpHealthFactory {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }
}

impl Default for HttpHealthFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl HealthReporterFactory for HttpHealthFactory {
    fn create(&self, network: &NetworkConfig) -> Box<dyn HealthReporter> {
        Box::new(HttpHealthReporter::new(self.client.clone(), network))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::HealthCheckConfig;

    fn network_with_check(check: HealthCheckConfig) -> NetworkConfig {
        NetworkConfig {
            name: "osmosis".to_string(),
            health_check: check,
            ..Default::default()
        }
    }

    fn reporter(check: HealthCheckConfig) -> HttpHealthReporter {
        HttpHealthReporter::new(reqwest::Client::new(), &network_with_check(check))
    }

    #[test]
    fn test_ping_url_default_address() {
        let reporter = reporter(HealthCheckConfig {
            uuid: Some("abc-123".to_string()),
            ..Default::default()
        });

        assert_eq!(
            reporter.ping_url(true).as_deref(),
            Some("https://hc-ping.com/abc-123")
        );
        assert_eq!(
            reporter.ping_url(false).as_deref(),
            Some("https://hc-ping.com/abc-123/fail")
        );
    }

    #[test]
    fn test_ping_url_custom_address_trims_trailing_slash() {
        let reporter = reporter(HealthCheckConfig {
            address: Some("https://hc.example.com/".to_string()),
            uuid: Some("abc".to_string()),
            ..Default::default()
        });

        assert_eq!(
            reporter.ping_url(true).as_deref(),
            Some("https://hc.example.com/abc")
        );
    }

    #[test]
    fn test_ping_url_requires_uuid() {
        let reporter = reporter(HealthCheckConfig::default());
        assert!(reporter.ping_url(true).is_none());
    }

    #[test]
    fn test_started_is_idempotent() {
        let mut reporter = reporter(HealthCheckConfig::default());
        reporter.started("Autostaking Osmosis...");
        reporter.started("Autostaking Osmosis...");
        assert_eq!(reporter.logs.len(), 1);
    }

    #[test]
    fn test_log_preserves_order() {
        let mut reporter = reporter(HealthCheckConfig::default());
        reporter.log("first");
        reporter.log("second");
        reporter.add_logs(&["third".to_string(), "fourth".to_string()]);

        assert_eq!(reporter.logs.len(), 4);
        assert!(reporter.logs[0].ends_with("first"));
        assert!(reporter.logs[1].ends_with("second"));
        assert_eq!(reporter.logs[2], "third");
        assert_eq!(reporter.logs[3], "fourth");
    }

    #[test]
    fn test_terminal_status() {
        let mut succeeded = reporter(HealthCheckConfig::default());
        assert!(succeeded.status.is_none());
        succeeded.success("done");
        assert_eq!(succeeded.status, Some(ReportStatus::Success));

        let mut failed = reporter(HealthCheckConfig::default());
        failed.failed("broken");
        assert_eq!(failed.status, Some(ReportStatus::Failed));
    }

    #[tokio::test]
    async fn test_send_log_without_uuid_clears_buffer() {
        let mut reporter = reporter(HealthCheckConfig::default());
        reporter.started("go");
        reporter.log("line");
        reporter.success("done");

        // No uuid configured, so nothing is sent; state resets either way.
        reporter.send_log().await;
        assert!(reporter.logs.is_empty());
        assert!(reporter.status.is_none());
        assert!(!reporter.started);
    }
}
