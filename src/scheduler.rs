//! Network scheduler
//!
//! Walks the configured networks strictly one at a time so wallet and RPC
//! resources never overlap across networks, runs each selected network's
//! retry sequence to completion, and flushes one health report per network
//! that reaches a terminal outcome.

use std::sync::Arc;
use std::time::Duration;

use crate::config::{Config, NetworkConfig};
use crate::error::{RestakerError, Result};
use crate::health::HealthReporterFactory;
use crate::retry::{Delay, RetryController, RetryOutcome};
use crate::runner::RunnerFactory;

pub struct NetworkScheduler {
    config: Config,
    runners: Arc<dyn RunnerFactory>,
    health: Arc<dyn HealthReporterFactory>,
    delay: Arc<dyn Delay>,
}

impl NetworkScheduler {
    pub fn new(
        config: Config,
        runners: Arc<dyn RunnerFactory>,
        health: Arc<dyn HealthReporterFactory>,
        delay: Arc<dyn Delay>,
    ) -> Self {
        Self {
            config,
            runners,
            health,
            delay,
        }
    }

    /// Process the selected networks in config order. An empty selection
    /// means all enabled networks. A selection naming an unknown network
    /// aborts before any network is processed.
    pub async fn run(&self, selected: &[String]) -> Result<()> {
        for name in selected {
            if !self.config.networks.iter().any(|n| &n.name == name) {
                return Err(RestakerError::UnknownNetwork(name.clone()));
            }
        }

        for network in &self.config.networks {
            if !selected.is_empty() && !selected.iter().any(|name| name == &network.name) {
                continue;
            }
            if !network.enabled {
                log::info!("{}: disabled, skipping", network.name);
                continue;
            }
            self.run_network(network).await;
        }

        Ok(())
    }

    async fn run_network(&self, network: &NetworkConfig) {
        log::info!("{}: processing", network.name);

        let mut health = self.health.create(network);
        health.started(&format!("Autostaking {}...", network.display_name()));

        let controller = RetryController::new(
            self.runners.as_ref(),
            self.delay.as_ref(),
            Duration::from_secs(self.config.delay_secs),
        );
        let max_retries = network.retries(self.config.retries);
        let sequence = controller.execute(network, max_retries, health.as_mut()).await;

        match sequence.outcome {
            RetryOutcome::Skipped(reason) => {
                // Precondition skip: no terminal mark, nothing flushed
                log::info!("{}: skipped: {}", network.name, reason);
            }
            RetryOutcome::Succeeded => {
                health.log(&format!("{} attempt(s) made", sequence.attempts.len()));
                health.success("Autostaking completed");
                health.send_log().await;
            }
            RetryOutcome::Failed => {
                health.log(&format!("{} attempt(s) made", sequence.attempts.len()));
                health.failed("Autostaking failed");
                health.send_log().await;
            }
        }
    }
}
