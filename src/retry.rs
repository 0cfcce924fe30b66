//! Bounded retry driver with attempt-scoped target narrowing
//!
//! Each attempt constructs a fresh runner and executes it against either the
//! full target set or only the targets that failed the previous attempt. The
//! sequence ends on success, on a force-fail, when the retry budget is spent,
//! or immediately when construction reports there is no eligible work.
//!
//! The retry sequence is an explicit loop over a growing attempt list, so the
//! terminal conditions are visible as loop-exit branches and the attempt
//! count is bounded by `max_retries + 1`.

use std::time::Duration;

use async_trait::async_trait;

use crate::config::NetworkConfig;
use crate::health::HealthReporter;
use crate::runner::{Construction, NetworkRunner, RunnerFactory};
use crate::summary;

/// Injectable delay so tests run without real sleeping
#[async_trait]
pub trait Delay: Send + Sync {
    async fn sleep(&self, duration: Duration);
}

/// Production delay backed by the tokio timer
pub struct TokioDelay;

#[async_trait]
impl Delay for TokioDelay {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// One attempt's record. The runner is absent when construction failed
/// before producing one; the error captures whatever construction or
/// execution raised.
pub struct Attempt {
    pub runner: Option<Box<dyn NetworkRunner>>,
    pub error: Option<String>,
}

impl Attempt {
    pub fn succeeded(&self) -> bool {
        self.runner.as_ref().is_some_and(|r| r.did_succeed())
    }

    /// An absent runner never force-fails; retry continues while budget remains
    pub fn force_fail(&self) -> bool {
        self.runner.as_ref().is_some_and(|r| r.force_fail())
    }

    pub fn failed_addresses(&self) -> Vec<String> {
        self.runner
            .as_ref()
            .map(|r| r.failed_addresses())
            .unwrap_or_default()
    }
}

/// Terminal outcome of one network's retry sequence
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RetryOutcome {
    Succeeded,
    /// Preconditions not met; nothing was attempted and no budget consumed
    Skipped(String),
    Failed,
}

/// Chronological attempt history plus its terminal outcome
pub struct RetrySequence {
    pub outcome: RetryOutcome,
    pub attempts: Vec<Attempt>,
}

/// Drives the retry sequence for one network
pub struct RetryController<'a> {
    factory: &'a dyn RunnerFactory,
    delay: &'a dyn Delay,
    retry_delay: Duration,
}

impl<'a> RetryController<'a> {
    pub fn new(factory: &'a dyn RunnerFactory, delay: &'a dyn Delay, retry_delay: Duration) -> Self {
        Self {
            factory,
            delay,
            retry_delay,
        }
    }

    /// Run attempts until success, force-fail, exhausted budget, or a no-work
    /// short-circuit. Logs each attempt's summary to `health` as the attempt
    /// terminates: result lines, then error line, then retry message.
    pub async fn execute(
        &self,
        network: &NetworkConfig,
        max_retries: u32,
        health: &mut dyn HealthReporter,
    ) -> RetrySequence {
        let mut attempts: Vec<Attempt> = Vec::new();
        let mut retries: u32 = 0;

        loop {
            // Narrow to the previous attempt's failures; empty means full set
            let restricted = attempts
                .last()
                .map(|attempt| attempt.failed_addresses())
                .filter(|addresses| !addresses.is_empty());

            let attempt = match self.factory.construct(network).await {
                Ok(Construction::NoWork(reason)) => {
                    log::info!("{}: nothing to do: {}", network.name, reason);
                    return RetrySequence {
                        outcome: RetryOutcome::Skipped(reason),
                        attempts,
                    };
                }
                Ok(Construction::Ready(mut runner)) => {
                    let error = match runner.run(restricted).await {
                        Ok(()) => runner.error(),
                        Err(e) => Some(e.to_string()),
                    };
                    Attempt {
                        runner: Some(runner),
                        error,
                    }
                }
                Err(e) => Attempt {
                    runner: None,
                    error: Some(e.to_string()),
                },
            };

            if attempt.succeeded() {
                log::info!("{}: attempt {} succeeded", network.name, retries + 1);
                Self::log_attempt(health, &attempt, None);
                attempts.push(attempt);
                return RetrySequence {
                    outcome: RetryOutcome::Succeeded,
                    attempts,
                };
            }

            if attempt.force_fail() || retries >= max_retries {
                log::warn!("{}: failed after {} attempt(s)", network.name, retries + 1);
                Self::log_attempt(health, &attempt, None);
                attempts.push(attempt);
                return RetrySequence {
                    outcome: RetryOutcome::Failed,
                    attempts,
                };
            }

            Self::log_attempt(
                health,
                &attempt,
                Some(format!(
                    "Failed attempt {}/{}, retrying in {} seconds...",
                    retries + 1,
                    max_retries + 1,
                    self.retry_delay.as_secs()
                )),
            );
            attempts.push(attempt);

            self.delay.sleep(self.retry_delay).await;
            retries += 1;
        }
    }

    fn log_attempt(health: &mut dyn HealthReporter, attempt: &Attempt, message: Option<String>) {
        if let Some(runner) = &attempt.runner {
            let (summary, lines) = summary::summarize(runner.results());
            health.log(&summary.headline());
            for line in &lines {
                health.log(line);
            }
            health.add_logs(&runner.query_errors());
        }
        if let Some(error) = &attempt.error {
            health.log(&format!("Failed with error: {error}"));
        }
        if let Some(message) = message {
            health.log(&message);
        }
    }
}
