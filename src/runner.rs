//! Network runner capability contract
//!
//! A runner performs one autostake attempt against a network and exposes the
//! outcome. Construction and execution are both async and both fallible; the
//! retry controller decides what happens next. Concrete backends (signing,
//! transaction construction, submission) live behind [`RunnerFactory`].

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::config::NetworkConfig;
use crate::error::Result;

/// One per-target transaction outcome from a runner attempt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxResult {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl TxResult {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            error: None,
        }
    }

    pub fn failed(message: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            error: Some(error.into()),
        }
    }
}

/// The bot's identity on one network, resolved from the network's directory
/// of authorized operators before any attempt runs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Operator {
    pub address: String,
    pub moniker: String,
}

/// Outcome of constructing a runner for one network
pub enum Construction {
    /// Runner is ready to attempt the network
    Ready(Box<dyn NetworkRunner>),
    /// Preconditions not met (no matching operator, unsupported chain);
    /// nothing to attempt and nothing to retry
    NoWork(String),
}

/// A stateful capability performing one attempt of the autostake action
#[async_trait]
pub trait NetworkRunner: Send {
    /// Perform the attempt. `restricted` narrows the run to the given target
    /// addresses; `None` means the full default target set.
    async fn run(&mut self, restricted: Option<Vec<String>>) -> Result<()>;

    fn did_succeed(&self) -> bool;

    /// Error raised by the attempt, if any
    fn error(&self) -> Option<String>;

    /// Per-target results in submission order
    fn results(&self) -> &[TxResult];

    /// Target addresses that failed this attempt, in result order.
    /// The next attempt is scoped to exactly these.
    fn failed_addresses(&self) -> Vec<String>;

    /// Non-transient failure; retrying cannot help
    fn force_fail(&self) -> bool;

    /// Pre-formatted lower-level query error lines collected during the attempt
    fn query_errors(&self) -> Vec<String>;
}

/// Produces a fresh runner per attempt
#[async_trait]
pub trait RunnerFactory: Send + Sync {
    async fn construct(&self, network: &NetworkConfig) -> Result<Construction>;
}

/// Factory behind `--dry-run`: resolves an operator identity and succeeds
/// without submitting any transactions. Exercises config, scheduling and
/// health-sink wiring end to end.
pub struct DryRunFactory;

#[async_trait]
impl RunnerFactory for DryRunFactory {
    async fn construct(&self, network: &NetworkConfig) -> Result<Construction> {
        let operator = Operator {
            address: format!("{}-operator", network.name),
            moniker: network.display_name().to_string(),
        };
        Ok(Construction::Ready(Box::new(DryRunRunner {
            operator,
            ran: false,
        })))
    }
}

struct DryRunRunner {
    operator: Operator,
    ran: bool,
}

#[async_trait]
impl NetworkRunner for DryRunRunner {
    async fn run(&mut self, _restricted: Option<Vec<String>>) -> Result<()> {
        log::info!("{}: dry run, no transactions submitted", self.operator.moniker);
        self.ran = true;
        Ok(())
    }

    fn did_succeed(&self) -> bool {
        self.ran
    }

    fn error(&self) -> Option<String> {
        None
    }

    fn results(&self) -> &[TxResult] {
        &[]
    }

    fn failed_addresses(&self) -> Vec<String> {
        Vec::new()
    }

    fn force_fail(&self) -> bool {
        false
    }

    fn query_errors(&self) -> Vec<String> {
        Vec::new()
    }
}
