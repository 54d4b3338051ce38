//! BDD test world for the homework watcher

use std::collections::HashMap;
use std::sync::Arc;

use cucumber::World;
use homework_watch::engine::{CycleOutcome, Engine};
use homework_watch::error::{ConfigError, ResponseError, StatusError};
use homework_watch::notifier::Notifier;
use homework_watch::state::PollState;
use homework_watch::Credentials;
use serde_json::Value;

use crate::steps::cycle_steps::ScriptedHttpClient;

#[derive(Debug, Default, World)]
pub struct WatchWorld {
    // Startup
    pub env: HashMap<String, String>,
    pub credentials: Option<Result<Credentials, ConfigError>>,

    // Validation and interpretation
    pub payload: Option<Value>,
    pub validation: Option<Result<(usize, i64), ResponseError>>,
    pub interpretation: Option<Result<String, StatusError>>,

    // Poll cycles
    pub http: Option<Arc<ScriptedHttpClient>>,
    pub engine: Option<Arc<Engine>>,
    pub state: Option<PollState>,
    pub outcomes: Vec<CycleOutcome>,
    pub report_failures: bool,

    // Telegram delivery
    pub notifier: Option<Box<dyn Notifier>>,
    pub notification_result: Option<homework_watch::Result<()>>,
}
