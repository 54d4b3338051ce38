//! Engine: the poll loop tying the status source, validation and the notifier together

use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use tokio_util::sync::CancellationToken;

use crate::config::Config;
use crate::fetcher::StatusSource;
use crate::notifier::{deliver, Delivery, Notifier};
use crate::response::check_response;
use crate::state::{PollState, CONSECUTIVE_FAILURE_WARNING};
use crate::status::{parse_status, Homework};
use crate::WatchError;

/// Prefix of failure reports sent to the chat
pub const FAILURE_REPORT_PREFIX: &str = "Сбой в работе программы";

/// What a single poll cycle ended up doing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleOutcome {
    /// The API reported no homework changes since the watermark
    NoUpdates,
    /// The newest homework matches what was last delivered
    Unchanged(Homework),
    /// A status change was delivered to the chat
    Notified(Homework),
    /// A status change was detected but the message was not delivered
    DeliveryFailed(Homework),
    /// Fetch, validation or interpretation failed; no notification was attempted
    Failed(String),
}

/// The engine runs poll cycles until its cancellation token fires
#[derive(Debug)]
pub struct Engine {
    source: Arc<dyn StatusSource>,
    notifier: Arc<dyn Notifier>,
    retry_period: Duration,
    report_failures: bool,
    cancel: CancellationToken,
}

impl Engine {
    pub fn new(
        source: Arc<dyn StatusSource>,
        notifier: Arc<dyn Notifier>,
        config: &Config,
        cancel: CancellationToken,
    ) -> Self {
        Self {
            source,
            notifier,
            retry_period: Duration::from_secs(config.retry_period_seconds),
            report_failures: config.report_failures,
            cancel,
        }
    }

    /// Poll until cancelled, returning the final state.
    ///
    /// The retry period elapses after every cycle, whatever its outcome.
    /// Cancellation is only observed while waiting, never mid-request.
    pub async fn run(self: Arc<Self>, initial: PollState) -> PollState {
        let mut state = initial;
        loop {
            let (next, outcome) = self.run_isolated(state).await;
            state = next;

            tracing::debug!(
                "Cycle finished: {:?} (watermark={})",
                outcome,
                state.watermark
            );

            tokio::select! {
                _ = tokio::time::sleep(self.retry_period) => {}
                _ = self.cancel.cancelled() => {
                    tracing::debug!("Poll loop cancelled");
                    break;
                }
            }
        }
        state
    }

    /// Run one cycle on its own task so that even a panic only costs this cycle.
    ///
    /// If the cycle dies, the state from before the cycle is kept.
    pub async fn run_isolated(self: &Arc<Self>, state: PollState) -> (PollState, CycleOutcome) {
        let engine = Arc::clone(self);
        let mut working = state.clone();
        let handle = tokio::spawn(async move {
            let outcome = engine.run_cycle(&mut working).await;
            (working, outcome)
        });

        match handle.await {
            Ok(result) => result,
            Err(e) => {
                let error = WatchError::Cycle(e.to_string());
                tracing::error!("{}", error);
                let mut state = state;
                self.count_failure(&mut state);
                (state, CycleOutcome::Failed(error.to_string()))
            }
        }
    }

    /// Fetch, validate, interpret and notify once. Never returns an error.
    pub async fn run_cycle(&self, state: &mut PollState) -> CycleOutcome {
        match self.poll_once(state).await {
            Ok(outcome) => {
                state.record_success();
                outcome
            }
            Err(e) => {
                tracing::error!("Poll cycle failed: {}", e);
                self.count_failure(state);
                if self.report_failures {
                    self.report_failure(state, &e).await;
                }
                CycleOutcome::Failed(e.to_string())
            }
        }
    }

    async fn poll_once(&self, state: &mut PollState) -> crate::Result<CycleOutcome> {
        let payload = self.source.fetch(state.watermark).await?;
        let page = check_response(&payload)?;

        // A validated timestamp is authoritative even if the item below is bad
        tracing::debug!("Watermark {} -> {}", state.watermark, page.current_date);
        state.watermark = page.current_date;

        let Some(record) = page.homeworks.first() else {
            tracing::debug!("No homework updates");
            return Ok(CycleOutcome::NoUpdates);
        };

        let homework = parse_status(record)?;
        if !state.is_change(&homework) {
            tracing::info!(
                "Status of '{}' is still '{}'",
                homework.name,
                homework.status
            );
            return Ok(CycleOutcome::Unchanged(homework));
        }

        match deliver(self.notifier.as_ref(), &homework.message()).await {
            Delivery::Sent => {
                state.remember(&homework);
                Ok(CycleOutcome::Notified(homework))
            }
            Delivery::Failed => Ok(CycleOutcome::DeliveryFailed(homework)),
        }
    }

    /// Returns true when this failure crossed the warning threshold
    fn count_failure(&self, state: &mut PollState) -> bool {
        let failures = state.record_failure();
        let warn = failures == CONSECUTIVE_FAILURE_WARNING;
        if warn {
            tracing::warn!("{} consecutive poll cycles have failed", failures);
        }
        warn
    }

    /// Tell the chat about a failed cycle, once per distinct failure
    async fn report_failure(&self, state: &mut PollState, error: &WatchError) {
        let report = format!("{}: {}", FAILURE_REPORT_PREFIX, error);
        if state.last_failure_report.as_deref() == Some(report.as_str()) {
            tracing::debug!("Failure already reported, not sending again");
            return;
        }
        if deliver(self.notifier.as_ref(), &report).await == Delivery::Sent {
            state.last_failure_report = Some(report);
        }
    }
}

/// Current time in epoch seconds, used as the first watermark
pub fn current_epoch_secs() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs() as i64
}
