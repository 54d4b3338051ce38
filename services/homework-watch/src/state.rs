//! In-memory state carried from one poll cycle to the next

use crate::status::{Homework, HomeworkStatus};

/// Number of failed cycles in a row after which a warning is logged
pub const CONSECUTIVE_FAILURE_WARNING: u32 = 5;

/// The status most recently delivered to the chat
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LastKnownStatus {
    pub name: String,
    pub status: HomeworkStatus,
}

/// Poll loop state. Lost on restart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollState {
    /// `from_date` for the next request
    pub watermark: i64,
    pub last_known: Option<LastKnownStatus>,
    /// Last failure report sent to the chat, to avoid repeating it every cycle
    pub last_failure_report: Option<String>,
    pub consecutive_failures: u32,
}

impl PollState {
    pub fn new(watermark: i64) -> Self {
        Self {
            watermark,
            last_known: None,
            last_failure_report: None,
            consecutive_failures: 0,
        }
    }

    /// Whether `homework` differs from what was last delivered
    pub fn is_change(&self, homework: &Homework) -> bool {
        match &self.last_known {
            Some(last) => last.name != homework.name || last.status != homework.status,
            None => true,
        }
    }

    pub fn remember(&mut self, homework: &Homework) {
        self.last_known = Some(LastKnownStatus {
            name: homework.name.clone(),
            status: homework.status,
        });
    }

    /// Record a failed cycle, returning the new count
    pub fn record_failure(&mut self) -> u32 {
        self.consecutive_failures += 1;
        self.consecutive_failures
    }

    pub fn record_success(&mut self) {
        self.consecutive_failures = 0;
        self.last_failure_report = None;
    }
}
