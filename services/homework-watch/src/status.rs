//! Homework status types and verdict wording

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

use crate::error::StatusError;

/// Review status reported by the homework API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HomeworkStatus {
    Approved,
    Reviewing,
    Rejected,
}

impl HomeworkStatus {
    /// Human-readable verdict sent to the chat
    pub fn verdict(&self) -> &'static str {
        match self {
            HomeworkStatus::Approved => "Работа проверена: ревьюеру всё понравилось. Ура!",
            HomeworkStatus::Reviewing => "Работа взята на проверку ревьюером.",
            HomeworkStatus::Rejected => "Работа проверена: у ревьюера есть замечания.",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            HomeworkStatus::Approved => "approved",
            HomeworkStatus::Reviewing => "reviewing",
            HomeworkStatus::Rejected => "rejected",
        }
    }
}

impl fmt::Display for HomeworkStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HomeworkStatus {
    type Err = StatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "approved" => Ok(HomeworkStatus::Approved),
            "reviewing" => Ok(HomeworkStatus::Reviewing),
            "rejected" => Ok(HomeworkStatus::Rejected),
            other => Err(StatusError::UnrecognizedStatus(other.to_string())),
        }
    }
}

/// A homework record that passed [`parse_status`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Homework {
    pub name: String,
    pub status: HomeworkStatus,
}

impl Homework {
    /// Notification text for this homework's current status
    pub fn message(&self) -> String {
        format!(
            "Изменился статус проверки работы \"{}\". {}",
            self.name,
            self.status.verdict()
        )
    }
}

/// Interpret one raw homework record.
///
/// `homework_name` must be a string and `status` must be present and non-null.
/// A status that is not a known string, including non-string JSON values, is
/// unrecognized.
pub fn parse_status(record: &Value) -> Result<Homework, StatusError> {
    let name = record
        .get("homework_name")
        .and_then(Value::as_str)
        .ok_or(StatusError::MissingName)?;

    let status = match record.get("status") {
        None | Some(Value::Null) => return Err(StatusError::MissingStatus),
        Some(Value::String(s)) => s.parse::<HomeworkStatus>()?,
        Some(other) => return Err(StatusError::UnrecognizedStatus(other.to_string())),
    };

    Ok(Homework {
        name: name.to_string(),
        status,
    })
}
