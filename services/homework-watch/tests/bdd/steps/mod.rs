//! BDD step definitions for the homework watcher

pub mod notification_steps;
pub mod startup_steps;
pub mod status_steps;
