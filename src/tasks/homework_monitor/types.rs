use crate::errors::BotError;

/// Mutable state carried from one poll cycle to the next. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonitorState {
    /// Start of the next poll window, as a Unix timestamp.
    pub cursor: i64,
    /// Last failure message delivered to the chat.
    pub last_failure: Option<String>,
}

impl MonitorState {
    pub fn new(cursor: i64) -> Self {
        Self {
            cursor,
            last_failure: None,
        }
    }
}

#[derive(Debug)]
pub enum CycleOutcome {
    /// A status change was announced (delivery may still have failed).
    Notified(String),
    NoNewWork,
    Failed(BotError),
}

impl CycleOutcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, CycleOutcome::Failed(_))
    }
}
