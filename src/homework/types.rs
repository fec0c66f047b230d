use std::fmt;

use serde_json::Value;

/// Review states the homework API documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HomeworkStatus {
    Approved,
    Reviewing,
    Rejected,
}

impl HomeworkStatus {
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "approved" => Some(HomeworkStatus::Approved),
            "reviewing" => Some(HomeworkStatus::Reviewing),
            "rejected" => Some(HomeworkStatus::Rejected),
            _ => None,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            HomeworkStatus::Approved => "approved",
            HomeworkStatus::Reviewing => "reviewing",
            HomeworkStatus::Rejected => "rejected",
        }
    }

    /// Text shown to the student in chat.
    pub fn verdict(self) -> &'static str {
        match self {
            HomeworkStatus::Approved => "Работа проверена: ревьюеру всё понравилось. Ура!",
            HomeworkStatus::Reviewing => "Работа взята на проверку ревьюером.",
            HomeworkStatus::Rejected => "Работа проверена: у ревьюера есть замечания.",
        }
    }
}

/// A single homework record that passed parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HomeworkUpdate {
    pub name: String,
    pub status: HomeworkStatus,
}

impl fmt::Display for HomeworkUpdate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Changed review status of work \"{}\". {}",
            self.name,
            self.status.verdict()
        )
    }
}

/// Result of validating one API response.
#[derive(Debug, Clone, PartialEq)]
pub enum PollOutcome {
    /// At least one homework changed since the cursor.
    Updates {
        homeworks: Vec<Value>,
        current_date: i64,
    },
    /// Nothing changed in the polled window.
    NoNewWork { current_date: i64 },
}

impl PollOutcome {
    pub fn current_date(&self) -> i64 {
        match self {
            PollOutcome::Updates { current_date, .. } | PollOutcome::NoNewWork { current_date } => {
                *current_date
            }
        }
    }
}
