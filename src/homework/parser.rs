use serde_json::Value;

use super::types::{HomeworkStatus, HomeworkUpdate};
use super::validator::json_type;
use crate::errors::BotError;

impl HomeworkUpdate {
    pub fn from_record(record: &Value) -> Result<Self, BotError> {
        let record = record.as_object().ok_or_else(|| {
            BotError::shape(format!(
                "homework record should be an object, got {}",
                json_type(record)
            ))
        })?;

        let name = record
            .get("homework_name")
            .ok_or(BotError::MissingKey("homework_name"))?;
        let name = name.as_str().ok_or_else(|| {
            BotError::shape(format!(
                "`homework_name` should be a string, got {}",
                json_type(name)
            ))
        })?;

        let status = record.get("status").ok_or(BotError::MissingKey("status"))?;
        let status = status
            .as_str()
            .and_then(HomeworkStatus::from_code)
            .ok_or_else(|| match status {
                Value::String(code) => BotError::UnknownStatus(code.clone()),
                other => BotError::UnknownStatus(other.to_string()),
            })?;

        Ok(Self {
            name: name.to_string(),
            status,
        })
    }
}

/// Turns a homework record into the chat message announcing its new status.
pub fn parse_status(record: &Value) -> Result<String, BotError> {
    HomeworkUpdate::from_record(record).map(|update| update.to_string())
}
