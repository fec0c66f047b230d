use serde_json::Value;

use super::types::PollOutcome;
use crate::errors::BotError;

const HOMEWORKS: &str = "homeworks";
const CURRENT_DATE: &str = "current_date";

/// Checks the shape of a homework API response.
///
/// Both required keys are checked before any type checks, so a response
/// missing `current_date` is reported as such even when `homeworks` is there.
/// `now` is the upper bound accepted for `current_date`.
pub fn validate(response: Value, now: i64) -> Result<PollOutcome, BotError> {
    let mut body = match response {
        Value::Object(body) => body,
        other => {
            return Err(BotError::shape(format!(
                "expected a JSON object, got {}",
                json_type(&other)
            )))
        }
    };

    if !body.contains_key(HOMEWORKS) {
        return Err(BotError::MissingKey(HOMEWORKS));
    }
    if !body.contains_key(CURRENT_DATE) {
        return Err(BotError::MissingKey(CURRENT_DATE));
    }

    let homeworks = match body.remove(HOMEWORKS) {
        Some(Value::Array(items)) => items,
        Some(other) => {
            return Err(BotError::shape(format!(
                "`{HOMEWORKS}` should be a list, got {}",
                json_type(&other)
            )))
        }
        None => return Err(BotError::MissingKey(HOMEWORKS)),
    };

    let current_date = match body.get(CURRENT_DATE).and_then(Value::as_i64) {
        Some(ts) => ts,
        None => {
            return Err(BotError::shape(format!(
                "`{CURRENT_DATE}` should be an integer timestamp"
            )))
        }
    };
    if !(0..=now).contains(&current_date) {
        return Err(BotError::shape(format!(
            "`{CURRENT_DATE}` {current_date} is outside [0, {now}]"
        )));
    }

    if let Some(position) = homeworks.iter().position(|item| !item.is_object()) {
        return Err(BotError::shape(format!(
            "homework #{position} should be an object, got {}",
            json_type(&homeworks[position])
        )));
    }

    if homeworks.is_empty() {
        return Ok(PollOutcome::NoNewWork { current_date });
    }

    Ok(PollOutcome::Updates {
        homeworks,
        current_date,
    })
}

pub(crate) fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}
