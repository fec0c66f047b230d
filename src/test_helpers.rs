use std::cell::RefCell;
use std::collections::VecDeque;

use serde_json::Value;

use crate::errors::{BotError, TelegramError};
use crate::homework::HomeworkApi;
use crate::telegram::ChatSender;

/// Homework API that replays canned responses and records every `from_date`.
#[derive(Default)]
pub struct FakeHomeworkApi {
    responses: RefCell<VecDeque<Result<Value, BotError>>>,
    pub requests: RefCell<Vec<i64>>,
}

impl FakeHomeworkApi {
    pub fn new(responses: Vec<Result<Value, BotError>>) -> Self {
        Self {
            responses: RefCell::new(responses.into()),
            requests: RefCell::new(Vec::new()),
        }
    }
}

impl HomeworkApi for FakeHomeworkApi {
    async fn fetch_statuses(&self, from_date: i64) -> Result<Value, BotError> {
        self.requests.borrow_mut().push(from_date);
        self.responses
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| panic!("no canned response left for from_date={from_date}"))
    }
}

/// Chat that records delivered messages, optionally failing every send.
#[derive(Default)]
pub struct FakeChat {
    pub sent: RefCell<Vec<(String, String)>>,
    pub fail: bool,
}

impl FakeChat {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    pub fn texts(&self) -> Vec<String> {
        self.sent.borrow().iter().map(|(_, text)| text.clone()).collect()
    }
}

impl ChatSender for FakeChat {
    async fn send_message(&self, chat_id: &str, text: &str) -> Result<(), TelegramError> {
        if self.fail {
            return Err(TelegramError::Rejected("Forbidden: bot was blocked".to_string()));
        }
        self.sent
            .borrow_mut()
            .push((chat_id.to_string(), text.to_string()));
        Ok(())
    }
}
