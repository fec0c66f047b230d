use std::time::Duration;

use super::types::{CycleOutcome, MonitorState};
use crate::{
    errors::{error_chain, BotError},
    homework::{parse_status, validate, HomeworkApi, PollOutcome},
    telegram::ChatSender,
};

/// Sends `text` to the chat. Delivery failures are logged and swallowed;
/// the return value says whether the message went out.
pub async fn notify<C: ChatSender>(chat: &C, chat_id: &str, text: &str) -> bool {
    match chat.send_message(chat_id, text).await {
        Ok(()) => {
            log::debug!("Message sent to chat {chat_id}");
            true
        }
        Err(e) => {
            log::error!("Error sending Telegram message: {e}");
            false
        }
    }
}

/// Polls the homework API and relays status changes to one chat.
pub struct HomeworkMonitor<A, C> {
    api: A,
    chat: C,
    chat_id: String,
    retry_period: Duration,
    state: MonitorState,
}

impl<A: HomeworkApi, C: ChatSender> HomeworkMonitor<A, C> {
    pub fn new(api: A, chat: C, chat_id: String, retry_period: Duration, cursor: i64) -> Self {
        Self {
            api,
            chat,
            chat_id,
            retry_period,
            state: MonitorState::new(cursor),
        }
    }

    pub fn state(&self) -> &MonitorState {
        &self.state
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn chat(&self) -> &C {
        &self.chat
    }

    /// Runs forever: one cycle, then a fixed sleep, whatever the cycle did.
    pub async fn start(mut self) {
        log::info!(
            "Homework monitor started, polling every {}s from {}",
            self.retry_period.as_secs(),
            self.state.cursor
        );
        loop {
            self.run_cycle().await;
            tokio::time::sleep(self.retry_period).await;
        }
    }

    /// One fetch, validate, parse, notify pass. Never returns an error:
    /// failures are reported to the chat and handed back for inspection.
    pub async fn run_cycle(&mut self) -> CycleOutcome {
        match self.poll().await {
            Ok(Some(message)) => CycleOutcome::Notified(message),
            Ok(None) => CycleOutcome::NoNewWork,
            Err(e) => {
                self.report_failure(&e).await;
                CycleOutcome::Failed(e)
            }
        }
    }

    async fn poll(&mut self) -> Result<Option<String>, BotError> {
        let response = self.api.fetch_statuses(self.state.cursor).await?;
        let now = chrono::Utc::now().timestamp();

        match validate(response, now)? {
            PollOutcome::NoNewWork { current_date } => {
                log::debug!("No new homework statuses since {}", self.state.cursor);
                // Advance anyway so the same empty window is not polled forever.
                self.state.cursor = current_date;
                Ok(None)
            }
            PollOutcome::Updates {
                homeworks,
                current_date,
            } => {
                let latest = homeworks
                    .first()
                    .ok_or_else(|| BotError::shape("homework list is empty"))?;
                let message = parse_status(latest)?;
                log::info!("Homework status update: {message}");
                notify(&self.chat, &self.chat_id, &message).await;
                self.state.cursor = current_date;
                Ok(Some(message))
            }
        }
    }

    async fn report_failure(&mut self, error: &BotError) {
        log::error!(
            "Poll cycle failed [{}]: {} ({error:?})",
            error.kind(),
            error_chain(error)
        );

        let message = format!("Program malfunction: {error}");
        if self.state.last_failure.as_deref() == Some(message.as_str()) {
            log::debug!("Same failure already reported, not notifying again");
            return;
        }

        if notify(&self.chat, &self.chat_id, &message).await {
            self.state.last_failure = Some(message);
        }
    }
}
