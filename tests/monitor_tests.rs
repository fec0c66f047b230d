use std::cell::RefCell;
use std::collections::VecDeque;
use std::time::Duration;

use hwstatus_bot::{
    homework::HomeworkApi, telegram::ChatSender, AppConfig, BotError, CycleOutcome,
    HomeworkMonitor, TelegramError,
};
use reqwest::StatusCode;
use serde_json::{json, Value};

struct ScriptedApi {
    responses: RefCell<VecDeque<Result<Value, BotError>>>,
    seen: RefCell<Vec<i64>>,
}

impl ScriptedApi {
    fn new(responses: Vec<Result<Value, BotError>>) -> Self {
        Self {
            responses: RefCell::new(responses.into()),
            seen: RefCell::new(Vec::new()),
        }
    }
}

impl HomeworkApi for ScriptedApi {
    async fn fetch_statuses(&self, from_date: i64) -> Result<Value, BotError> {
        self.seen.borrow_mut().push(from_date);
        self.responses
            .borrow_mut()
            .pop_front()
            .expect("script exhausted")
    }
}

#[derive(Default)]
struct RecordingChat {
    messages: RefCell<Vec<String>>,
}

impl ChatSender for RecordingChat {
    async fn send_message(&self, _chat_id: &str, text: &str) -> Result<(), TelegramError> {
        self.messages.borrow_mut().push(text.to_string());
        Ok(())
    }
}

fn config() -> AppConfig {
    AppConfig::from_lookup(|key| match key {
        "PRACTICUM_TOKEN" => Some("practicum".to_string()),
        "TELEGRAM_TOKEN" => Some("telegram".to_string()),
        "TELEGRAM_CHAT_ID" => Some("100500".to_string()),
        _ => None,
    })
    .expect("config should load")
}

#[tokio::test]
async fn test_outage_then_recovery_then_review() {
    let config = config();
    let api = ScriptedApi::new(vec![
        Err(BotError::UnexpectedStatus(StatusCode::SERVICE_UNAVAILABLE)),
        Err(BotError::UnexpectedStatus(StatusCode::SERVICE_UNAVAILABLE)),
        Ok(json!({"homeworks": [], "current_date": 1_699_000_000})),
        Ok(json!({
            "homeworks": [{"homework_name": "HW1", "status": "rejected"}],
            "current_date": 1_700_000_000
        })),
    ]);
    let mut monitor = HomeworkMonitor::new(
        api,
        RecordingChat::default(),
        config.credentials.telegram_chat_id.clone(),
        config.retry_period,
        1_698_000_000,
    );

    let outcomes = vec![
        monitor.run_cycle().await,
        monitor.run_cycle().await,
        monitor.run_cycle().await,
        monitor.run_cycle().await,
    ];

    assert!(outcomes[0].is_failure());
    assert!(outcomes[1].is_failure());
    assert!(matches!(outcomes[2], CycleOutcome::NoNewWork));
    assert!(matches!(outcomes[3], CycleOutcome::Notified(_)));

    // The outage is reported once; the empty window stays silent.
    let messages = monitor.chat().messages.borrow().clone();
    assert_eq!(messages.len(), 2);
    assert!(messages[0].contains("503"));
    assert_eq!(
        messages[1],
        "Changed review status of work \"HW1\". Работа проверена: у ревьюера есть замечания."
    );

    assert_eq!(
        *monitor.api().seen.borrow(),
        vec![1_698_000_000, 1_698_000_000, 1_698_000_000, 1_699_000_000]
    );
    assert_eq!(monitor.state().cursor, 1_700_000_000);
}

#[test]
fn test_config_retry_period_defaults_to_ten_minutes() {
    assert_eq!(config().retry_period, Duration::from_secs(600));
}
