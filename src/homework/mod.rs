pub mod client;
pub mod parser;
pub mod types;
pub mod validator;

pub use client::{HomeworkApi, PracticumClient};
pub use parser::parse_status;
pub use types::{HomeworkStatus, HomeworkUpdate, PollOutcome};
pub use validator::validate;
