pub mod runner;
pub mod types;

pub use runner::{notify, HomeworkMonitor};
pub use types::{CycleOutcome, MonitorState};
