use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use dotenvy::dotenv;
use hwstatus_bot::{
    config::{self, AppConfig},
    homework::PracticumClient,
    observability::{self, ObservabilityConfig},
    telegram::TelegramClient,
    HomeworkMonitor,
};

/// CLI options
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Load environment variables from this file instead of `./.env`
    #[clap(long)]
    env_file: Option<PathBuf>,

    /// Run a single poll cycle and exit
    #[clap(long)]
    once: bool,

    /// Unix timestamp to start polling from (defaults to now)
    #[clap(long)]
    from_date: Option<i64>,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let env_loaded = match &args.env_file {
        Some(path) => config::load_env_file(path),
        None => {
            dotenv().ok();
            Ok(())
        }
    };

    observability::init_logging(&ObservabilityConfig::from_env());

    if let Err(e) = env_loaded {
        log::error!("{e}");
        return ExitCode::FAILURE;
    }

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            log::error!("Fatal: {e}. Bot stopped.");
            return ExitCode::FAILURE;
        }
    };

    run(config, args)
}

#[tokio::main(flavor = "current_thread")]
async fn run(config: AppConfig, args: Args) -> ExitCode {
    let api = match PracticumClient::new(&config) {
        Ok(api) => api,
        Err(e) => {
            log::error!("Fatal: could not build HTTP client: {e}");
            return ExitCode::FAILURE;
        }
    };
    let chat = TelegramClient::new(&config);
    let cursor = args
        .from_date
        .unwrap_or_else(|| chrono::Utc::now().timestamp());

    let mut monitor = HomeworkMonitor::new(
        api,
        chat,
        config.credentials.telegram_chat_id.clone(),
        config.retry_period,
        cursor,
    );

    if args.once {
        let outcome = monitor.run_cycle().await;
        log::info!("Single cycle finished: {outcome:?}");
        return if outcome.is_failure() {
            ExitCode::FAILURE
        } else {
            ExitCode::SUCCESS
        };
    }

    monitor.start().await;
    ExitCode::SUCCESS
}
