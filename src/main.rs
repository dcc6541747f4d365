use std::env;
use std::process::ExitCode;

use dashboard::cli::{self, Outcome};
use dashboard::client::ApiConfig;
use dashboard::error::AppError;
use dashboard::state::AppState;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "dashboard=info".to_string()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    dotenvy::dotenv().ok();

    let command = match cli::parse(env::args().skip(1)) {
        Ok(command) => command,
        Err(e) => {
            eprintln!("{}\n\n{}", e.user_message(), cli::USAGE);
            return ExitCode::from(2);
        }
    };

    match cli::run(command, connect, &mut std::io::stdout()).await {
        Ok(Outcome::Success) => ExitCode::SUCCESS,
        Ok(Outcome::Failed) => ExitCode::FAILURE,
        Err(e) => {
            tracing::error!("{}", e);
            eprintln!("{}", e.user_message());
            ExitCode::FAILURE
        }
    }
}

fn connect() -> Result<AppState, AppError> {
    AppState::from_config(ApiConfig::new_from_env()?)
}
