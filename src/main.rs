mod config;
mod controller;
mod error;
mod inventory;
mod prompt;
mod routes;
mod workflow;

use std::process::ExitCode;

use tracing_subscriber::EnvFilter;

use config::Config;
use controller::auth::resolve_credentials;
use controller::client::HttpController;
use prompt::StdinPrompter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {:#}", e);
            return ExitCode::FAILURE;
        }
    };

    // Logs go to stderr; stdout is the operator transcript
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(config.log_level.as_str().to_lowercase()))
        .with_writer(std::io::stderr)
        .init();
    tracing::debug!("Using controller {}", config.controller.url);

    let credentials = resolve_credentials(
        config.token.as_deref(),
        config.token_file.as_deref(),
        |key| std::env::var(key).ok(),
    );

    let mut api = match HttpController::new(&config.controller) {
        Ok(api) => api,
        Err(e) => {
            workflow::report_fatal(&e);
            return ExitCode::from(e.exit_code());
        }
    };

    match workflow::run(&config, &credentials, &mut api, &mut StdinPrompter).await {
        Ok(summary) => {
            tracing::info!(
                "Done: {} added, {} skipped, {} failed",
                summary.added,
                summary.skipped,
                summary.failed
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            workflow::report_fatal(&e);
            ExitCode::from(e.exit_code())
        }
    }
}
