//! CLI smoke entry point.
//!
//! # Responsibility
//! - Open a session against the configured database and print a summary.
//! - Keep output deterministic for quick local sanity checks.

use celebre_core::{init_logging_from_config, open_session, CoreConfig, SeedData};
use log::info;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    println!("celebre_core ping={}", celebre_core::ping());
    println!("celebre_core version={}", celebre_core::core_version());

    let config = match CoreConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("invalid configuration: {err}");
            return ExitCode::FAILURE;
        }
    };
    if let Err(err) = init_logging_from_config(&config) {
        eprintln!("logging disabled: {err}");
    }

    let mut manager = match open_session(&config, SeedData::default()) {
        Ok(manager) => manager,
        Err(err) => {
            eprintln!("failed to open {}: {err}", config.resolve_db_path().display());
            return ExitCode::FAILURE;
        }
    };
    let documents = match manager.load_documents().await {
        Ok(count) => count,
        Err(err) => {
            eprintln!("failed to load documents: {err}");
            return ExitCode::FAILURE;
        }
    };

    info!("event=cli_summary module=cli status=ok documents={documents}");
    println!("db_path={}", config.resolve_db_path().display());
    println!("logged_in={}", manager.is_logged_in());
    println!("current_user={}", manager.current_user().email);
    println!("theme={:?}", manager.theme());
    println!("people={}", manager.people().len());
    println!("projects={}", manager.projects().len());
    println!("unread_notifications={}", manager.unread_count());
    println!("documents={documents}");
    ExitCode::SUCCESS
}
