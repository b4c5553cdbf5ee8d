//! staffdesk CLI entry point.
//!
//! # Responsibility
//! - Load `.env`, parse flags and start logging.
//! - Resolve the database connection string; a missing one is fatal.
//! - Dispatch each page (employee, department, view, import) to a handler.

mod cli;
mod handlers;
mod render;
mod session_shell;

use clap::Parser;
use cli::{Cli, Commands};
use handlers::Report;
use log::{error, info};
use rusqlite::Connection;
use staffdesk_core::db::open_location;
use staffdesk_core::{
    default_log_level, init_logging, write_employee_template, Session, StoreConfig,
};
use std::process::ExitCode;

fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let level = cli.log_level.as_deref().unwrap_or(default_log_level());
    if let Err(err) = init_logging(level, cli.log_dir.as_deref()) {
        eprintln!("logging setup failed: {err}");
        return ExitCode::FAILURE;
    }

    let report = match run(cli) {
        Ok(report) => report,
        Err(message) => {
            error!("event=cli_abort module=cli status=error error={message}");
            eprintln!("{message}");
            return ExitCode::FAILURE;
        }
    };

    if report.ok {
        if !report.text.is_empty() {
            println!("{}", report.text.trim_end());
        }
        ExitCode::SUCCESS
    } else {
        eprintln!("{}", report.text.trim_end());
        ExitCode::FAILURE
    }
}

/// Runs one command. `Err` is reserved for fatal setup failures.
fn run(cli: Cli) -> Result<Report, String> {
    match cli.command {
        Commands::Template { file } => {
            let output = std::fs::File::create(&file)
                .map_err(|err| format!("failed to create `{}`: {err}", file.display()))?;
            write_employee_template(output)
                .map_err(|err| format!("failed to write template: {err}"))?;
            Ok(Report {
                ok: true,
                text: format!("CSV file created: {}", file.display()),
            })
        }
        Commands::Session => {
            let mut session = Session::new();
            let stdin = std::io::stdin();
            session_shell::run_shell(stdin.lock(), std::io::stdout(), &mut session)
                .map_err(|err| format!("session I/O failed: {err}"))?;
            Ok(Report {
                ok: true,
                text: String::new(),
            })
        }
        Commands::Employee(args) => with_database(cli.database_url.as_deref(), |conn| {
            handlers::employee(conn, &args)
        }),
        Commands::Department(args) => with_database(cli.database_url.as_deref(), |conn| {
            handlers::department(conn, &args)
        }),
        Commands::View { format } => {
            with_database(cli.database_url.as_deref(), |conn| handlers::view(conn, format))
        }
        Commands::Import { file } => {
            with_database(cli.database_url.as_deref(), |conn| handlers::import(conn, &file))
        }
    }
}

/// Resolves config and opens the database, then runs `handler` on it.
fn with_database(
    database_url: Option<&str>,
    handler: impl FnOnce(&Connection) -> Report,
) -> Result<Report, String> {
    let config = StoreConfig::from_value(database_url).map_err(|err| err.to_string())?;
    let conn = open_location(&config.location)
        .map_err(|err| format!("failed to open database: {err}"))?;
    info!("event=cli_dispatch module=cli status=start");
    Ok(handler(&conn))
}
