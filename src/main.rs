mod components;
mod forms;
mod pages;
mod router;
mod shell;

use std::process::ExitCode;
use std::sync::Arc;

use auth::{AuthHandle, SessionStore, SupabaseAuth, SupabaseConfig};
use clap::Parser;
use tokio::io::BufReader;
use tracing_subscriber::EnvFilter;

use crate::router::Route;
use crate::shell::{Shell, ShellError};

#[derive(Parser, Debug)]
#[command(name = "spendlog", about = "Expense tracker dashboard with hosted sign-in")]
struct Cli {
    /// Route opened at startup.
    #[arg(long, env = "SPENDLOG_START_ROUTE", default_value = "/")]
    start_route: Route,

    /// Where the dashboard guard sends signed-out users.
    #[arg(long, env = "SPENDLOG_LOGIN_ROUTE", default_value = "/login")]
    login_route: Route,
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "spendlog exited with error");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), ShellError> {
    let config = SupabaseConfig::from_env()?;
    tracing::info!(url = %config.url, start = %cli.start_route, "spendlog starting");
    let backend = SupabaseAuth::new(config)?;

    let handle = AuthHandle::new(SessionStore::new(Arc::new(backend)));
    let mut shell = Shell::new(handle, cli.start_route, cli.login_route, std::io::stdout());
    shell.run(BufReader::new(tokio::io::stdin())).await
}
