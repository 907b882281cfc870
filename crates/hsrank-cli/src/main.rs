use std::process::ExitCode;

use clap::{Parser, Subcommand};

mod pipeline;

#[derive(Debug, Parser)]
#[command(name = "hsrank")]
#[command(about = "Daily home-shopping ranking scrape and spreadsheet report")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Run the full scrape → snapshot → report pipeline.
    Run,
    /// Probe the ranking-site login only; exit 0 on success, 1 on failure.
    LoginCheck,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Missing credentials abort before any browser or network action.
    let config = match hsrank_core::load_app_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("configuration error: {e}");
            return ExitCode::from(2);
        }
    };

    init_tracing(&config.log_level);

    let result = match cli.command {
        Commands::Run => pipeline::run(&config).await,
        Commands::LoginCheck => pipeline::login_check(&config).await,
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %format!("{e:#}"), "pipeline failed");
            ExitCode::from(1)
        }
    }
}

fn init_tracing(default_level: &str) {
    use tracing_subscriber::EnvFilter;
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level.to_owned()));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
