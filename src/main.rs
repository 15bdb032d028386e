use anyhow::Result;
use clap::Parser;
use tokio::signal;
use tracing_subscriber::EnvFilter;

use docchat::cli::commands::{
    handle_chat, handle_conversations, handle_init_db, handle_messages, handle_serve,
    handle_upload,
};
use docchat::cli::{Cli, Commands};
use docchat::models::Config;

fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "docchat=debug" } else { "docchat=info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let config = Config::load()?;

    tokio::select! {
        result = run_command(cli.command, config) => {
            result?;
        }
        _ = shutdown_signal() => {
            eprintln!("\nReceived shutdown signal, stopping...");
        }
    }

    Ok(())
}

async fn run_command(command: Commands, config: Config) -> Result<()> {
    match command {
        Commands::Serve => {
            handle_serve(config).await?;
        }
        Commands::InitDb => {
            handle_init_db(config).await?;
        }
        Commands::Upload(args) => {
            handle_upload(args, config).await?;
        }
        Commands::Chat(args) => {
            handle_chat(args, config).await?;
        }
        Commands::Conversations => {
            handle_conversations(config).await?;
        }
        Commands::Messages(args) => {
            handle_messages(args, config).await?;
        }
    }

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
