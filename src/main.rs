use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};

use library_stock::bot::{self, TelegramApi};
use library_stock::catalog::StaticBranchDirectory;
use library_stock::config::Config;
use library_stock::logging;
use library_stock::server;

#[derive(Parser)]
#[command(name = "library_stock")]
#[command(about = "Game and movie availability in the Leipzig municipal library")]
#[command(version)]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(long, default_value = "config.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP interface
    Serve {
        /// Port to listen on (overrides config and PORT)
        #[arg(long)]
        port: Option<u16>,
    },
    /// Run the chat bot (requires BOT_TOKEN)
    Bot,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    logging::init_logging();

    let cli = Cli::parse();
    let mut config = Config::load(&cli.config)?;

    match cli.command {
        Commands::Serve { port } => {
            if let Some(port) = port {
                config.server.port = port;
            }
            server::start_server(&config).await?;
        }
        Commands::Bot => {
            let token = match config.bot_token() {
                Ok(token) => token,
                Err(e) => {
                    error!("{}", e);
                    return Err(e.into());
                }
            };
            let poll_timeout = Duration::from_secs(config.bot.poll_timeout_seconds);
            let transport = Arc::new(TelegramApi::new(token, poll_timeout)?);
            let directory = Arc::new(StaticBranchDirectory::default());

            tokio::select! {
                result = bot::run(transport, directory, poll_timeout) => result?,
                _ = tokio::signal::ctrl_c() => info!("Shutting down bot"),
            }
        }
    }
    Ok(())
}
