//! Binary entrypoint for the rebalance CLI.
//!
//! Commands:
//! - `init` - create a starter `config.toml` and an empty `notify.toml`
//! - `patch --db <file>` - run one patch pass over a database snapshot
//! - `announce <message>` - send a test message through the notification channel
//!
//! See the library crate docs for module-level details: `rebalance::`.
use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use log::info;

use rebalance::config::{ChannelCredentials, TweaksConfig};
use rebalance::db::configs::ServerConfigs;
use rebalance::db::DatabaseTables;
use rebalance::engine;
use rebalance::notify::Notifier;

#[derive(Parser)]
#[command(name = "rebalance")]
#[command(about = "Configuration-driven balance patcher for modded game server databases")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Tweak configuration file path (can be used before or after subcommand)
    #[arg(short, long, default_value = "config.toml", global = true)]
    config: String,

    /// Notification credentials file path
    #[arg(long, default_value = "notify.toml", global = true)]
    credentials: String,

    /// Verbose logging (-v, -vv for more; may appear before or after subcommand)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration and credentials files
    Init,
    /// Run one patch pass over a database snapshot
    Patch {
        /// Database tables JSON file
        #[arg(long)]
        db: String,

        /// Server config sections JSON file
        #[arg(long)]
        server_config: Option<String>,

        /// Write the patched tables to this path
        #[arg(long)]
        out: Option<String>,

        /// Write the patched config sections to this path
        #[arg(long)]
        out_server_config: Option<String>,
    },
    /// Send a test message through the notification channel
    Announce {
        /// Message text
        message: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Init => {
            TweaksConfig::create_default(&cli.config).await?;
            info!("Created default config at {}", cli.config);
            ChannelCredentials::create_default(&cli.credentials).await?;
            info!("Created credentials skeleton at {}", cli.credentials);
        }
        Commands::Patch {
            db,
            server_config,
            out,
            out_server_config,
        } => {
            let config = TweaksConfig::load(&cli.config).await?;

            let raw = tokio::fs::read_to_string(&db)
                .await
                .map_err(|e| anyhow!("Failed to read database file {}: {}", db, e))?;
            let mut tables: DatabaseTables = serde_json::from_str(&raw)
                .map_err(|e| anyhow!("Failed to parse database file {}: {}", db, e))?;

            let mut sections = match &server_config {
                Some(path) => {
                    let raw = tokio::fs::read_to_string(path)
                        .await
                        .map_err(|e| anyhow!("Failed to read server config {}: {}", path, e))?;
                    serde_json::from_str(&raw)
                        .map_err(|e| anyhow!("Failed to parse server config {}: {}", path, e))?
                }
                None => ServerConfigs::default(),
            };

            let summary = engine::run(&mut tables, &mut sections, &config)?;
            info!(
                "Touched {} buffs, {} items, {} quests, {} traders",
                summary.buffs_changed,
                summary.items_updated,
                summary.quests_updated,
                summary.traders_updated
            );

            if let Some(path) = out {
                let rendered = serde_json::to_string_pretty(&tables)?;
                tokio::fs::write(&path, rendered)
                    .await
                    .map_err(|e| anyhow!("Failed to write patched tables to {}: {}", path, e))?;
                info!("Wrote patched tables to {}", path);
            }
            if let Some(path) = out_server_config {
                let rendered = serde_json::to_string_pretty(&sections)?;
                tokio::fs::write(&path, rendered)
                    .await
                    .map_err(|e| anyhow!("Failed to write patched config to {}: {}", path, e))?;
                info!("Wrote patched config sections to {}", path);
            }
        }
        Commands::Announce { message } => {
            let creds = ChannelCredentials::load(&cli.credentials).await?;
            let notifier = Notifier::new(creds);
            if !notifier.is_configured() {
                return Err(anyhow!(
                    "notification credentials in {} are incomplete",
                    cli.credentials
                ));
            }
            notifier.post_and_wait(&message).await?;
            info!("Message delivered");
        }
    }

    Ok(())
}

fn init_logging(verbosity: u8) {
    use std::io::Write;
    let mut builder = env_logger::Builder::new();
    let base_level = match verbosity {
        0 => log::LevelFilter::Info,
        1 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    builder.filter_level(base_level);
    // Plain timestamps when piped, colors only on a real terminal
    if !atty::is(atty::Stream::Stdout) {
        builder.write_style(env_logger::WriteStyle::Never);
    }
    builder.format(|fmt, record| {
        writeln!(
            fmt,
            "{} [{}] {}",
            chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ"),
            record.level(),
            record.args()
        )
    });
    let _ = builder.try_init();
}
