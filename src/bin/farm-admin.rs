//! # Farm Admin CLI
//!
//! Command-line interface for the farm admin backend: interactive generation of
//! daily tasks and daily combos with live status, the scheduled run, the web
//! server and a few listing helpers.

mod cli;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use farm_admin::config::AdminConfig;
use farm_admin::logging::init_structured_logging;
use tracing::info;

use cli::{
    handle_combo_command, handle_config_command, handle_cron_command, handle_generate_command,
    handle_serve_command, handle_task_command,
};

#[derive(Parser, Debug)]
#[command(name = "farm-admin")]
#[command(about = "Admin tooling for daily tasks and daily combos")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    /// Configuration file path (default: ./farm-admin.toml, ./config/farm-admin.toml, ~/.farm-admin/config.toml)
    #[arg(short, long, env = "FARM_ADMIN_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Generate daily tasks or daily combos over a date range
    #[command(subcommand)]
    Generate(GenerateCommands),

    /// Scheduled generation
    #[command(subcommand)]
    Cron(CronCommands),

    /// Start the web server with the scheduled trigger endpoint
    Serve {
        /// Override the configured bind address
        #[arg(short, long)]
        bind: Option<String>,
    },

    /// Daily task records
    #[command(subcommand)]
    Tasks(TaskCommands),

    /// Daily combo records
    #[command(subcommand)]
    Combos(ComboCommands),

    /// Configuration management
    #[command(subcommand)]
    Config(ConfigCommands),
}

#[derive(Debug, Subcommand)]
pub enum GenerateCommands {
    /// Ensure one daily task per date and type
    Tasks {
        /// First day (YYYY-MM-DD, default: today)
        #[arg(short, long)]
        start: Option<String>,
        /// Last day (YYYY-MM-DD, default: end of this month)
        #[arg(short, long)]
        end: Option<String>,
        /// Task type to generate; repeat for several (default: Ad)
        #[arg(short = 't', long = "type", value_name = "TYPE")]
        types: Vec<String>,
        /// Task name override
        #[arg(long)]
        name: Option<String>,
        /// Task medium override (Youtube, Telegram, X, Facebook, Other)
        #[arg(long)]
        medium: Option<String>,
        /// Task summary override
        #[arg(long)]
        summary: Option<String>,
        /// Task link override
        #[arg(long)]
        link: Option<String>,
        /// Task reward override
        #[arg(long)]
        reward: Option<String>,
        /// Task image override
        #[arg(long)]
        image: Option<String>,
    },
    /// Create a daily combo for every date without one
    Combos {
        /// First day (YYYY-MM-DD, default: day after the latest combo, or today)
        #[arg(short, long)]
        start: Option<String>,
        /// Last day (YYYY-MM-DD, default: fifteen days after the start)
        #[arg(short, long)]
        end: Option<String>,
        /// Combo reward
        #[arg(long)]
        reward: Option<String>,
        /// Seed for the item slot draws (random when omitted)
        #[arg(long)]
        seed: Option<u64>,
    },
}

#[derive(Debug, Subcommand)]
pub enum CronCommands {
    /// Run the scheduled generation once for this week
    Run {
        /// Plan as if today were this day (YYYY-MM-DD)
        #[arg(long)]
        today: Option<String>,
    },
}

#[derive(Debug, Subcommand)]
pub enum TaskCommands {
    /// List every daily task
    List,
    /// Delete a daily task by id
    Delete {
        #[arg(value_name = "ID")]
        task_id: String,
    },
}

#[derive(Debug, Subcommand)]
pub enum ComboCommands {
    /// List every daily combo
    List,
    /// Show today's combos
    Current,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Show the effective configuration with secrets masked
    Show,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_structured_logging();

    let config = match &cli.config {
        Some(path) => AdminConfig::load_from_file(path)?,
        None => AdminConfig::load()?,
    };

    info!(
        base_url = %config.api.base_url,
        workers = config.generator.concurrency_limit,
        "farm-admin starting"
    );

    match cli.command {
        Commands::Generate(cmd) => handle_generate_command(cmd, &config).await,
        Commands::Cron(cmd) => handle_cron_command(cmd, &config).await,
        Commands::Serve { bind } => handle_serve_command(bind, config).await,
        Commands::Tasks(cmd) => handle_task_command(cmd, &config).await,
        Commands::Combos(cmd) => handle_combo_command(cmd, &config).await,
        Commands::Config(cmd) => handle_config_command(cmd, &config),
    }
}
