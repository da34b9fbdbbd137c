use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use killboard_cli::{CliContext, commands, logging};
use killboard_core::context::{KillCounting, OutputFormat};

#[tokio::main]
async fn main() -> Result<()> {
    logging::init();

    let cli = Cli::parse();
    let mut ctx = CliContext::new();
    cli.apply_overrides(&mut ctx);

    match &cli.command {
        Commands::Guild {
            name,
            server,
            region,
        } => commands::guild(&ctx, name, server.as_deref(), region.as_deref()).await,
        Commands::User { id } => commands::user(&ctx, *id).await,
        Commands::File { path } => commands::file(&ctx, path),
        Commands::Config { save } => {
            if *save {
                commands::save_config(&ctx)?;
            }
            commands::show_config(&ctx)
        }
    }
}

#[derive(Parser)]
#[command(
    name = "killboard",
    version,
    about = "First-seen and first-kill summary of raid encounters"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Write CSV instead of the text report
    #[arg(long, global = true)]
    csv: bool,

    /// Output file; pass an empty string to write to stdout
    #[arg(long = "fn", short = 'o', visible_alias = "output", global = true)]
    output: Option<String>,

    /// Count every kill, not only kills that set a new earliest time
    #[arg(long, global = true)]
    every_kill: bool,

    /// OAuth client id (overrides CLIENT_ID and the config file)
    #[arg(long, global = true)]
    client_id: Option<String>,

    /// OAuth client secret (overrides CLIENT_SECRET and the config file)
    #[arg(long, global = true)]
    client_secret: Option<String>,

    /// Also save fetched reports as JSON for later `file` runs
    #[arg(long, global = true)]
    save_reports: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Summarize a guild's reports
    Guild {
        #[arg(short, long)]
        name: String,
        /// Server slug, e.g. "area-52"
        #[arg(short, long)]
        server: Option<String>,
        /// Server region, e.g. "us"
        #[arg(short, long)]
        region: Option<String>,
    },
    /// Summarize a user's reports
    User {
        #[arg(long)]
        id: i64,
    },
    /// Summarize reports from a saved JSON file
    File {
        #[arg(short, long)]
        path: PathBuf,
    },
    /// Show the effective configuration
    Config {
        /// Persist the effective configuration, including flag overrides
        #[arg(long)]
        save: bool,
    },
}

impl Cli {
    fn apply_overrides(&self, ctx: &mut CliContext) {
        let config = &mut ctx.config;
        if self.csv {
            config.output_format = OutputFormat::Csv;
        }
        if self.every_kill {
            config.kill_counting = KillCounting::EveryKill;
        }
        if let Some(output) = &self.output {
            config.output_file = output.clone();
        }
        if let Some(id) = &self.client_id {
            config.client_id = Some(id.clone());
        }
        if let Some(secret) = &self.client_secret {
            config.client_secret = Some(secret.clone());
        }
        ctx.save_reports = self.save_reports.clone();
    }
}
