use anyhow::Result;
use clap::{Parser, Subcommand};
use oportuna_common::observability::{init_logging, LogConfig};
use oportuna_config::{OportunaConfig, OportunaConfigLoader};
use std::path::PathBuf;

use commands::OutputFormat;
mod commands;

#[derive(Parser)]
#[command(
    name = "oportuna",
    about = "Mapa de oportunidades: coleta e visualização de cursos gratuitos"
)]
struct Cli {
    /// Configuration file; a missing file falls back to built-in defaults
    /// plus OPORTUNA__ environment overrides.
    #[arg(long, default_value = "oportuna.yaml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Scrape the course listing and write the collected records.
    Scrape {
        #[arg(long, value_enum, default_value_t = OutputFormat::Html)]
        format: OutputFormat,
        /// Output path; stdout when omitted.
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Filter a classified dataset and render it as HTML.
    Render {
        /// Dataset path; defaults to the configured one.
        #[arg(long)]
        dataset: Option<PathBuf>,
        /// Keep only this focus area.
        #[arg(long)]
        area: Option<String>,
        /// Keep only this institution.
        #[arg(long)]
        fonte: Option<String>,
        /// Keep only this duration.
        #[arg(long)]
        duracao: Option<String>,
        /// Card-grid layout instead of the table.
        #[arg(long)]
        cards: bool,
        /// Prepend the one-time welcome panel to the output.
        #[arg(long)]
        welcome: bool,
        /// Output path; stdout when omitted.
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load config first (env wins), then bring up logging.
    let cfg: OportunaConfig = OportunaConfigLoader::new().with_file(&cli.config).load()?;
    init_logging(LogConfig::default())?;

    match cli.command {
        Command::Scrape { format, out } => commands::scrape(&cfg, format, out.as_deref()).await,
        Command::Render {
            dataset,
            area,
            fonte,
            duracao,
            cards,
            welcome,
            out,
        } => commands::render(
            &cfg,
            commands::RenderArgs {
                dataset,
                area,
                fonte,
                duracao,
                cards,
                welcome,
                out,
            },
        ),
    }
}
