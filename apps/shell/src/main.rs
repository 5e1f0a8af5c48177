use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use densite::config::load_config;
use densite::reports::{ReportConfig, ReportFormat, generate};
use densite::{App, Locality, LocalityKind};
use densite_logger::{LevelFilter, Logger};
use std::path::PathBuf;
use strum::IntoEnumIterator;
use tokio::signal;
use tracing::info;

#[derive(Debug, Parser)]
#[command(name = "densite", about = "Locality registry and density reporting", version)]
struct Cli {
    /// Configuration file (defaults to `densite.toml` next to the binary).
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Register a new locality.
    Add {
        name: String,
        population: u64,
        /// Surface in square kilometres.
        area: f64,
        #[arg(value_parser = parse_kind)]
        kind: LocalityKind,
    },
    /// List localities, optionally filtered by a name fragment.
    Search { query: Option<String> },
    /// Print density statistics per locality kind.
    Stats,
    /// Generate a density report file.
    Report {
        /// Destination file; defaults to `report.<ext>` in the configured output directory.
        #[arg(short, long)]
        output: Option<PathBuf>,
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
        /// Keep only the N densest localities.
        #[arg(short, long)]
        limit: Option<usize>,
        /// Omit the statistics block.
        #[arg(long)]
        no_stats: bool,
        /// Group entries by locality kind.
        #[arg(short, long)]
        group: bool,
    },
    /// Poll the store for changes until interrupted.
    Watch,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Csv,
    Html,
}

impl From<OutputFormat> for ReportFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Text => Self::Text,
            OutputFormat::Csv => Self::Csv,
            OutputFormat::Html => Self::Html,
        }
    }
}

fn parse_kind(raw: &str) -> Result<LocalityKind, String> {
    raw.to_uppercase()
        .parse()
        .map_err(|_| format!("unknown locality kind '{raw}' (expected urban or rural)"))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { LevelFilter::DEBUG } else { LevelFilter::INFO };
    let _log = Logger::builder().name(env!("CARGO_PKG_NAME")).level(level).init()?;

    let cfg = load_config(cli.config.as_deref())
        .context("Critical: Configuration is malformed")?;
    let app = App::init(cfg)?;

    match cli.command {
        Command::Add { name, population, area, kind } => {
            let locality = Locality::new(name, population, area, kind)?;
            let label = locality.name().to_owned();
            app.registry().add(locality)?;
            println!("Registered '{label}'");
        }
        Command::Search { query } => {
            let results = app.registry().search_by_name(query.as_deref().unwrap_or_default());
            if results.is_empty() {
                println!("No localities found");
            } else {
                for locality in results {
                    println!("{locality}");
                }
            }
        }
        Command::Stats => {
            let stats = app.registry().aggregate_by_kind();
            for kind in LocalityKind::iter() {
                match stats.get(&kind) {
                    Some(s) => println!(
                        "{kind}: {} localities, density avg {:.2} min {:.2} max {:.2}",
                        s.count, s.average, s.min, s.max
                    ),
                    None => println!("{kind}: no localities"),
                }
            }
        }
        Command::Report { output, format, limit, no_stats, group } => {
            let format = ReportFormat::from(format);
            let output = match output {
                Some(path) => path,
                None => {
                    let dir = &app.config().report.output_dir;
                    std::fs::create_dir_all(dir)
                        .with_context(|| format!("cannot create {}", dir.display()))?;
                    dir.join(format!("report.{}", format.extension()))
                }
            };

            let mut builder = ReportConfig::builder()
                .format(format)
                .include_statistics(!no_stats)
                .group_by_kind(group)
                .output(output);
            if let Some(limit) = limit {
                builder = builder.limit(limit);
            }

            let written = generate(&app.registry().snapshot(), &builder.build())?;
            println!("Report written to {}", written.display());
        }
        Command::Watch => {
            app.watcher().start()?;
            info!("Watching for store changes, press Ctrl-C to stop");
            signal::ctrl_c().await.context("failed to listen for shutdown signal")?;
            app.watcher().stop().await;
        }
    }

    Ok(())
}
