//! Fairway - Terminal leaderboard for a golf tournament kept in a spreadsheet

mod storage;
#[cfg(feature = "tui")]
mod tui;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use fairway_core::{ApiSource, PageId, PageSource, SheetSource, load_config};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(name = "fairway", version)]
#[command(about = "Leaderboard viewer for a multi-round golf tournament kept in a spreadsheet")]
struct Cli {
    /// Page to open: overall, round1 ... round6
    #[arg(default_value = "overall")]
    page: PageId,

    /// Tournament config file (defaults to <config dir>/fairway/config.toml)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Load round pages from the legacy JSON backend at this base URL
    #[arg(long, value_name = "URL")]
    api: Option<String>,

    /// Use the legacy JSON backend configured in the config file
    #[arg(long)]
    legacy: bool,

    /// Export the page to a markdown file (non-interactive)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Print the URL the page would be fetched from and exit
    #[arg(long)]
    print_url: bool,

    /// More logging (-v info, -vv debug); RUST_LOG overrides
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn interactive(&self) -> bool {
        self.output.is_none() && !self.print_url
    }
}

fn init_logging(verbose: u8, interactive: bool) {
    // Log lines would tear through the viewer, so it stays quiet unless asked.
    let default = match verbose {
        0 if interactive => "off",
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default)).init();
}

fn build_source(cli: &Cli) -> Result<(Arc<dyn PageSource>, u8)> {
    let mut config = load_config(cli.config.as_deref()).context("Failed to load configuration")?;
    let max_round = config.layout.max_round();

    if cli.api.is_some() || cli.legacy {
        if let Some(base) = &cli.api {
            config.api_base = base.clone();
        }
        log::info!("Using legacy backend at {}", config.api_base);
        return Ok((Arc::new(ApiSource::from_config(&config)?), max_round));
    }

    let source = SheetSource::from_config(Arc::new(config))?;
    Ok((Arc::new(source), max_round))
}

fn run(cli: Cli) -> Result<()> {
    let (source, max_round) = build_source(&cli)?;

    if cli.print_url {
        println!("{}", source.page_url(cli.page)?);
        return Ok(());
    }

    if let Some(output_path) = &cli.output {
        let page = source
            .load(cli.page)
            .with_context(|| format!("Failed to load {}", cli.page.label()))?;
        storage::write_markdown(output_path, &page)
            .with_context(|| format!("Failed to write {}", output_path.display()))?;
        println!("Exported to {}", output_path.display());
        return Ok(());
    }

    run_viewer(source, max_round, cli.page)
}

#[cfg(feature = "tui")]
fn run_viewer(source: Arc<dyn PageSource>, max_round: u8, page: PageId) -> Result<()> {
    tui::run(source, max_round, page)?;
    Ok(())
}

#[cfg(not(feature = "tui"))]
fn run_viewer(_source: Arc<dyn PageSource>, _max_round: u8, _page: PageId) -> Result<()> {
    anyhow::bail!("built without the terminal viewer; use --output to export markdown")
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.interactive());

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
