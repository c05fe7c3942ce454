use std::io;

use anyhow::Context;
use clap::Parser;
use tracing::debug;

use quote_cli::cli::{Cli, Command};
use quote_cli::{AppConfig, Session, app, logging};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let cwd = std::env::current_dir().context("Failed to read working directory")?;
    let mut config = AppConfig::load_or_default(cli.config.as_deref(), &cwd)?;
    config.apply_overrides(cli.overrides());

    logging::init_logging(&config.logging.level);
    if let Some(path) = &config.logging.file {
        logging::enable_file_logging(path)?;
    }
    debug!(variant = %config.calculator.variant, "configuration loaded");

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match &cli.command {
        Command::Estimate(args) => app::run_estimate(args, &config, &mut out),
        Command::Session => {
            let stdin = io::stdin();
            Session::new(&config).run(stdin.lock(), &mut out)
        }
        Command::Catalog => app::run_catalog(&config, &mut out),
        Command::Batch { file } => app::run_batch(file, &config, &mut out).map(|_| ()),
    }
}
