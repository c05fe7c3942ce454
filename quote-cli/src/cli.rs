use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use quote_core::Variant;

use crate::config::ConfigOverrides;

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Project cost estimator.
///
/// Prices a project from a project type, optional features and integrations,
/// a complexity tier, a delivery timeline and first-year maintenance, and
/// exports the result as a plain-text quote.
#[derive(Debug, Parser)]
#[command(name = "quote-estimator", version, about, long_about = None)]
pub struct Cli {
    /// Calculator variant: `current` or `legacy`.
    #[arg(long, global = true, value_parser = Variant::parse)]
    pub variant: Option<Variant>,

    /// Config file. Defaults to `estimator.toml` in the working directory
    /// when present.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Currency symbol used for totals.
    #[arg(long, global = true)]
    pub currency: Option<String>,

    /// Log filter, e.g. `info` or `quote_core=debug`.
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Append log output to this file.
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Price a single selection given as flags.
    Estimate(EstimateArgs),

    /// Interactive estimator: type commands, see the total update.
    Session,

    /// List every project type, feature, integration and tier.
    Catalog,

    /// Price every row of a CSV file.
    Batch {
        /// CSV file with one selection per row.
        file: PathBuf,
    },
}

#[derive(Debug, Clone, Default, Args)]
pub struct EstimateArgs {
    /// Project type id, e.g. `business`.
    #[arg(long)]
    pub project: Option<String>,

    /// Feature id; repeat for several.
    #[arg(long = "feature")]
    pub features: Vec<String>,

    /// Integration id; repeat for several.
    #[arg(long = "integration")]
    pub integrations: Vec<String>,

    /// Complexity tier id.
    #[arg(long)]
    pub complexity: Option<String>,

    /// Timeline tier id (legacy calculator only).
    #[arg(long)]
    pub timeline: Option<String>,

    /// Include first-year maintenance.
    #[arg(long, default_value_t = false)]
    pub maintenance: bool,

    /// Page count (legacy calculator only).
    #[arg(long)]
    pub pages: Option<u32>,

    /// Export the quote; without a path a timestamped file name is used.
    #[arg(long)]
    pub export: Option<Option<PathBuf>>,
}

impl Cli {
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            variant: self.variant,
            currency_symbol: self.currency.clone(),
            log_level: self.log_level.clone(),
            log_file: self.log_file.clone(),
        }
    }
}
