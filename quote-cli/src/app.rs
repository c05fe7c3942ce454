//! Command implementations shared by the one-shot, batch and session modes.
//!
//! Everything here writes to a caller-supplied `Write`, so the binary passes
//! stdout and tests pass a `Vec<u8>`.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Local;
use quote_core::quote::{default_file_name, format_multiplier};
use quote_core::{
    CatalogSet, Currency, DEFAULT_PAGES, Estimate, Estimator, Quote, Selection, Variant,
};
use rust_decimal::Decimal;
use thiserror::Error;
use tracing::{info, warn};

use crate::cli::EstimateArgs;
use crate::config::AppConfig;
use crate::csv_loader;

/// Shown in place of the summary until a project type is chosen.
pub const SELECT_PROMPT: &str = "Select a project type to see your estimate";

/// A selection uses a control the active calculator does not show.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum NotOfferedError {
    #[error("the {0} calculator has no timeline selector (try --variant legacy)")]
    Timeline(Variant),

    #[error("the {0} calculator does not price pages (try --variant legacy)")]
    Pages(Variant),
}

/// Rejects selections that use the timeline or page controls when the
/// variant hides them.
pub fn ensure_offered(
    variant: Variant,
    selection: &Selection,
) -> Result<(), NotOfferedError> {
    if selection.timeline.is_some() && !variant.offers_timeline() {
        return Err(NotOfferedError::Timeline(variant));
    }
    if selection.pages != DEFAULT_PAGES && !variant.offers_pages() {
        return Err(NotOfferedError::Pages(variant));
    }
    Ok(())
}

// ─── rendering ───────────────────────────────────────────────────────────────

fn summary_line(
    label: impl std::fmt::Display,
    value: impl std::fmt::Display,
) -> String {
    format!("  {:<26}{:>14}", label.to_string(), value.to_string())
}

/// The cost summary panel for the estimator's current state.
pub fn render_summary(
    estimator: &Estimator,
    currency: &Currency,
) -> String {
    let estimate = estimator.estimate();
    if !estimate.ready {
        return format!("Project Estimate\n  {SELECT_PROMPT}\n");
    }

    let b = &estimate.breakdown;
    let mut lines = vec![
        "Project Estimate".to_string(),
        summary_line("Estimated Total Cost", currency.format(estimate.total)),
        String::new(),
        summary_line("Base Project", currency.format(b.base)),
    ];
    if b.feature_count > 0 {
        lines.push(summary_line(
            format!("Features ({})", b.feature_count),
            format!("+{}", currency.format(b.feature_sum)),
        ));
    }
    if b.integration_count > 0 {
        lines.push(summary_line(
            format!("Integrations ({})", b.integration_count),
            format!("+{}", currency.format(b.integration_sum)),
        ));
    }
    if b.extra_pages > 0 {
        lines.push(summary_line(
            format!("Extra Pages ({})", b.extra_pages),
            format!("+{}", currency.format(b.page_cost)),
        ));
    }
    let selection = estimator.selection();
    if selection.complexity.is_some() {
        lines.push(summary_line(
            "Complexity",
            format_multiplier(b.complexity_multiplier),
        ));
    }
    if selection.timeline.is_some() {
        lines.push(summary_line(
            "Timeline",
            format_multiplier(b.timeline_multiplier),
        ));
    }
    if b.maintenance {
        let percent = (estimator.catalogs().maintenance_rate * Decimal::ONE_HUNDRED).normalize();
        lines.push(summary_line("First Year Maintenance", format!("+{percent}%")));
    }
    lines.push(String::new());
    lines.push(
        "  * This is an estimate. Final pricing may vary based on specific requirements."
            .to_string(),
    );

    let mut text = lines.join("\n");
    text.push('\n');
    text
}

/// One-line status printed after every change.
pub fn render_status(
    estimate: &Estimate,
    currency: &Currency,
) -> String {
    if estimate.ready {
        format!("Total: {}", currency.format(estimate.total))
    } else {
        SELECT_PROMPT.to_string()
    }
}

/// Lists every catalog of the set, in display order.
pub fn render_catalog(
    catalogs: &CatalogSet,
    currency: &Currency,
) -> String {
    let variant = catalogs.variant;
    let mut out = format!("Calculator: {variant}\n");

    out.push_str("\nProject types:\n");
    for p in catalogs.project_types.iter() {
        out.push_str(&format!("  {:<12}{:<28}{:>10}\n", p.id, p.name, currency.format(p.price)));
    }
    out.push_str("\nFeatures:\n");
    for f in catalogs.features.iter() {
        let price = format!("+{}", currency.format(f.price));
        out.push_str(&format!("  {:<12}{:<28}{:>10}\n", f.id, f.name, price));
    }
    out.push_str("\nIntegrations:\n");
    for i in catalogs.integrations.iter() {
        let price = format!("+{}", currency.format(i.price));
        out.push_str(&format!("  {:<12}{:<28}{:>10}\n", i.id, i.name, price));
    }
    out.push_str("\nComplexity:\n");
    for t in catalogs.complexity.iter() {
        out.push_str(&format!(
            "  {:<12}{:<28}{:>10}  {}\n",
            t.id,
            t.name,
            format_multiplier(t.multiplier),
            t.description
        ));
    }
    if variant.offers_timeline() {
        out.push_str("\nTimeline:\n");
        for t in catalogs.timeline.iter() {
            out.push_str(&format!(
                "  {:<12}{:<28}{:>10}  {}\n",
                t.id,
                t.name,
                format_multiplier(t.multiplier),
                t.description
            ));
        }
    }
    if let Some(pricing) = &catalogs.page_pricing {
        out.push_str(&format!(
            "\nPages: {}-{}, {} included, +{} per additional page\n",
            pricing.min_pages,
            pricing.max_pages,
            pricing.included_pages,
            currency.format(pricing.price_per_page)
        ));
    }
    let percent = (catalogs.maintenance_rate * Decimal::ONE_HUNDRED).normalize();
    out.push_str(&format!("\nFirst year maintenance: +{percent}% of project cost\n"));
    out
}

// ─── export ──────────────────────────────────────────────────────────────────

/// Where a quote export should land.
///
/// An explicit path wins; otherwise a timestamped name inside the configured
/// output directory (or the working directory).
pub fn resolve_export_path(
    explicit: Option<&Path>,
    config: &AppConfig,
) -> PathBuf {
    match explicit {
        Some(path) => path.to_path_buf(),
        None => {
            let name = default_file_name(Local::now().naive_local());
            match &config.quote.output_dir {
                Some(dir) => dir.join(name),
                None => PathBuf::from(name),
            }
        }
    }
}

/// Writes the estimator's quote and returns the path it was saved to.
pub fn export_quote(
    estimator: &Estimator,
    config: &AppConfig,
    explicit: Option<&Path>,
) -> Result<PathBuf> {
    let path = resolve_export_path(explicit, config);
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create quote directory: {}", dir.display()))?;
    }
    let quote = Quote::from_estimator(estimator, Local::now().date_naive());
    quote.write_to(&path, &config.currency())?;
    Ok(path)
}

// ─── commands ────────────────────────────────────────────────────────────────

impl EstimateArgs {
    /// The selection these flags describe.
    pub fn to_selection(&self) -> Selection {
        let mut selection = Selection::new();
        selection.project_type = self.project.clone();
        selection.features = self.features.iter().cloned().collect();
        selection.integrations = self.integrations.iter().cloned().collect();
        selection.complexity = self.complexity.clone();
        selection.timeline = self.timeline.clone();
        selection.maintenance = self.maintenance;
        if let Some(pages) = self.pages {
            selection.pages = pages;
        }
        selection
    }
}

/// `estimate`: price one selection, print the summary, optionally export.
pub fn run_estimate(
    args: &EstimateArgs,
    config: &AppConfig,
    out: &mut impl Write,
) -> Result<()> {
    let variant = config.calculator.variant;
    let selection = args.to_selection();
    ensure_offered(variant, &selection)?;

    let mut estimator = Estimator::for_variant(variant);
    estimator
        .apply(&selection)
        .context("Invalid selection")?;
    info!(total = %estimator.estimate().total, %variant, "estimate computed");

    let currency = config.currency();
    write!(out, "{}", render_summary(&estimator, &currency))?;

    if let Some(explicit) = &args.export {
        let path = export_quote(&estimator, config, explicit.as_deref())?;
        writeln!(out, "Quote saved to {}", path.display())?;
    }
    Ok(())
}

/// `catalog`: print the active catalogs.
pub fn run_catalog(
    config: &AppConfig,
    out: &mut impl Write,
) -> Result<()> {
    let catalogs = config.calculator.variant.catalogs();
    write!(out, "{}", render_catalog(&catalogs, &config.currency()))?;
    Ok(())
}

/// Outcome of a batch run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub priced: usize,
    pub failed: usize,
}

/// `batch`: price every row of a CSV file.
///
/// Rows naming unknown identifiers are reported and skipped; the rest are
/// still priced.
pub fn run_batch(
    path: &Path,
    config: &AppConfig,
    out: &mut impl Write,
) -> Result<BatchSummary> {
    let rows = csv_loader::load_from_file(path)
        .with_context(|| format!("Failed to load batch file: {}", path.display()))?;
    info!(rows = rows.len(), path = %path.display(), "batch loaded");

    let variant = config.calculator.variant;
    let currency = config.currency();
    let mut estimator = Estimator::for_variant(variant);
    let mut summary = BatchSummary::default();

    for row in &rows {
        let outcome = ensure_offered(variant, &row.selection)
            .map_err(anyhow::Error::from)
            .and_then(|()| {
                estimator
                    .apply(&row.selection)
                    .map(|e| e.total)
                    .map_err(anyhow::Error::from)
            });
        match outcome {
            Ok(total) => {
                summary.priced += 1;
                writeln!(out, "{:<24}{:>14}", row.label, currency.format(total))?;
            }
            Err(error) => {
                summary.failed += 1;
                warn!(label = %row.label, %error, "batch row skipped");
                writeln!(out, "{:<24}  error: {error}", row.label)?;
            }
        }
    }

    writeln!(
        out,
        "{} priced, {} skipped",
        summary.priced, summary.failed
    )?;
    Ok(summary)
}
