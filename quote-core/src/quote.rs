//! Plain-text quote export.
//!
//! A [`Quote`] is the current selection resolved to display names plus the
//! computed total. It renders to a fixed-order text document that can be
//! written to a `.txt` file.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::catalog::{Catalog, Variant};
use crate::estimator::Estimator;
use crate::models::Tier;

/// Placeholder for a missing project type.
pub const NOT_SELECTED: &str = "Not selected";

/// Placeholder for an optional tier nobody picked.
pub const NOT_SPECIFIED: &str = "Not specified";

/// Placeholder for an empty multi-choice field.
pub const NONE: &str = "None";

const DISCLAIMER: &str =
    "* This is an estimate. Final pricing may vary based on specific requirements.";

/// Errors that can occur while saving a quote.
#[derive(Debug, Error)]
pub enum QuoteError {
    #[error("cannot write quote to '{}': {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// How monetary amounts are displayed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Currency {
    pub symbol: String,
    pub grouping_separator: char,
}

impl Default for Currency {
    fn default() -> Self {
        Self {
            symbol: "$".to_string(),
            grouping_separator: ',',
        }
    }
}

impl Currency {
    pub fn new(
        symbol: impl Into<String>,
        grouping_separator: char,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            grouping_separator,
        }
    }

    /// Formats `amount` with the currency symbol and thousands grouping.
    ///
    /// ```
    /// use rust_decimal_macros::dec;
    /// use quote_core::Currency;
    ///
    /// assert_eq!(Currency::default().format(dec!(10198)), "$10,198");
    /// assert_eq!(Currency::new("€", '.').format(dec!(1234567)), "€1.234.567");
    /// ```
    pub fn format(
        &self,
        amount: Decimal,
    ) -> String {
        let normalized = amount.normalize();
        let sign = if normalized.is_sign_negative() && !normalized.is_zero() {
            "-"
        } else {
            ""
        };
        let digits = normalized.abs().to_string();
        let (whole, fraction) = match digits.split_once('.') {
            Some((whole, fraction)) => (whole, Some(fraction)),
            None => (digits.as_str(), None),
        };

        let mut out = format!(
            "{sign}{}{}",
            self.symbol,
            group_digits(whole, self.grouping_separator)
        );
        if let Some(fraction) = fraction {
            out.push('.');
            out.push_str(fraction);
        }
        out
    }
}

fn group_digits(
    digits: &str,
    separator: char,
) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (len - idx) % 3 == 0 {
            out.push(separator);
        }
        out.push(ch);
    }
    out
}

/// Formats a tier multiplier for display, e.g. `×1.3`.
pub fn format_multiplier(multiplier: Decimal) -> String {
    format!("×{}", multiplier.normalize())
}

/// The current selection resolved to display names, with its total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    pub variant: Variant,
    pub generated_on: NaiveDate,
    pub project_type: Option<String>,
    pub features: Vec<String>,
    pub integrations: Vec<String>,
    pub complexity: Option<String>,
    pub timeline: Option<String>,
    pub maintenance: bool,
    /// Present only for variants that price pages.
    pub pages: Option<u32>,
    pub total: Decimal,
}

impl Quote {
    /// Resolves the estimator's current selection against its catalogs.
    pub fn from_estimator(
        estimator: &Estimator,
        generated_on: NaiveDate,
    ) -> Self {
        let catalogs = estimator.catalogs();
        let selection = estimator.selection();

        Self {
            variant: catalogs.variant,
            generated_on,
            project_type: selection
                .project_type
                .as_deref()
                .and_then(|id| catalogs.project_types.get(id))
                .map(|p| p.name.to_string()),
            features: owned(catalogs.features.names_of(&selection.features)),
            integrations: owned(catalogs.integrations.names_of(&selection.integrations)),
            complexity: tier_name(&catalogs.complexity, selection.complexity.as_deref()),
            timeline: tier_name(&catalogs.timeline, selection.timeline.as_deref()),
            maintenance: selection.maintenance,
            pages: catalogs.page_pricing.map(|_| selection.pages),
            total: estimator.estimate().total,
        }
    }

    /// Renders the quote as a plain-text document.
    pub fn render(
        &self,
        currency: &Currency,
    ) -> String {
        let mut lines = vec![
            "Project Cost Estimate".to_string(),
            format!("Generated: {}", self.generated_on.format("%Y-%m-%d")),
            format!("Calculator: {}", self.variant),
            String::new(),
            format!(
                "Project Type: {}",
                self.project_type.as_deref().unwrap_or(NOT_SELECTED)
            ),
            format!("Features: {}", join_or_none(&self.features)),
            format!("Integrations: {}", join_or_none(&self.integrations)),
            format!(
                "Complexity: {}",
                self.complexity.as_deref().unwrap_or(NOT_SPECIFIED)
            ),
            format!(
                "Timeline: {}",
                self.timeline.as_deref().unwrap_or(NOT_SPECIFIED)
            ),
            format!(
                "Maintenance: {}",
                if self.maintenance { "Yes" } else { "No" }
            ),
        ];
        if let Some(pages) = self.pages {
            lines.push(format!("Pages: {pages}"));
        }
        lines.push(format!("Estimated Total: {}", currency.format(self.total)));
        lines.push(String::new());
        lines.push(DISCLAIMER.to_string());

        let mut text = lines.join("\n");
        text.push('\n');
        text
    }

    /// Renders the quote and writes it to `path`, replacing any existing file.
    pub fn write_to(
        &self,
        path: &Path,
        currency: &Currency,
    ) -> Result<(), QuoteError> {
        fs::write(path, self.render(currency)).map_err(|source| QuoteError::Write {
            path: path.to_path_buf(),
            source,
        })?;
        info!(path = %path.display(), total = %self.total, "quote exported");
        Ok(())
    }
}

/// File name offered for a quote exported at `at`.
pub fn default_file_name(at: NaiveDateTime) -> String {
    format!("project-quote-{}.txt", at.format("%Y%m%d-%H%M%S"))
}

fn owned(names: Vec<&str>) -> Vec<String> {
    names.into_iter().map(str::to_string).collect()
}

fn tier_name(
    catalog: &Catalog<Tier>,
    id: Option<&str>,
) -> Option<String> {
    id.and_then(|id| catalog.get(id)).map(|t| t.name.to_string())
}

fn join_or_none(names: &[String]) -> String {
    if names.is_empty() {
        NONE.to_string()
    } else {
        names.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 15).unwrap()
    }

    fn business_with_auth() -> Estimator {
        let mut estimator = Estimator::for_variant(Variant::Current);
        estimator.select_project_type("business").unwrap();
        estimator.toggle_feature("auth").unwrap();
        estimator.select_complexity("simple").unwrap();
        estimator
    }

    // =========================================================================
    // Currency tests
    // =========================================================================

    #[test]
    fn format_groups_thousands() {
        let currency = Currency::default();

        assert_eq!(currency.format(dec!(0)), "$0");
        assert_eq!(currency.format(dec!(999)), "$999");
        assert_eq!(currency.format(dec!(8498)), "$8,498");
        assert_eq!(currency.format(dec!(1234567)), "$1,234,567");
    }

    #[test]
    fn format_keeps_fraction_digits() {
        assert_eq!(Currency::default().format(dec!(1234.50)), "$1,234.5");
    }

    #[test]
    fn format_uses_configured_symbol_and_separator() {
        let currency = Currency::new("₹", ' ');

        assert_eq!(currency.format(dec!(34999)), "₹34 999");
    }

    #[test]
    fn format_multiplier_drops_trailing_zeros() {
        assert_eq!(format_multiplier(dec!(2.0)), "×2");
        assert_eq!(format_multiplier(dec!(1.30)), "×1.3");
    }

    // =========================================================================
    // Quote tests
    // =========================================================================

    #[test]
    fn quote_resolves_names() {
        let quote = Quote::from_estimator(&business_with_auth(), date());

        assert_eq!(quote.project_type.as_deref(), Some("Business Website"));
        assert_eq!(quote.features, vec!["User Authentication".to_string()]);
        assert!(quote.integrations.is_empty());
        assert_eq!(quote.complexity.as_deref(), Some("Simple"));
        assert_eq!(quote.timeline, None);
        assert_eq!(quote.pages, None);
        assert_eq!(quote.total, dec!(8498));
    }

    #[test]
    fn render_contains_expected_sections() {
        let text = Quote::from_estimator(&business_with_auth(), date()).render(&Currency::default());

        assert!(text.contains("Project Type: Business Website"));
        assert!(text.contains("Features: User Authentication"));
        assert!(text.contains("Integrations: None"));
        assert!(text.contains("Complexity: Simple"));
        assert!(text.contains("Timeline: Not specified"));
        assert!(text.contains("Maintenance: No"));
        assert!(text.contains("Estimated Total: $8,498"));
        assert!(text.contains("Generated: 2026-10-15"));
        assert!(!text.contains("Pages:"));
    }

    #[test]
    fn render_keeps_fixed_section_order() {
        let text = Quote::from_estimator(&business_with_auth(), date()).render(&Currency::default());
        let position = |needle: &str| text.find(needle).unwrap();

        assert!(position("Project Type:") < position("Features:"));
        assert!(position("Features:") < position("Integrations:"));
        assert!(position("Integrations:") < position("Complexity:"));
        assert!(position("Complexity:") < position("Timeline:"));
        assert!(position("Timeline:") < position("Maintenance:"));
        assert!(position("Maintenance:") < position("Estimated Total:"));
    }

    #[test]
    fn render_joins_multiple_names_in_catalog_order() {
        let mut estimator = business_with_auth();
        estimator.toggle_feature("seo").unwrap();
        estimator.toggle_feature("cms").unwrap();
        estimator.toggle_integration("email").unwrap();
        estimator.toggle_integration("crm").unwrap();
        estimator.set_maintenance(true);

        let text = Quote::from_estimator(&estimator, date()).render(&Currency::default());

        assert!(text.contains(
            "Features: Content Management System, User Authentication, SEO Optimization"
        ));
        assert!(text.contains("Integrations: CRM Integration, Email Marketing"));
        assert!(text.contains("Maintenance: Yes"));
    }

    #[test]
    fn render_empty_selection_uses_placeholders() {
        let estimator = Estimator::for_variant(Variant::Current);

        let text = Quote::from_estimator(&estimator, date()).render(&Currency::default());

        assert!(text.contains("Project Type: Not selected"));
        assert!(text.contains("Features: None"));
        assert!(text.contains("Complexity: Not specified"));
        assert!(text.contains("Timeline: Not specified"));
        assert!(text.contains("Estimated Total: $0"));
    }

    #[test]
    fn legacy_quote_lists_pages() {
        let mut estimator = Estimator::for_variant(Variant::Legacy);
        estimator.select_project_type("landing").unwrap();
        estimator.set_pages(12);
        estimator.select_timeline("rush").unwrap();

        let text = Quote::from_estimator(&estimator, date()).render(&Currency::default());

        assert!(text.contains("Pages: 12"));
        assert!(text.contains("Timeline: Under 1 month"));
        assert!(text.contains("Calculator: legacy"));
    }

    #[test]
    fn write_to_saves_rendered_text() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quote.txt");
        let quote = Quote::from_estimator(&business_with_auth(), date());

        quote.write_to(&path, &Currency::default()).unwrap();

        let saved = std::fs::read_to_string(&path).unwrap();
        assert_eq!(saved, quote.render(&Currency::default()));
    }

    #[test]
    fn write_to_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("quote.txt");
        let quote = Quote::from_estimator(&business_with_auth(), date());

        let result = quote.write_to(&path, &Currency::default());

        assert!(matches!(result, Err(QuoteError::Write { .. })));
    }

    #[test]
    fn default_file_name_uses_timestamp() {
        let at = date().and_hms_opt(9, 5, 7).unwrap();

        assert_eq!(default_file_name(at), "project-quote-20261015-090507.txt");
    }
}
