//! Read-only price catalogs for the estimator.
//!
//! A [`CatalogSet`] bundles the five lookup tables (project types, features,
//! integrations, complexity tiers, timeline tiers) together with the pricing
//! rules of one calculator [`Variant`]. Entries keep their insertion order,
//! which is the order they are displayed in.

mod current;
mod legacy;

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{AddOn, CatalogItem, ProjectType, Tier};

/// Errors raised when parsing a variant name.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown calculator variant '{0}' (expected 'current' or 'legacy')")]
pub struct ParseVariantError(String);

/// Which generation of the calculator is active.
///
/// `Current` hides the timeline selector and has no page term.
/// `Legacy` is the earlier calculator with its own price list, a visible
/// timeline selector and a page-count slider.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    #[default]
    Current,
    Legacy,
}

impl Variant {
    pub fn all() -> &'static [Variant] {
        &[Variant::Current, Variant::Legacy]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Current => "current",
            Self::Legacy => "legacy",
        }
    }

    pub fn parse(s: &str) -> Result<Self, ParseVariantError> {
        match s.trim().to_ascii_lowercase().as_str() {
            "current" => Ok(Self::Current),
            "legacy" => Ok(Self::Legacy),
            _ => Err(ParseVariantError(s.to_string())),
        }
    }

    /// Whether the timeline selector is shown to the user.
    pub fn offers_timeline(&self) -> bool {
        matches!(self, Self::Legacy)
    }

    /// Whether the page-count slider is shown to the user.
    pub fn offers_pages(&self) -> bool {
        matches!(self, Self::Legacy)
    }

    /// The built-in catalog set for this variant.
    pub fn catalogs(&self) -> CatalogSet {
        match self {
            Self::Current => current::catalog_set(),
            Self::Legacy => legacy::catalog_set(),
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An ordered lookup table keyed by entry identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Catalog<T> {
    entries: Vec<T>,
}

impl<T: CatalogItem> Catalog<T> {
    pub fn get(
        &self,
        id: &str,
    ) -> Option<&T> {
        self.entries.iter().find(|e| e.id() == id)
    }

    pub fn contains(
        &self,
        id: &str,
    ) -> bool {
        self.get(id).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.entries.iter()
    }

    /// Display names of the entries whose id is in `ids`, in catalog order.
    /// Ids with no matching entry are skipped.
    pub fn names_of<'a, I>(
        &'a self,
        ids: I,
    ) -> Vec<&'a str>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let wanted: Vec<I::Item> = ids.into_iter().collect();
        self.entries
            .iter()
            .filter(|e| wanted.iter().any(|id| id.as_ref() == e.id()))
            .map(|e| e.name())
            .collect()
    }
}

/// Price rule for the legacy page-count slider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PagePricing {
    /// Pages covered by the base price.
    pub included_pages: u32,
    pub price_per_page: Decimal,
    pub min_pages: u32,
    pub max_pages: u32,
}

impl PagePricing {
    /// Restricts `pages` to the slider range.
    pub fn clamp(
        &self,
        pages: u32,
    ) -> u32 {
        pages.clamp(self.min_pages, self.max_pages)
    }

    /// Pages beyond the included allowance.
    pub fn extra_pages(
        &self,
        pages: u32,
    ) -> u32 {
        pages.saturating_sub(self.included_pages)
    }
}

/// Every catalog and pricing rule of one calculator variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogSet {
    pub variant: Variant,
    pub project_types: Catalog<ProjectType>,
    pub features: Catalog<AddOn>,
    pub integrations: Catalog<AddOn>,
    pub complexity: Catalog<Tier>,
    pub timeline: Catalog<Tier>,
    /// `None` when pages do not contribute to the price.
    pub page_pricing: Option<PagePricing>,
    /// Fraction of the subtotal added for first-year maintenance.
    pub maintenance_rate: Decimal,
}

impl Default for CatalogSet {
    fn default() -> Self {
        Variant::default().catalogs()
    }
}

// Built-in tables are literals with unique ids; constructing them directly
// skips the duplicate scan.
fn table<T>(entries: Vec<T>) -> Catalog<T> {
    Catalog { entries }
}

fn project(
    id: &'static str,
    name: &'static str,
    price: i64,
) -> ProjectType {
    ProjectType {
        id,
        name,
        price: Decimal::new(price, 0),
    }
}

fn add_on(
    id: &'static str,
    name: &'static str,
    price: i64,
) -> AddOn {
    AddOn {
        id,
        name,
        price: Decimal::new(price, 0),
    }
}

/// `multiplier_tenths` is the multiplier scaled by 10 (13 => ×1.3).
fn tier(
    id: &'static str,
    name: &'static str,
    description: &'static str,
    multiplier_tenths: i64,
) -> Tier {
    Tier {
        id,
        name,
        description,
        multiplier: Decimal::new(multiplier_tenths, 1),
    }
}

/// Complexity tiers shared by both variants.
fn complexity_tiers() -> Catalog<Tier> {
    table(vec![
        tier("simple", "Simple", "Basic functionality", 10),
        tier("moderate", "Moderate", "Standard features", 13),
        tier("complex", "Complex", "Advanced functionality", 16),
        tier("enterprise", "Enterprise", "Full-scale solution", 20),
    ])
}

/// Timeline tiers shared by both variants.
fn timeline_tiers() -> Catalog<Tier> {
    table(vec![
        tier("standard", "3-6 months", "Standard timeline", 10),
        tier("fast", "1-3 months", "Fast delivery", 14),
        tier("rush", "Under 1 month", "Rush delivery", 18),
    ])
}
