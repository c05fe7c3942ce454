//! Project cost estimation.
//!
//! Maps a [`Selection`] to a single total in whole currency units.
//!
//! # Formula
//!
//! | Step | Description |
//! |------|-------------|
//! | 1    | Base price of the selected project type (0 if none) |
//! | 2    | Sum of selected feature prices |
//! | 3    | Sum of selected integration prices |
//! | 4    | Extra pages × price per page (variants with page pricing only) |
//! | 5    | Complexity multiplier (1 if none) |
//! | 6    | Timeline multiplier (1 if none, or not offered) |
//! | 7    | Subtotal = (1 + 2 + 3 + 4) × 5 × 6 |
//! | 8    | Maintenance surcharge: subtotal × rate, added once |
//! | 9    | Total = subtotal rounded half-up to a whole unit |
//!
//! Rounding happens exactly once, at step 9.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use quote_core::{Selection, Variant, compute_total};
//!
//! let catalogs = Variant::Current.catalogs();
//! let mut selection = Selection::new();
//! selection.project_type = Some("business".to_string());
//! selection.features.insert("auth".to_string());
//! selection.complexity = Some("simple".to_string());
//!
//! let estimate = compute_total(&selection, &catalogs);
//! assert_eq!(estimate.total, dec!(8498));
//! assert!(estimate.ready);
//! ```

use rust_decimal::Decimal;

use crate::calculations::common::{max, round_to_whole};
use crate::catalog::{Catalog, CatalogSet};
use crate::models::{AddOn, Estimate, EstimateBreakdown, Selection, Tier};

/// Computes the estimate for `selection` against `catalogs`.
pub fn compute_total(
    selection: &Selection,
    catalogs: &CatalogSet,
) -> Estimate {
    PricingEngine::new(catalogs).calculate(selection)
}

/// Calculator bound to one catalog set.
#[derive(Debug, Clone, Copy)]
pub struct PricingEngine<'a> {
    catalogs: &'a CatalogSet,
}

impl<'a> PricingEngine<'a> {
    pub fn new(catalogs: &'a CatalogSet) -> Self {
        Self { catalogs }
    }

    /// Runs every step of the formula and returns the estimate.
    ///
    /// Missing selections contribute zero (prices) or one (multipliers).
    pub fn calculate(
        &self,
        selection: &Selection,
    ) -> Estimate {
        let base = self.base_price(selection.project_type.as_deref());
        let feature_sum = self.add_on_sum(&self.catalogs.features, &selection.features);
        let integration_sum =
            self.add_on_sum(&self.catalogs.integrations, &selection.integrations);
        let (extra_pages, page_cost) = self.page_cost(selection.pages);

        let complexity_multiplier =
            self.multiplier(&self.catalogs.complexity, selection.complexity.as_deref());
        let timeline_multiplier =
            self.multiplier(&self.catalogs.timeline, selection.timeline.as_deref());

        let subtotal = self.subtotal(
            base + feature_sum + integration_sum + page_cost,
            complexity_multiplier,
            timeline_multiplier,
        );
        let with_maintenance = self.apply_maintenance(subtotal, selection.maintenance);

        let total = max(round_to_whole(with_maintenance), Decimal::ZERO);
        let ready = total > Decimal::ZERO && selection.project_type.is_some();

        Estimate {
            total,
            ready,
            breakdown: EstimateBreakdown {
                base,
                feature_sum,
                feature_count: self.known_count(&self.catalogs.features, &selection.features),
                integration_sum,
                integration_count: self
                    .known_count(&self.catalogs.integrations, &selection.integrations),
                extra_pages,
                page_cost,
                complexity_multiplier,
                timeline_multiplier,
                subtotal,
                maintenance: selection.maintenance,
            },
        }
    }

    /// Price of the selected project type.
    fn base_price(
        &self,
        project_type: Option<&str>,
    ) -> Decimal {
        project_type
            .and_then(|id| self.catalogs.project_types.get(id))
            .map_or(Decimal::ZERO, |p| p.price)
    }

    /// Sum of add-on prices; ids missing from the catalog contribute zero.
    fn add_on_sum<'s>(
        &self,
        catalog: &Catalog<AddOn>,
        ids: impl IntoIterator<Item = &'s String>,
    ) -> Decimal {
        ids.into_iter()
            .filter_map(|id| catalog.get(id))
            .map(|a| a.price)
            .sum()
    }

    fn known_count<'s>(
        &self,
        catalog: &Catalog<AddOn>,
        ids: impl IntoIterator<Item = &'s String>,
    ) -> usize {
        ids.into_iter().filter(|id| catalog.contains(id)).count()
    }

    /// Extra pages and their cost. Zero when the variant has no page pricing.
    fn page_cost(
        &self,
        pages: u32,
    ) -> (u32, Decimal) {
        match &self.catalogs.page_pricing {
            Some(pricing) => {
                let extra = pricing.extra_pages(pricing.clamp(pages));
                (extra, Decimal::from(extra) * pricing.price_per_page)
            }
            None => (0, Decimal::ZERO),
        }
    }

    /// Multiplier of the selected tier, or one when nothing is selected.
    fn multiplier(
        &self,
        catalog: &Catalog<Tier>,
        id: Option<&str>,
    ) -> Decimal {
        id.and_then(|id| catalog.get(id))
            .map_or(Decimal::ONE, |t| t.multiplier)
    }

    fn subtotal(
        &self,
        sum: Decimal,
        complexity_multiplier: Decimal,
        timeline_multiplier: Decimal,
    ) -> Decimal {
        sum * complexity_multiplier * timeline_multiplier
    }

    /// Adds the maintenance surcharge once, on the already multiplied subtotal.
    fn apply_maintenance(
        &self,
        subtotal: Decimal,
        maintenance: bool,
    ) -> Decimal {
        if maintenance {
            subtotal + subtotal * self.catalogs.maintenance_rate
        } else {
            subtotal
        }
    }
}
