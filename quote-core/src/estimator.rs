//! Selection state controller.
//!
//! [`Estimator`] owns the [`Selection`] for one session and keeps the
//! [`Estimate`] in step with it: every mutation recomputes the estimate before
//! returning, so there is no separate submit step.
//!
//! Identifiers are checked against the catalogs before the selection is
//! touched. An unknown identifier is rejected and the selection is left as it
//! was.

use thiserror::Error;
use tracing::debug;

use crate::calculations::compute_total;
use crate::catalog::{CatalogSet, Variant};
use crate::models::{Estimate, Selection};

/// Errors returned when a mutation names an identifier the catalogs lack.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EstimatorError {
    #[error("unknown project type '{0}'")]
    UnknownProjectType(String),

    #[error("unknown feature '{0}'")]
    UnknownFeature(String),

    #[error("unknown integration '{0}'")]
    UnknownIntegration(String),

    #[error("unknown complexity tier '{0}'")]
    UnknownComplexity(String),

    #[error("unknown timeline tier '{0}'")]
    UnknownTimeline(String),
}

/// The interactive estimator: catalogs, current selection and its estimate.
#[derive(Debug, Clone)]
pub struct Estimator {
    catalogs: CatalogSet,
    selection: Selection,
    estimate: Estimate,
}

impl Estimator {
    /// Creates an estimator with an empty selection.
    pub fn new(catalogs: CatalogSet) -> Self {
        let selection = Selection::new();
        let estimate = compute_total(&selection, &catalogs);
        Self {
            catalogs,
            selection,
            estimate,
        }
    }

    /// Creates an estimator using the built-in catalogs of `variant`.
    pub fn for_variant(variant: Variant) -> Self {
        Self::new(variant.catalogs())
    }

    pub fn catalogs(&self) -> &CatalogSet {
        &self.catalogs
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn estimate(&self) -> &Estimate {
        &self.estimate
    }

    pub fn variant(&self) -> Variant {
        self.catalogs.variant
    }

    /// Replaces the selected project type.
    pub fn select_project_type(
        &mut self,
        id: &str,
    ) -> Result<&Estimate, EstimatorError> {
        if !self.catalogs.project_types.contains(id) {
            return Err(EstimatorError::UnknownProjectType(id.to_string()));
        }
        self.selection.project_type = Some(id.to_string());
        Ok(self.recompute("project_type"))
    }

    /// Adds the feature if absent, removes it if present.
    pub fn toggle_feature(
        &mut self,
        id: &str,
    ) -> Result<&Estimate, EstimatorError> {
        if !self.catalogs.features.contains(id) {
            return Err(EstimatorError::UnknownFeature(id.to_string()));
        }
        flip(&mut self.selection.features, id);
        Ok(self.recompute("features"))
    }

    /// Adds the integration if absent, removes it if present.
    pub fn toggle_integration(
        &mut self,
        id: &str,
    ) -> Result<&Estimate, EstimatorError> {
        if !self.catalogs.integrations.contains(id) {
            return Err(EstimatorError::UnknownIntegration(id.to_string()));
        }
        flip(&mut self.selection.integrations, id);
        Ok(self.recompute("integrations"))
    }

    /// Replaces the selected complexity tier.
    pub fn select_complexity(
        &mut self,
        id: &str,
    ) -> Result<&Estimate, EstimatorError> {
        if !self.catalogs.complexity.contains(id) {
            return Err(EstimatorError::UnknownComplexity(id.to_string()));
        }
        self.selection.complexity = Some(id.to_string());
        Ok(self.recompute("complexity"))
    }

    /// Replaces the selected timeline tier.
    ///
    /// Accepted in every variant; a variant that hides the selector simply
    /// never calls this, leaving the neutral multiplier in place.
    pub fn select_timeline(
        &mut self,
        id: &str,
    ) -> Result<&Estimate, EstimatorError> {
        if !self.catalogs.timeline.contains(id) {
            return Err(EstimatorError::UnknownTimeline(id.to_string()));
        }
        self.selection.timeline = Some(id.to_string());
        Ok(self.recompute("timeline"))
    }

    pub fn set_maintenance(
        &mut self,
        enabled: bool,
    ) -> &Estimate {
        self.selection.maintenance = enabled;
        self.recompute("maintenance")
    }

    /// Sets the page count, clamped to the slider range when the catalogs
    /// price pages.
    pub fn set_pages(
        &mut self,
        pages: u32,
    ) -> &Estimate {
        self.selection.pages = match &self.catalogs.page_pricing {
            Some(pricing) => pricing.clamp(pages),
            None => pages,
        };
        self.recompute("pages")
    }

    /// Returns to the empty selection.
    pub fn reset(&mut self) -> &Estimate {
        self.selection = Selection::new();
        self.recompute("reset")
    }

    /// Applies every choice in `selection`, starting from an empty state.
    ///
    /// Stops at the first unknown identifier; the estimator is then left
    /// empty rather than half-applied.
    pub fn apply(
        &mut self,
        selection: &Selection,
    ) -> Result<&Estimate, EstimatorError> {
        self.reset();
        if let Err(error) = self.try_apply(selection) {
            self.reset();
            return Err(error);
        }
        Ok(&self.estimate)
    }

    fn try_apply(
        &mut self,
        selection: &Selection,
    ) -> Result<(), EstimatorError> {
        if let Some(id) = &selection.project_type {
            self.select_project_type(id)?;
        }
        for id in &selection.features {
            self.toggle_feature(id)?;
        }
        for id in &selection.integrations {
            self.toggle_integration(id)?;
        }
        if let Some(id) = &selection.complexity {
            self.select_complexity(id)?;
        }
        if let Some(id) = &selection.timeline {
            self.select_timeline(id)?;
        }
        self.set_maintenance(selection.maintenance);
        self.set_pages(selection.pages);
        Ok(())
    }

    fn recompute(
        &mut self,
        changed: &'static str,
    ) -> &Estimate {
        self.estimate = compute_total(&self.selection, &self.catalogs);
        debug!(
            changed,
            total = %self.estimate.total,
            ready = self.estimate.ready,
            "estimate recomputed"
        );
        &self.estimate
    }
}

fn flip(
    set: &mut std::collections::BTreeSet<String>,
    id: &str,
) {
    if !set.remove(id) {
        set.insert(id.to_string());
    }
}
