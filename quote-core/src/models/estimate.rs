use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The computed result for one selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Estimate {
    /// Total in whole currency units, never negative.
    pub total: Decimal,

    /// True once a project type is chosen and the total is positive.
    pub ready: bool,

    /// The intermediate values the total was built from.
    pub breakdown: EstimateBreakdown,
}

/// Intermediate values of a pricing run, for cost-summary display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EstimateBreakdown {
    pub base: Decimal,
    pub feature_sum: Decimal,
    pub feature_count: usize,
    pub integration_sum: Decimal,
    pub integration_count: usize,
    pub extra_pages: u32,
    pub page_cost: Decimal,
    pub complexity_multiplier: Decimal,
    pub timeline_multiplier: Decimal,
    /// Subtotal after multipliers and before the maintenance surcharge.
    pub subtotal: Decimal,
    pub maintenance: bool,
}

impl Default for EstimateBreakdown {
    fn default() -> Self {
        Self {
            base: Decimal::ZERO,
            feature_sum: Decimal::ZERO,
            feature_count: 0,
            integration_sum: Decimal::ZERO,
            integration_count: 0,
            extra_pages: 0,
            page_cost: Decimal::ZERO,
            complexity_multiplier: Decimal::ONE,
            timeline_multiplier: Decimal::ONE,
            subtotal: Decimal::ZERO,
            maintenance: false,
        }
    }
}

impl Default for Estimate {
    fn default() -> Self {
        Self {
            total: Decimal::ZERO,
            ready: false,
            breakdown: EstimateBreakdown::default(),
        }
    }
}
