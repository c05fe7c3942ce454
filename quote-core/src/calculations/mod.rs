//! Cost calculations for the project estimator.
//!
//! The pricing engine is a pure function of a [`Selection`](crate::Selection)
//! and a [`CatalogSet`](crate::catalog::CatalogSet); it never fails.

pub mod common;
pub mod pricing;

pub use pricing::{PricingEngine, compute_total};
