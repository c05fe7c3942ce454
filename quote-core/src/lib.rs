pub mod calculations;
pub mod catalog;
pub mod estimator;
pub mod models;
pub mod quote;

pub use calculations::{PricingEngine, compute_total};
pub use catalog::{Catalog, CatalogSet, PagePricing, ParseVariantError, Variant};
pub use estimator::{Estimator, EstimatorError};
pub use models::*;
pub use quote::{Currency, Quote, QuoteError};
