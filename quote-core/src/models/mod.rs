mod catalog_entry;
mod estimate;
mod selection;

pub use catalog_entry::{AddOn, CatalogItem, ProjectType, Tier};
pub use estimate::{Estimate, EstimateBreakdown};
pub use selection::{DEFAULT_PAGES, Selection};
