use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Page count a fresh selection starts with.
pub const DEFAULT_PAGES: u32 = 5;

/// The user's current choices across all catalogs.
///
/// Only identifiers are stored here; prices and names are resolved against
/// the active [`CatalogSet`](crate::catalog::CatalogSet) when an estimate
/// or quote is produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub project_type: Option<String>,
    pub features: BTreeSet<String>,
    pub integrations: BTreeSet<String>,
    pub complexity: Option<String>,
    pub timeline: Option<String>,
    pub maintenance: bool,
    /// Only priced by catalog sets that define page pricing.
    pub pages: u32,
}

impl Default for Selection {
    fn default() -> Self {
        Self {
            project_type: None,
            features: BTreeSet::new(),
            integrations: BTreeSet::new(),
            complexity: None,
            timeline: None,
            maintenance: false,
            pages: DEFAULT_PAGES,
        }
    }
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
