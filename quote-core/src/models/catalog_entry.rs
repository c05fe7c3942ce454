use rust_decimal::Decimal;
use serde::Serialize;

/// Common view over every kind of catalog entry.
pub trait CatalogItem {
    fn id(&self) -> &str;
    fn name(&self) -> &str;
}

/// A kind of project with its base price in whole currency units.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectType {
    pub id: &'static str,
    pub name: &'static str,
    pub price: Decimal,
}

/// A flat-priced add-on. Used for both features and integrations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AddOn {
    pub id: &'static str,
    pub name: &'static str,
    pub price: Decimal,
}

/// A complexity or timeline option that scales the subtotal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tier {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub multiplier: Decimal,
}

impl CatalogItem for ProjectType {
    fn id(&self) -> &str {
        self.id
    }

    fn name(&self) -> &str {
        self.name
    }
}

impl CatalogItem for AddOn {
    fn id(&self) -> &str {
        self.id
    }

    fn name(&self) -> &str {
        self.name
    }
}

impl CatalogItem for Tier {
    fn id(&self) -> &str {
        self.id
    }

    fn name(&self) -> &str {
        self.name
    }
}
