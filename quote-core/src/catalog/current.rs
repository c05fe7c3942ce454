//! Price list of the current calculator.

use rust_decimal::Decimal;

use super::{CatalogSet, Variant, add_on, complexity_tiers, project, table, timeline_tiers};

pub(super) fn catalog_set() -> CatalogSet {
    CatalogSet {
        variant: Variant::Current,
        project_types: table(vec![
            project("landing", "Landing Page", 2999),
            project("business", "Business Website", 6999),
            project("ecommerce", "E-commerce Store", 11999),
            project("webapp", "Web Application", 17999),
            project("mobile", "Mobile App", 24999),
            project("custom", "Custom Software", 34999),
        ]),
        features: table(vec![
            add_on("cms", "Content Management System", 1999),
            add_on("auth", "User Authentication", 1499),
            add_on("payment", "Payment Gateway", 2499),
            add_on("analytics", "Analytics Dashboard", 2199),
            add_on("api", "API Integration", 1299),
            add_on("seo", "SEO Optimization", 999),
            add_on("multilang", "Multi-language Support", 1799),
            add_on("chat", "Live Chat Support", 799),
        ]),
        integrations: table(vec![
            add_on("crm", "CRM Integration", 1499),
            add_on("erp", "ERP System", 2999),
            add_on("social", "Social Media APIs", 799),
            add_on("email", "Email Marketing", 999),
            add_on("cloud", "Cloud Storage", 1299),
        ]),
        complexity: complexity_tiers(),
        timeline: timeline_tiers(),
        page_pricing: None,
        maintenance_rate: Decimal::new(2, 1),
    }
}
