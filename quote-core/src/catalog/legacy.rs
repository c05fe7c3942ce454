//! Price list of the earlier calculator, which also priced extra pages.

use rust_decimal::Decimal;

use super::{
    CatalogSet, PagePricing, Variant, add_on, complexity_tiers, project, table, timeline_tiers,
};

pub(super) fn catalog_set() -> CatalogSet {
    CatalogSet {
        variant: Variant::Legacy,
        project_types: table(vec![
            project("landing", "Landing Page", 2500),
            project("business", "Business Website", 5000),
            project("ecommerce", "E-commerce Store", 8000),
            project("webapp", "Web Application", 12000),
            project("mobile", "Mobile App", 15000),
            project("custom", "Custom Software", 20000),
        ]),
        features: table(vec![
            add_on("cms", "Content Management System", 1500),
            add_on("auth", "User Authentication", 1200),
            add_on("payment", "Payment Gateway", 2000),
            add_on("analytics", "Analytics Dashboard", 1800),
            add_on("api", "API Integration", 1000),
            add_on("seo", "SEO Optimization", 800),
            add_on("multilang", "Multi-language Support", 1500),
            add_on("chat", "Live Chat Support", 600),
        ]),
        integrations: table(vec![
            add_on("crm", "CRM Integration", 1200),
            add_on("erp", "ERP System", 2500),
            add_on("social", "Social Media APIs", 600),
            add_on("email", "Email Marketing", 800),
            add_on("cloud", "Cloud Storage", 1000),
        ]),
        complexity: complexity_tiers(),
        timeline: timeline_tiers(),
        page_pricing: Some(PagePricing {
            included_pages: 5,
            price_per_page: Decimal::new(200, 0),
            min_pages: 1,
            max_pages: 50,
        }),
        maintenance_rate: Decimal::new(2, 1),
    }
}
