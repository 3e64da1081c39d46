//! Fixed product catalog.
//!
//! Every inventory row names a product by SKU; the catalog resolves that SKU
//! to a display name and the unit stock is counted in. The table is static
//! and indexed once on first use.

use serde::Serialize;
use std::collections::HashMap;
use std::sync::OnceLock;

use crate::error::ModelError;

/// A product the warehouse stocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProductEntry {
    /// Stock keeping unit (unique).
    pub sku: &'static str,
    /// Product display name.
    #[serde(rename = "productName")]
    pub product_name: &'static str,
    /// Unit of measure.
    pub unit: &'static str,
}

const fn entry(sku: &'static str, product_name: &'static str, unit: &'static str) -> ProductEntry {
    ProductEntry {
        sku,
        product_name,
        unit,
    }
}

/// Catalog rows in display order (alphabetical by product name).
const PRODUCTS: [ProductEntry; 30] = [
    entry("66BI8PMZ", "Ai Yu Jelly", "carton"),
    entry("47LS3QEJ", "Almond Jelly", "carton"),
    entry("21TZ4RWZ", "Almond Milk Tea", "box"),
    entry("92JD1VKP", "Aloe", "carton"),
    entry("81LN5TUG", "Black Tea", "box"),
    entry("87OQ4BZR", "Boba", "carton"),
    entry("01XM0TPK", "Chai Tea", "box"),
    entry("35WC3SHH", "Coconut Jelly", "carton"),
    entry("28OC1KQP", "Coffee Jelly", "carton"),
    entry("14RJ1RKR", "Egg Pudding", "carton"),
    entry("39RS4OCT", "Grass Jelly", "carton"),
    entry("65SH4FGF", "Honey Milk Tea", "box"),
    entry("09VI7CCV", "Honeydew Tea", "box"),
    entry("22BC8VMW", "Jasmine Green Tea", "box"),
    entry("84QZ3GVS", "Kiwi Tea", "box"),
    entry("69IO7VUW", "Lychee Tea", "box"),
    entry("51KT1PSU", "Mango Tea", "box"),
    entry("53HA4DWH", "Matcha Tea", "box"),
    entry("52KN0DZE", "Milk Tea", "box"),
    entry("30SU8TVC", "Mint Tea", "box"),
    entry("01UG9SDM", "Mochi", "carton"),
    entry("15DB9AGF", "Oolong Tea", "box"),
    entry("17GX0VAR", "Passion Fruit Tea", "box"),
    entry("69DI1HCU", "Peach Tea", "box"),
    entry("45NF0QOB", "Popping Boba", "carton"),
    entry("91WM3ILX", "Red Bean", "carton"),
    entry("79FW3YBZ", "Roasted Brown Sugar Tea", "box"),
    entry("22KQ4DTO", "Rose Tea", "box"),
    entry("20PV6SQJ", "Taro Tea", "box"),
    entry("56VI2RWA", "Thai Tea", "box"),
];

/// Immutable SKU index over the product table.
#[derive(Debug)]
pub struct ProductCatalog {
    by_sku: HashMap<&'static str, &'static ProductEntry>,
}

impl ProductCatalog {
    fn build() -> Self {
        let by_sku = PRODUCTS.iter().map(|p| (p.sku, p)).collect();
        Self { by_sku }
    }

    /// The process-wide catalog, built on first access.
    pub fn global() -> &'static ProductCatalog {
        static CATALOG: OnceLock<ProductCatalog> = OnceLock::new();
        CATALOG.get_or_init(Self::build)
    }

    /// Resolve a SKU to `(product name, unit)`.
    pub fn lookup(&self, sku: &str) -> Result<(&'static str, &'static str), ModelError> {
        self.get(sku)
            .map(|p| (p.product_name, p.unit))
            .ok_or_else(|| ModelError::UnknownSku(sku.to_string()))
    }

    /// Get the full catalog entry for a SKU.
    pub fn get(&self, sku: &str) -> Option<&'static ProductEntry> {
        self.by_sku.get(sku).copied()
    }

    /// Check whether a SKU is in the catalog.
    pub fn contains(&self, sku: &str) -> bool {
        self.by_sku.contains_key(sku)
    }

    /// All entries, in display order.
    pub fn entries(&self) -> &'static [ProductEntry] {
        &PRODUCTS
    }

    /// Number of products.
    pub fn len(&self) -> usize {
        self.by_sku.len()
    }

    /// Whether the catalog has no products.
    pub fn is_empty(&self) -> bool {
        self.by_sku.is_empty()
    }
}
