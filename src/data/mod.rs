//! Embedded demo catalog, the stand-in for a real catalog provider.

use crate::domain::Product;
use crate::error::CatalogError;

const PRODUCTS_JSON: &str = include_str!("../../data/products.json");

/// Parses the embedded product document. Document order is the catalog
/// display order.
pub fn demo_catalog() -> Result<Vec<Product>, CatalogError> {
    serde_json::from_str(PRODUCTS_JSON).map_err(|e| CatalogError::Malformed(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Category;

    #[test]
    fn embedded_catalog_parses() {
        let products = demo_catalog().unwrap();
        assert_eq!(products.len(), 8);
        assert_eq!(products[0].name, "Aurora Wireless Headphones");
        assert_eq!(products[0].original_price, Some(249.99));
        assert_eq!(products[5].category, Category::Clothing);
        assert!(!products[5].in_stock);
    }

    #[test]
    fn discounts_never_undercut_the_price() {
        for product in demo_catalog().unwrap() {
            if let Some(original) = product.original_price {
                assert!(original >= product.price, "{} is discounted upwards", product.id);
            }
        }
    }
}
