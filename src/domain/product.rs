use serde::{Deserialize, Serialize};

/// Product category. The catalog carries a fixed set of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Electronics,
    Clothing,
    Shoes,
}

/// Category selector for browsing. `All` disables category matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

/// A purchasable product. Immutable once loaded; owned by the catalog.
///
/// # Notes
/// `original_price`, when present, is the pre-discount reference price and
/// is expected to be >= `price`. `in_stock` is carried for the rendering
/// layer but not enforced anywhere in the cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_price: Option<f64>,
    pub image: String,
    pub category: Category,
    pub rating: f32,
    pub reviews: u32,
    pub description: String,
    pub in_stock: bool,
}

impl Product {
    /// Creates a product with neutral presentation fields. Handy for tests;
    /// the real catalog is deserialized from a document.
    pub fn new(id: impl Into<String>, name: impl Into<String>, price: f64, category: Category) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
            original_price: None,
            image: String::new(),
            category,
            rating: 0.0,
            reviews: 0,
            description: String::new(),
            in_stock: true,
        }
    }

    pub fn with_original_price(mut self, original_price: f64) -> Self {
        self.original_price = Some(original_price);
        self
    }
}

/// The filter engine: a product is kept iff its name contains `query` as a
/// case-insensitive substring and the category selector matches. Catalog
/// order is preserved; an empty query matches everything.
pub fn filter_products(products: &[Product], query: &str, filter: CategoryFilter) -> Vec<Product> {
    let needle = query.to_lowercase();
    products
        .iter()
        .filter(|product| {
            let matches_query = product.name.to_lowercase().contains(&needle);
            let matches_category = match filter {
                CategoryFilter::All => true,
                CategoryFilter::Only(category) => product.category == category,
            };
            matches_query && matches_category
        })
        .cloned()
        .collect()
}
