use serde::Serialize;

use super::product::Product;

/// One product entry in the cart paired with a quantity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CartLine {
    pub product: Product,
    pub quantity: u32,
}

/// Derived cart totals. Recomputed from the lines on every read, never
/// stored.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct CartTotals {
    pub total_items: u32,
    pub total_price: f64,
    pub total_savings: f64,
}

/// Cart read model handed to the rendering layer: the lines plus totals
/// derived at snapshot time.
#[derive(Debug, Clone, Serialize)]
pub struct CartSnapshot {
    pub lines: Vec<CartLine>,
    pub totals: CartTotals,
}

/// The shopping cart: an insertion-ordered list of lines with at most one
/// line per product id. Mutated only through the methods below; none of
/// them can fail.
#[derive(Debug, Clone, Default)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Increments the quantity of an existing line, or appends a new line
    /// with quantity 1.
    pub fn add_item(&mut self, product: Product) {
        if let Some(line) = self.lines.iter_mut().find(|l| l.product.id == product.id) {
            line.quantity += 1;
        } else {
            self.lines.push(CartLine { product, quantity: 1 });
        }
    }

    /// Removes the line for `product_id`, returning it. Absent ids are a
    /// no-op.
    pub fn remove_item(&mut self, product_id: &str) -> Option<CartLine> {
        let index = self.lines.iter().position(|l| l.product.id == product_id)?;
        Some(self.lines.remove(index))
    }

    /// Sets the quantity for `product_id`. A quantity of zero or less
    /// removes the line instead; there is no upper bound and no stock
    /// check.
    pub fn update_quantity(&mut self, product_id: &str, quantity: i32) {
        if quantity <= 0 {
            self.remove_item(product_id);
            return;
        }
        if let Some(line) = self.lines.iter_mut().find(|l| l.product.id == product_id) {
            line.quantity = quantity as u32;
        }
    }

    /// Empties the cart unconditionally.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Derived totals over the current lines. A line without an
    /// `original_price` contributes nothing to the savings.
    pub fn totals(&self) -> CartTotals {
        let total_items = self.lines.iter().map(|l| l.quantity).sum();
        let total_price = self
            .lines
            .iter()
            .map(|l| l.product.price * f64::from(l.quantity))
            .sum();
        let total_savings = self
            .lines
            .iter()
            .filter_map(|l| {
                l.product
                    .original_price
                    .map(|original| (original - l.product.price) * f64::from(l.quantity))
            })
            .sum();
        CartTotals {
            total_items,
            total_price,
            total_savings,
        }
    }

    pub fn snapshot(&self) -> CartSnapshot {
        CartSnapshot {
            lines: self.lines.clone(),
            totals: self.totals(),
        }
    }
}
