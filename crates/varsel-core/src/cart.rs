use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::catalog::ProductId;

/// One cart line. Color, size, and the unit price captured at add time travel
/// with the line; totals are always recomputed from these fields rather than
/// from any product price current at display time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartLine {
    pub product_id: ProductId,
    pub color: String,
    pub size: String,
    /// Price per unit at the moment the line was added.
    pub unit_price: Decimal,
    pub quantity: u32,
}

impl CartLine {
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }

    /// Lines merge only when they are the same product, combination, and
    /// captured unit price. A price change between adds keeps lines apart
    /// so each keeps the price it was added at.
    #[must_use]
    pub fn merges_with(&self, other: &CartLine) -> bool {
        self.product_id == other.product_id
            && self.color == other.color
            && self.size == other.size
            && self.unit_price == other.unit_price
    }
}

/// A shopper's cart, held per session.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Cart {
    pub lines: Vec<CartLine>,
}

impl Cart {
    /// Adds a line, merging quantity into an existing matching line.
    pub fn add_line(&mut self, line: CartLine) {
        if let Some(existing) = self.lines.iter_mut().find(|l| l.merges_with(&line)) {
            existing.quantity += line.quantity;
            return;
        }
        self.lines.push(line);
    }

    /// Total number of units across all lines.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// Sum of line totals, recomputed from line metadata on every call.
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}
