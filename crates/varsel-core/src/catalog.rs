use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Numeric product ID as it appears in the variation feed.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ProductId(pub u64);

impl std::fmt::Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Builds the combination lookup key for a color/size pair, e.g. `"red_M"`.
#[must_use]
pub fn combination_key(color: &str, size: &str) -> String {
    format!("{color}_{size}")
}

/// One sellable color/size combination of a product.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Combination {
    /// Merchandising flag from the feed. A combination can be in stock but
    /// still withheld from sale.
    pub available: bool,
    /// Units on hand.
    pub stock: u32,
    /// Unit price, parsed from the feed's JSON number.
    pub price: Decimal,
    /// Combination-specific image URL, when the feed provides one.
    pub image: Option<String>,
}

impl Combination {
    /// Returns `true` if this combination can actually be bought:
    /// flagged available and with stock on hand.
    #[must_use]
    pub fn is_purchasable(&self) -> bool {
        self.available && self.stock > 0
    }
}

/// The variation record for a single product: which sizes each color comes
/// in, plus the concrete combination data keyed by `"{color}_{size}"`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductVariations {
    /// Map from color to the sizes offered in that color.
    pub compatibility: BTreeMap<String, Vec<String>>,
    /// Map from combination key to the combination record.
    pub combinations: BTreeMap<String, Combination>,
}

impl ProductVariations {
    /// Returns the sizes offered for `color`, or an empty slice for a color
    /// the product does not come in.
    #[must_use]
    pub fn sizes_for(&self, color: &str) -> &[String] {
        self.compatibility
            .get(color)
            .map_or(&[], |sizes| sizes.as_slice())
    }

    /// Looks up the combination record for a color/size pair.
    ///
    /// This is a raw key lookup; it does not check `compatibility`. Use
    /// [`Self::is_valid`] to answer "can this be bought".
    #[must_use]
    pub fn combination(&self, color: &str, size: &str) -> Option<&Combination> {
        self.combinations.get(&combination_key(color, size))
    }

    /// Returns the combination for `color`/`size` only when it can be bought:
    /// the size is listed for that color, the record exists, and it is
    /// available with stock.
    #[must_use]
    pub fn valid_combination(&self, color: &str, size: &str) -> Option<&Combination> {
        if !self.sizes_for(color).iter().any(|s| s == size) {
            return None;
        }
        self.combination(color, size)
            .filter(|c| c.is_purchasable())
    }

    /// Returns `true` if `color`/`size` is a purchasable combination.
    #[must_use]
    pub fn is_valid(&self, color: &str, size: &str) -> bool {
        self.valid_combination(color, size).is_some()
    }

    /// Returns `true` if at least one size of `color` is purchasable.
    #[must_use]
    pub fn has_purchasable_size(&self, color: &str) -> bool {
        self.sizes_for(color)
            .iter()
            .any(|size| self.is_valid(color, size))
    }
}

#[cfg(test)]
#[path = "catalog_test.rs"]
mod tests;
