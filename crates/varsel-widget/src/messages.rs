//! User-facing strings for the widget, collected in one table.
//!
//! Hosts that need another language replace the whole table; the machine and
//! renderer never inline wording.

#[derive(Debug, Clone)]
pub struct Messages {
    pub add_to_cart: String,
    pub adding_to_cart: String,
    pub added_to_cart: String,
    pub choose_color_and_size: String,
    pub combination_unavailable: String,
    /// Suffix for a positive stock count, rendered as `"{stock} {in_stock}"`.
    pub in_stock: String,
    pub out_of_stock: String,
    pub loading_data_failed: String,
    pub connection_failed: String,
    /// Prefix for server-provided add-to-cart rejections.
    pub error_prefix: String,
}

impl Default for Messages {
    fn default() -> Self {
        Self {
            add_to_cart: "Add to cart".to_string(),
            adding_to_cart: "Adding...".to_string(),
            added_to_cart: "Added to cart!".to_string(),
            choose_color_and_size: "Choose a color and size first!".to_string(),
            combination_unavailable: "This combination is not available!".to_string(),
            in_stock: "in stock".to_string(),
            out_of_stock: "Out of stock".to_string(),
            loading_data_failed: "Could not load variation data!".to_string(),
            connection_failed: "Connection error!".to_string(),
            error_prefix: "Error".to_string(),
        }
    }
}
