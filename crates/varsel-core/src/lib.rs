pub mod app_config;
pub mod cart;
pub mod catalog;
pub mod config;
pub mod error;
pub mod money;
pub mod nonce;

pub use app_config::{AppConfig, Environment};
pub use cart::{Cart, CartLine};
pub use catalog::{combination_key, Combination, ProductId, ProductVariations};
pub use config::{load_app_config, load_app_config_from_env};
pub use error::ConfigError;
pub use money::format_price;
pub use nonce::NonceSigner;
