pub mod api;
pub mod controller;
pub mod error;
pub mod machine;
pub mod messages;
pub mod view;

pub use api::StorefrontApi;
pub use controller::WidgetController;
pub use error::StorefrontError;
pub use machine::{Effect, Event, Phase, SelectionMachine, WidgetOptions};
pub use messages::Messages;
pub use view::{render, WidgetView};
