//! Pure projection of the selection machine into a renderable view-model.
//!
//! A host draws [`WidgetView`] however it likes; the widget keeps no
//! presentation state of its own.

use crate::machine::{AddFailure, ButtonState, LookupState, Notice, SelectionMachine};
use crate::messages::Messages;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionView {
    pub value: String,
    pub enabled: bool,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StockLine {
    pub text: String,
    pub in_stock: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ButtonView {
    pub label: String,
    pub enabled: bool,
}

/// Header cart counters, shown outside the widget itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartCounters {
    pub count: u32,
    pub total: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetView {
    /// `false` when the product has no variation data; hosts skip rendering.
    pub visible: bool,
    pub colors: Vec<OptionView>,
    pub sizes: Vec<OptionView>,
    /// Display price of the resolved combination. Cleared while a lookup is
    /// pending, so no stale price survives a new pick.
    pub price: Option<String>,
    pub image: Option<String>,
    pub stock: Option<StockLine>,
    pub message: Option<String>,
    /// `None` hides the affordance entirely (no valid pick to add).
    pub add_button: Option<ButtonView>,
    pub cart: Option<CartCounters>,
}

#[must_use]
pub fn render(machine: &SelectionMachine, messages: &Messages) -> WidgetView {
    let options = machine.options();
    let enabled_sizes = machine.enabled_sizes();

    let colors = options
        .colors
        .iter()
        .map(|choice| OptionView {
            value: choice.name.clone(),
            enabled: choice.purchasable,
            selected: machine.color() == Some(choice.name.as_str()),
        })
        .collect();

    let sizes = options
        .size_axis
        .iter()
        .map(|size| OptionView {
            value: size.clone(),
            enabled: enabled_sizes.contains(size),
            selected: machine.size() == Some(size.as_str()),
        })
        .collect();

    let resolved = match machine.lookup() {
        LookupState::Resolved(info) => Some(info),
        _ => None,
    };

    WidgetView {
        visible: options.has_data,
        colors,
        sizes,
        price: resolved.map(|info| info.price.clone()),
        image: resolved.and_then(|info| info.image.clone()),
        stock: resolved.map(|info| stock_line(info.stock, messages)),
        message: machine.notice().map(|notice| notice_text(notice, messages)),
        add_button: resolved
            .filter(|info| info.is_valid)
            .map(|_| button_view(machine.button(), messages)),
        cart: machine.cart().map(|summary| CartCounters {
            count: summary.count,
            total: summary.total.clone(),
        }),
    }
}

fn stock_line(stock: u32, messages: &Messages) -> StockLine {
    if stock > 0 {
        StockLine {
            text: format!("{stock} {}", messages.in_stock),
            in_stock: true,
        }
    } else {
        StockLine {
            text: messages.out_of_stock.clone(),
            in_stock: false,
        }
    }
}

fn button_view(state: ButtonState, messages: &Messages) -> ButtonView {
    match state {
        ButtonState::Idle => ButtonView {
            label: messages.add_to_cart.clone(),
            enabled: true,
        },
        ButtonState::Adding => ButtonView {
            label: messages.adding_to_cart.clone(),
            enabled: false,
        },
        ButtonState::Added => ButtonView {
            label: messages.added_to_cart.clone(),
            enabled: true,
        },
    }
}

fn notice_text(notice: &Notice, messages: &Messages) -> String {
    match notice {
        Notice::ChooseColorAndSize => messages.choose_color_and_size.clone(),
        Notice::CombinationUnavailable => messages.combination_unavailable.clone(),
        Notice::LoadingDataFailed => messages.loading_data_failed.clone(),
        Notice::ConnectionFailed | Notice::AddFailed(AddFailure::Connection) => {
            messages.connection_failed.clone()
        }
        Notice::AddFailed(AddFailure::Rejected(message)) => {
            format!("{}: {message}", messages.error_prefix)
        }
    }
}
