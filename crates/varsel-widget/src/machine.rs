//! Pure selection state machine for one product widget.
//!
//! The machine consumes [`Event`]s and answers with at most one [`Effect`]
//! for the caller to carry out. It never touches the network or the clock;
//! [`crate::controller::WidgetController`] owns both.

use rust_decimal::Decimal;

/// Option data the widget was bootstrapped with.
#[derive(Debug, Clone)]
pub struct WidgetOptions {
    pub product_id: u64,
    pub colors: Vec<ColorChoice>,
    /// The global size axis, rendered in full. Enablement follows the
    /// selected color's own row.
    pub size_axis: Vec<String>,
    /// `false` when the product has no variation data; every option stays
    /// disabled and hosts skip rendering.
    pub has_data: bool,
}

#[derive(Debug, Clone)]
pub struct ColorChoice {
    pub name: String,
    pub purchasable: bool,
    /// Sizes offered for this color, in feed order.
    pub sizes: Vec<String>,
}

/// Live data for one combination, as resolved by the lookup endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct CombinationInfo {
    pub price: String,
    pub raw_price: Decimal,
    pub stock: u32,
    pub image: Option<String>,
    pub available: bool,
    pub is_valid: bool,
    pub combination_key: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupFailure {
    /// The server rejected the lookup or returned an unreadable payload.
    Data,
    /// The request never completed.
    Connection,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LookupState {
    Idle,
    Pending { seq: u64 },
    Resolved(CombinationInfo),
    Failed(LookupFailure),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonState {
    Idle,
    Adding,
    Added,
}

/// Header cart counters, taken from add-to-cart responses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartSummary {
    pub count: u32,
    pub total: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddFailure {
    /// The server rejected the add; the message is the server's own.
    Rejected(String),
    Connection,
}

/// Something the renderer should surface to the user. Wording lives in
/// [`crate::messages::Messages`], never here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    ChooseColorAndSize,
    CombinationUnavailable,
    LoadingDataFailed,
    ConnectionFailed,
    AddFailed(AddFailure),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    ColorPicked(String),
    SizePicked(String),
    LookupResolved { seq: u64, info: CombinationInfo },
    LookupFailed { seq: u64, failure: LookupFailure },
    AddPressed,
    AddSucceeded { cart_count: u32, cart_total: String },
    AddFailed(AddFailure),
    ConfirmationElapsed,
}

/// Work the caller must carry out after an event was applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Lookup { seq: u64, color: String, size: String },
    SubmitAdd { color: String, size: String },
    /// Schedule [`Event::ConfirmationElapsed`] after the confirmation delay.
    RevertLater,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    NoColor,
    ColorSelected,
    SizeSelected(SizeOutcome),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeOutcome {
    Pending,
    Valid,
    Invalid,
}

#[derive(Debug)]
pub struct SelectionMachine {
    options: WidgetOptions,
    color: Option<String>,
    size: Option<String>,
    lookup: LookupState,
    button: ButtonState,
    cart: Option<CartSummary>,
    notice: Option<Notice>,
    next_seq: u64,
}

impl SelectionMachine {
    #[must_use]
    pub fn new(options: WidgetOptions) -> Self {
        Self {
            options,
            color: None,
            size: None,
            lookup: LookupState::Idle,
            button: ButtonState::Idle,
            cart: None,
            notice: None,
            next_seq: 0,
        }
    }

    /// Applies one event. Picks of disabled or unknown options are ignored,
    /// mirroring controls that are not clickable.
    pub fn apply(&mut self, event: Event) -> Option<Effect> {
        match event {
            Event::ColorPicked(color) => self.pick_color(color),
            Event::SizePicked(size) => self.pick_size(size),
            Event::LookupResolved { seq, info } => self.resolve_lookup(seq, info),
            Event::LookupFailed { seq, failure } => self.fail_lookup(seq, failure),
            Event::AddPressed => self.press_add(),
            Event::AddSucceeded {
                cart_count,
                cart_total,
            } => {
                self.button = ButtonState::Added;
                self.cart = Some(CartSummary {
                    count: cart_count,
                    total: cart_total,
                });
                self.notice = None;
                Some(Effect::RevertLater)
            }
            Event::AddFailed(failure) => {
                self.button = ButtonState::Idle;
                self.notice = Some(Notice::AddFailed(failure));
                None
            }
            Event::ConfirmationElapsed => {
                if self.button == ButtonState::Added {
                    self.button = ButtonState::Idle;
                }
                None
            }
        }
    }

    fn pick_color(&mut self, color: String) -> Option<Effect> {
        let enabled = self
            .options
            .colors
            .iter()
            .any(|c| c.name == color && c.purchasable);
        if !enabled {
            return None;
        }

        self.color = Some(color);
        self.size = None;
        self.lookup = LookupState::Idle;
        self.notice = None;
        None
    }

    fn pick_size(&mut self, size: String) -> Option<Effect> {
        let color = self.color.clone()?;
        let offered = self
            .options
            .colors
            .iter()
            .find(|c| c.name == color)
            .is_some_and(|c| c.sizes.contains(&size));
        if !offered {
            return None;
        }

        self.size = Some(size.clone());
        let seq = self.next_seq;
        self.next_seq += 1;
        self.lookup = LookupState::Pending { seq };
        self.notice = None;
        Some(Effect::Lookup { seq, color, size })
    }

    fn resolve_lookup(&mut self, seq: u64, info: CombinationInfo) -> Option<Effect> {
        if !self.is_current(seq) {
            return None;
        }
        self.notice = (!info.is_valid).then_some(Notice::CombinationUnavailable);
        self.lookup = LookupState::Resolved(info);
        None
    }

    fn fail_lookup(&mut self, seq: u64, failure: LookupFailure) -> Option<Effect> {
        if !self.is_current(seq) {
            return None;
        }
        self.notice = Some(match failure {
            LookupFailure::Data => Notice::LoadingDataFailed,
            LookupFailure::Connection => Notice::ConnectionFailed,
        });
        self.lookup = LookupState::Failed(failure);
        None
    }

    /// A resolution only lands while its own lookup is still the pending one;
    /// anything else is a superseded in-flight response.
    fn is_current(&self, seq: u64) -> bool {
        matches!(self.lookup, LookupState::Pending { seq: current } if current == seq)
    }

    fn press_add(&mut self) -> Option<Effect> {
        if self.button == ButtonState::Adding {
            return None;
        }
        let (Some(color), Some(size)) = (self.color.clone(), self.size.clone()) else {
            self.notice = Some(Notice::ChooseColorAndSize);
            return None;
        };
        let valid = matches!(&self.lookup, LookupState::Resolved(info) if info.is_valid);
        if !valid {
            return None;
        }

        self.button = ButtonState::Adding;
        Some(Effect::SubmitAdd { color, size })
    }

    #[must_use]
    pub fn options(&self) -> &WidgetOptions {
        &self.options
    }

    #[must_use]
    pub fn color(&self) -> Option<&str> {
        self.color.as_deref()
    }

    #[must_use]
    pub fn size(&self) -> Option<&str> {
        self.size.as_deref()
    }

    #[must_use]
    pub fn lookup(&self) -> &LookupState {
        &self.lookup
    }

    #[must_use]
    pub fn button(&self) -> ButtonState {
        self.button
    }

    #[must_use]
    pub fn cart(&self) -> Option<&CartSummary> {
        self.cart.as_ref()
    }

    #[must_use]
    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    /// Sizes offered for the currently selected color, empty without one.
    #[must_use]
    pub fn enabled_sizes(&self) -> &[String] {
        self.color
            .as_deref()
            .and_then(|color| self.options.colors.iter().find(|c| c.name == color))
            .map_or(&[], |c| c.sizes.as_slice())
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        match (&self.color, &self.size) {
            (None, _) => Phase::NoColor,
            (Some(_), None) => Phase::ColorSelected,
            (Some(_), Some(_)) => Phase::SizeSelected(match &self.lookup {
                LookupState::Idle | LookupState::Pending { .. } => SizeOutcome::Pending,
                LookupState::Resolved(info) if info.is_valid => SizeOutcome::Valid,
                LookupState::Resolved(_) | LookupState::Failed(_) => SizeOutcome::Invalid,
            }),
        }
    }
}

#[cfg(test)]
#[path = "machine_test.rs"]
mod tests;
