use rust_decimal::Decimal;

use super::*;

fn options() -> WidgetOptions {
    WidgetOptions {
        product_id: 101,
        colors: vec![
            ColorChoice {
                name: "red".to_string(),
                purchasable: true,
                sizes: vec!["S".to_string(), "M".to_string()],
            },
            ColorChoice {
                name: "yellow".to_string(),
                purchasable: false,
                sizes: vec!["L".to_string()],
            },
            ColorChoice {
                name: "green".to_string(),
                purchasable: false,
                sizes: Vec::new(),
            },
        ],
        size_axis: vec!["S".to_string(), "M".to_string(), "L".to_string()],
        has_data: true,
    }
}

fn machine() -> SelectionMachine {
    SelectionMachine::new(options())
}

fn info(is_valid: bool, stock: u32) -> CombinationInfo {
    CombinationInfo {
        price: "$19.99".to_string(),
        raw_price: Decimal::new(19_99, 2),
        stock,
        image: None,
        available: true,
        is_valid,
        combination_key: "red_S".to_string(),
    }
}

/// Drives the machine to a resolved valid pick of red/S.
fn resolved_machine() -> SelectionMachine {
    let mut m = machine();
    m.apply(Event::ColorPicked("red".to_string()));
    let effect = m.apply(Event::SizePicked("S".to_string()));
    let Some(Effect::Lookup { seq, .. }) = effect else {
        panic!("size pick should start a lookup");
    };
    m.apply(Event::LookupResolved {
        seq,
        info: info(true, 4),
    });
    m
}

#[test]
fn starts_with_no_color() {
    let m = machine();
    assert_eq!(m.phase(), Phase::NoColor);
    assert_eq!(m.color(), None);
    assert!(m.enabled_sizes().is_empty());
}

#[test]
fn picking_color_selects_it_and_exposes_its_sizes() {
    let mut m = machine();
    let effect = m.apply(Event::ColorPicked("red".to_string()));

    assert_eq!(effect, None);
    assert_eq!(m.phase(), Phase::ColorSelected);
    assert_eq!(m.color(), Some("red"));
    assert_eq!(m.enabled_sizes(), ["S".to_string(), "M".to_string()]);
}

#[test]
fn picking_unpurchasable_color_is_ignored() {
    let mut m = machine();
    m.apply(Event::ColorPicked("yellow".to_string()));
    assert_eq!(m.phase(), Phase::NoColor);

    m.apply(Event::ColorPicked("blue".to_string()));
    assert_eq!(m.phase(), Phase::NoColor);
}

#[test]
fn picking_size_without_color_is_ignored() {
    let mut m = machine();
    let effect = m.apply(Event::SizePicked("S".to_string()));

    assert_eq!(effect, None);
    assert_eq!(m.size(), None);
}

#[test]
fn picking_size_not_offered_for_color_is_ignored() {
    let mut m = machine();
    m.apply(Event::ColorPicked("red".to_string()));
    let effect = m.apply(Event::SizePicked("L".to_string()));

    assert_eq!(effect, None);
    assert_eq!(m.size(), None);
    assert_eq!(m.phase(), Phase::ColorSelected);
}

#[test]
fn picking_size_starts_a_lookup() {
    let mut m = machine();
    m.apply(Event::ColorPicked("red".to_string()));
    let effect = m.apply(Event::SizePicked("S".to_string()));

    assert_eq!(
        effect,
        Some(Effect::Lookup {
            seq: 0,
            color: "red".to_string(),
            size: "S".to_string(),
        })
    );
    assert_eq!(m.phase(), Phase::SizeSelected(SizeOutcome::Pending));
}

#[test]
fn current_resolution_lands() {
    let m = resolved_machine();

    assert_eq!(m.phase(), Phase::SizeSelected(SizeOutcome::Valid));
    assert_eq!(m.notice(), None);
    let LookupState::Resolved(info) = m.lookup() else {
        panic!("lookup should be resolved");
    };
    assert_eq!(info.price, "$19.99");
}

#[test]
fn sold_out_resolution_is_invalid_with_notice() {
    let mut m = machine();
    m.apply(Event::ColorPicked("red".to_string()));
    m.apply(Event::SizePicked("M".to_string()));
    m.apply(Event::LookupResolved {
        seq: 0,
        info: info(false, 0),
    });

    assert_eq!(m.phase(), Phase::SizeSelected(SizeOutcome::Invalid));
    assert_eq!(m.notice(), Some(&Notice::CombinationUnavailable));
}

#[test]
fn superseded_resolution_is_discarded() {
    let mut m = machine();
    m.apply(Event::ColorPicked("red".to_string()));
    m.apply(Event::SizePicked("S".to_string()));
    // A second pick supersedes the first lookup before it resolves.
    m.apply(Event::SizePicked("M".to_string()));

    m.apply(Event::LookupResolved {
        seq: 0,
        info: info(true, 4),
    });
    assert_eq!(
        m.phase(),
        Phase::SizeSelected(SizeOutcome::Pending),
        "stale resolution must not land"
    );

    m.apply(Event::LookupResolved {
        seq: 1,
        info: info(false, 0),
    });
    assert_eq!(m.phase(), Phase::SizeSelected(SizeOutcome::Invalid));
}

#[test]
fn resolution_after_color_change_is_discarded() {
    let mut m = machine();
    m.apply(Event::ColorPicked("red".to_string()));
    m.apply(Event::SizePicked("S".to_string()));
    m.apply(Event::ColorPicked("red".to_string()));

    m.apply(Event::LookupResolved {
        seq: 0,
        info: info(true, 4),
    });

    assert_eq!(m.phase(), Phase::ColorSelected);
    assert_eq!(m.lookup(), &LookupState::Idle);
}

#[test]
fn repicking_color_resets_size_and_lookup() {
    let mut m = resolved_machine();
    m.apply(Event::ColorPicked("red".to_string()));

    assert_eq!(m.size(), None);
    assert_eq!(m.lookup(), &LookupState::Idle);
    assert_eq!(m.notice(), None);
}

#[test]
fn lookup_failures_map_to_notices() {
    let mut m = machine();
    m.apply(Event::ColorPicked("red".to_string()));
    m.apply(Event::SizePicked("S".to_string()));
    m.apply(Event::LookupFailed {
        seq: 0,
        failure: LookupFailure::Connection,
    });

    assert_eq!(m.notice(), Some(&Notice::ConnectionFailed));
    assert_eq!(m.phase(), Phase::SizeSelected(SizeOutcome::Invalid));

    let mut m = machine();
    m.apply(Event::ColorPicked("red".to_string()));
    m.apply(Event::SizePicked("S".to_string()));
    m.apply(Event::LookupFailed {
        seq: 0,
        failure: LookupFailure::Data,
    });

    assert_eq!(m.notice(), Some(&Notice::LoadingDataFailed));
}

#[test]
fn add_without_selection_blocks_with_notice() {
    let mut m = machine();
    let effect = m.apply(Event::AddPressed);

    assert_eq!(effect, None);
    assert_eq!(m.notice(), Some(&Notice::ChooseColorAndSize));
    assert_eq!(m.button(), ButtonState::Idle);
}

#[test]
fn add_with_color_but_no_size_blocks_with_notice() {
    let mut m = machine();
    m.apply(Event::ColorPicked("red".to_string()));
    let effect = m.apply(Event::AddPressed);

    assert_eq!(effect, None);
    assert_eq!(m.notice(), Some(&Notice::ChooseColorAndSize));
}

#[test]
fn add_on_valid_pick_submits() {
    let mut m = resolved_machine();
    let effect = m.apply(Event::AddPressed);

    assert_eq!(
        effect,
        Some(Effect::SubmitAdd {
            color: "red".to_string(),
            size: "S".to_string(),
        })
    );
    assert_eq!(m.button(), ButtonState::Adding);
}

#[test]
fn add_on_invalid_pick_is_ignored() {
    let mut m = machine();
    m.apply(Event::ColorPicked("red".to_string()));
    m.apply(Event::SizePicked("M".to_string()));
    m.apply(Event::LookupResolved {
        seq: 0,
        info: info(false, 0),
    });

    let effect = m.apply(Event::AddPressed);
    assert_eq!(effect, None);
    assert_eq!(m.button(), ButtonState::Idle);
}

#[test]
fn add_while_adding_is_ignored() {
    let mut m = resolved_machine();
    m.apply(Event::AddPressed);
    let effect = m.apply(Event::AddPressed);

    assert_eq!(effect, None);
    assert_eq!(m.button(), ButtonState::Adding);
}

#[test]
fn add_success_confirms_then_reverts() {
    let mut m = resolved_machine();
    m.apply(Event::AddPressed);
    let effect = m.apply(Event::AddSucceeded {
        cart_count: 3,
        cart_total: "$59.97".to_string(),
    });

    assert_eq!(effect, Some(Effect::RevertLater));
    assert_eq!(m.button(), ButtonState::Added);
    assert_eq!(
        m.cart(),
        Some(&CartSummary {
            count: 3,
            total: "$59.97".to_string(),
        })
    );

    m.apply(Event::ConfirmationElapsed);
    assert_eq!(m.button(), ButtonState::Idle);
}

#[test]
fn add_failure_reverts_immediately() {
    let mut m = resolved_machine();
    m.apply(Event::AddPressed);
    m.apply(Event::AddFailed(AddFailure::Rejected(
        "combination red_S is not available for product 101".to_string(),
    )));

    assert_eq!(m.button(), ButtonState::Idle);
    assert!(matches!(
        m.notice(),
        Some(Notice::AddFailed(AddFailure::Rejected(_)))
    ));
    assert_eq!(m.cart(), None);
}

#[test]
fn confirmation_elapsed_outside_added_state_is_inert() {
    let mut m = resolved_machine();
    m.apply(Event::ConfirmationElapsed);
    assert_eq!(m.button(), ButtonState::Idle);

    m.apply(Event::AddPressed);
    m.apply(Event::ConfirmationElapsed);
    assert_eq!(m.button(), ButtonState::Adding);
}
