use axum::{
    extract::{Query, State},
    http::StatusCode,
    Extension, Json,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use varsel_core::{catalog::ProductId, format_price, Cart, CartLine};

use crate::middleware::RequestId;

use super::{require_nonce, ApiError, ApiResponse, AppState, ResponseMeta, ShopSettings};

// ---------------------------------------------------------------------------
// Request bodies
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub(super) struct AddToCartRequest {
    pub session_id: String,
    pub nonce: String,
    pub product_id: u64,
    pub color: String,
    pub size: String,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

fn default_quantity() -> u32 {
    1
}

#[derive(Debug, Deserialize)]
pub(super) struct CartQuery {
    pub session_id: String,
}

// ---------------------------------------------------------------------------
// Response bodies
// ---------------------------------------------------------------------------

/// Success payload for an add: a confirmation line plus the summary counters
/// the storefront header shows.
#[derive(Debug, Serialize)]
pub(super) struct AddToCartResponse {
    pub message: String,
    pub cart_count: u32,
    /// Display total, e.g. `"$39.98"`.
    pub cart_total: String,
}

/// Cart rendered for the client. Totals are recomputed from the stored line
/// metadata on every build, so the captured unit price wins over whatever
/// the feed says at display time.
#[derive(Debug, Serialize)]
pub(super) struct CartView {
    pub lines: Vec<CartLineView>,
    pub item_count: u32,
    /// Display subtotal, e.g. `"$39.98"`.
    pub subtotal: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub raw_subtotal: Decimal,
}

#[derive(Debug, Serialize)]
pub(super) struct CartLineView {
    pub product_id: ProductId,
    pub color: String,
    pub size: String,
    pub quantity: u32,
    pub unit_price: String,
    pub line_total: String,
}

pub(super) fn cart_view(shop: &ShopSettings, cart: &Cart) -> CartView {
    let lines = cart
        .lines
        .iter()
        .map(|line| CartLineView {
            product_id: line.product_id,
            color: line.color.clone(),
            size: line.size.clone(),
            quantity: line.quantity,
            unit_price: format_price(&shop.currency_symbol, line.unit_price),
            line_total: format_price(&shop.currency_symbol, line.line_total()),
        })
        .collect();

    CartView {
        lines,
        item_count: cart.item_count(),
        subtotal: format_price(&shop.currency_symbol, cart.subtotal()),
        raw_subtotal: cart.subtotal(),
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/cart/add — validate the pick server-side and add a line.
///
/// The client's lookup result is never trusted; the combination is
/// re-validated against the current feed before anything is stored.
pub(super) async fn add_to_cart(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Json(body): Json<AddToCartRequest>,
) -> Result<(StatusCode, Json<ApiResponse<AddToCartResponse>>), ApiError> {
    let rid = &req_id.0;
    require_nonce(&state, rid, &body.session_id, &body.nonce)?;

    if body.color.is_empty() || body.size.is_empty() {
        return Err(ApiError::new(
            rid,
            "validation_error",
            "choose a color and size first",
        ));
    }

    if body.quantity == 0 {
        return Err(ApiError::new(
            rid,
            "validation_error",
            "quantity must be at least 1",
        ));
    }

    let product_id = ProductId(body.product_id);
    let Some(record) = state.provider.product(product_id).await else {
        return Err(ApiError::new(
            rid,
            "not_found",
            format!("no variation data for product {product_id}"),
        ));
    };

    let Some(combination) = record.valid_combination(&body.color, &body.size) else {
        return Err(ApiError::new(
            rid,
            "validation_error",
            format!(
                "combination {} is not available for product {product_id}",
                varsel_core::combination_key(&body.color, &body.size)
            ),
        ));
    };

    let cart = state
        .carts
        .add_line(
            &body.session_id,
            CartLine {
                product_id,
                color: body.color.clone(),
                size: body.size.clone(),
                unit_price: combination.price,
                quantity: body.quantity,
            },
        )
        .await;

    tracing::info!(
        product_id = %product_id,
        color = %body.color,
        size = %body.size,
        quantity = body.quantity,
        "added combination to cart"
    );

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse {
            data: AddToCartResponse {
                message: "added to cart".to_string(),
                cart_count: cart.item_count(),
                cart_total: format_price(&state.shop.currency_symbol, cart.subtotal()),
            },
            meta: ResponseMeta::new(req_id.0),
        }),
    ))
}

/// GET /api/v1/cart — the session's cart, empty if nothing was added yet.
pub(super) async fn get_cart(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<CartQuery>,
) -> Json<ApiResponse<CartView>> {
    let cart = state.carts.cart(&query.session_id).await;

    Json(ApiResponse {
        data: cart_view(&state.shop, &cart),
        meta: ResponseMeta::new(req_id.0),
    })
}
