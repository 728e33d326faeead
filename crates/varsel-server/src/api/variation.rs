use axum::{extract::State, Extension, Json};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use varsel_core::{catalog::ProductId, combination_key, format_price};

use crate::middleware::RequestId;

use super::{require_nonce, ApiError, ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Deserialize)]
pub(super) struct LookupRequest {
    pub session_id: String,
    pub nonce: String,
    pub product_id: u64,
    pub color: String,
    pub size: String,
}

/// Lookup result for a color/size pick. The pair must have a combination
/// record; validity is reported, not enforced, so a sold-out or withheld
/// pick still resolves, with `is_valid: false`.
#[derive(Debug, Serialize)]
pub(super) struct LookupResponse {
    /// Display price, e.g. `"$19.99"`.
    price: String,
    #[serde(with = "rust_decimal::serde::float")]
    raw_price: Decimal,
    stock: u32,
    image: Option<String>,
    available: bool,
    is_valid: bool,
    combination_key: String,
}

/// POST /api/v1/variation/lookup — resolve one color/size pick.
pub(super) async fn lookup_variation(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Json(body): Json<LookupRequest>,
) -> Result<Json<ApiResponse<LookupResponse>>, ApiError> {
    let rid = &req_id.0;
    require_nonce(&state, rid, &body.session_id, &body.nonce)?;

    let product_id = ProductId(body.product_id);
    let Some(record) = state.provider.product(product_id).await else {
        return Err(ApiError::new(
            rid,
            "not_found",
            format!("no variation data for product {product_id}"),
        ));
    };

    let key = combination_key(&body.color, &body.size);
    let Some(combination) = record.combination(&body.color, &body.size) else {
        return Err(ApiError::new(
            rid,
            "validation_error",
            format!("combination {key} is not available for product {product_id}"),
        ));
    };

    Ok(Json(ApiResponse {
        data: LookupResponse {
            price: format_price(&state.shop.currency_symbol, combination.price),
            raw_price: combination.price,
            stock: combination.stock,
            image: combination.image.clone(),
            available: combination.available,
            is_valid: record.is_valid(&body.color, &body.size),
            combination_key: key,
        },
        meta: ResponseMeta::new(req_id.0),
    }))
}
