use axum::{
    extract::{Path, State},
    Extension, Json,
};
use serde::Serialize;

use varsel_core::catalog::ProductId;

use crate::middleware::RequestId;

use super::{ApiResponse, AppState, ResponseMeta};

/// Bootstrap payload for one product's selector: a fresh session, a nonce
/// bound to it, and the color/size options to render.
#[derive(Debug, Serialize)]
pub(super) struct WidgetData {
    session_id: String,
    nonce: String,
    product_id: ProductId,
    colors: Vec<ColorOption>,
    sizes: Vec<String>,
    /// `false` when the feed has no record for this product (or is down);
    /// the selector still renders, and every pick resolves as invalid.
    has_data: bool,
}

#[derive(Debug, Serialize)]
pub(super) struct ColorOption {
    color: String,
    /// Whether any size of this color can currently be bought.
    purchasable: bool,
    /// Sizes offered for this color, in feed order. Empty when the feed has
    /// no row for it.
    sizes: Vec<String>,
}

/// GET /api/v1/widget/{product_id} — selector bootstrap data.
pub(super) async fn get_widget(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(product_id): Path<u64>,
) -> Json<ApiResponse<WidgetData>> {
    let product_id = ProductId(product_id);
    let record = state.provider.product(product_id).await;

    let session_id = state.sessions.new_session();
    let nonce = state.sessions.issue_nonce(&session_id);

    let colors = state
        .shop
        .palette
        .iter()
        .map(|color| ColorOption {
            color: color.clone(),
            purchasable: record
                .as_ref()
                .is_some_and(|r| r.has_purchasable_size(color)),
            sizes: record
                .as_ref()
                .map(|r| r.sizes_for(color).to_vec())
                .unwrap_or_default(),
        })
        .collect();

    Json(ApiResponse {
        data: WidgetData {
            session_id,
            nonce,
            product_id,
            colors,
            sizes: state.shop.sizes.clone(),
            has_data: record.is_some(),
        },
        meta: ResponseMeta::new(req_id.0),
    })
}
