//! HTTP bindings for the storefront's variation endpoints.

use std::time::Duration;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::StorefrontError;

/// Client for the storefront variation API. Cheap to clone; the underlying
/// connection pool is shared.
#[derive(Debug, Clone)]
pub struct StorefrontApi {
    client: reqwest::Client,
    base_url: String,
}

/// Bootstrap payload from `GET /api/v1/widget/{product_id}`.
#[derive(Debug, Clone, Deserialize)]
pub struct WidgetBootstrap {
    pub session_id: String,
    pub nonce: String,
    pub product_id: u64,
    pub colors: Vec<BootstrapColor>,
    pub sizes: Vec<String>,
    pub has_data: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BootstrapColor {
    pub color: String,
    pub purchasable: bool,
    pub sizes: Vec<String>,
}

/// Resolved combination from `POST /api/v1/variation/lookup`.
#[derive(Debug, Clone, Deserialize)]
pub struct LookupData {
    pub price: String,
    pub raw_price: Decimal,
    pub stock: u32,
    pub image: Option<String>,
    pub available: bool,
    pub is_valid: bool,
    pub combination_key: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AddData {
    pub message: String,
    pub cart_count: u32,
    pub cart_total: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CartData {
    pub lines: Vec<CartLineData>,
    pub item_count: u32,
    pub subtotal: String,
    pub raw_subtotal: Decimal,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CartLineData {
    pub product_id: u64,
    pub color: String,
    pub size: String,
    pub quantity: u32,
    pub unit_price: String,
    pub line_total: String,
}

#[derive(Debug, Deserialize)]
struct Envelope<T> {
    data: T,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    code: String,
    message: String,
}

#[derive(Debug, Serialize)]
struct LookupPayload<'a> {
    session_id: &'a str,
    nonce: &'a str,
    product_id: u64,
    color: &'a str,
    size: &'a str,
}

#[derive(Debug, Serialize)]
struct AddPayload<'a> {
    session_id: &'a str,
    nonce: &'a str,
    product_id: u64,
    color: &'a str,
    size: &'a str,
    quantity: u32,
}

impl StorefrontApi {
    /// Builds a client for the storefront at `base_url` with a total request
    /// budget of `timeout_secs`.
    pub fn new(base_url: impl Into<String>, timeout_secs: u64) -> Result<Self, StorefrontError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(timeout_secs))
            .build()?;
        let base_url = base_url.into();

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub async fn widget(&self, product_id: u64) -> Result<WidgetBootstrap, StorefrontError> {
        let url = format!("{}/api/v1/widget/{product_id}", self.base_url);
        let response = self.client.get(&url).send().await?;
        unwrap_envelope(response, "widget bootstrap").await
    }

    pub async fn lookup(
        &self,
        session_id: &str,
        nonce: &str,
        product_id: u64,
        color: &str,
        size: &str,
    ) -> Result<LookupData, StorefrontError> {
        let url = format!("{}/api/v1/variation/lookup", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(&LookupPayload {
                session_id,
                nonce,
                product_id,
                color,
                size,
            })
            .send()
            .await?;
        unwrap_envelope(response, "variation lookup").await
    }

    pub async fn add_to_cart(
        &self,
        session_id: &str,
        nonce: &str,
        product_id: u64,
        color: &str,
        size: &str,
        quantity: u32,
    ) -> Result<AddData, StorefrontError> {
        let url = format!("{}/api/v1/cart/add", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(&AddPayload {
                session_id,
                nonce,
                product_id,
                color,
                size,
                quantity,
            })
            .send()
            .await?;
        unwrap_envelope(response, "add to cart").await
    }

    pub async fn cart(&self, session_id: &str) -> Result<CartData, StorefrontError> {
        let url = format!("{}/api/v1/cart", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[("session_id", session_id)])
            .send()
            .await?;
        unwrap_envelope(response, "cart view").await
    }
}

/// Unwraps the server's `{data, meta}` envelope, turning its error envelope
/// into [`StorefrontError::Rejected`].
async fn unwrap_envelope<T>(
    response: reqwest::Response,
    context: &str,
) -> Result<T, StorefrontError>
where
    T: serde::de::DeserializeOwned,
{
    let status = response.status();
    let body = response.text().await?;

    if status.is_success() {
        let envelope: Envelope<T> =
            serde_json::from_str(&body).map_err(|source| StorefrontError::Deserialize {
                context: context.to_string(),
                source,
            })?;
        return Ok(envelope.data);
    }

    match serde_json::from_str::<ErrorEnvelope>(&body) {
        Ok(envelope) => Err(StorefrontError::Rejected {
            code: envelope.error.code,
            message: envelope.error.message,
        }),
        Err(_) => Err(StorefrontError::UnexpectedStatus {
            status: status.as_u16(),
        }),
    }
}
