//! Outbound price-per-square-metre estimation.

mod guard;
mod http;

pub use guard::{EstimateRejected, EstimateSlot, EstimateStatus, RequestToken};
pub use http::HttpPriceEstimator;

use std::future::Future;

use serde::{Deserialize, Deserializer, Serialize};

use super::domain::PropertyData;

/// Text shown in place of the estimate whenever a request fails, for any reason.
pub const ESTIMATE_ERROR_MESSAGE: &str = "Error estimating price. Please try again.";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EstimationRequest {
    pub property_data: PropertyData,
    pub address: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EstimationResponse {
    #[serde(deserialize_with = "price_text")]
    pub estimated_price: String,
}

/// Accepts the price as a JSON string or a bare number.
fn price_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Price {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match Price::deserialize(deserializer)? {
        Price::Text(text) => text,
        Price::Number(number) => number.to_string(),
    })
}

#[derive(Debug, thiserror::Error)]
pub enum EstimationError {
    #[error("invalid estimation endpoint: {0}")]
    InvalidEndpoint(String),
    #[error("estimation transport failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("estimation endpoint answered with status {0}")]
    Status(u16),
    #[error("estimation response could not be decoded: {0}")]
    Decode(String),
}

/// Transport seam for the estimation endpoint so sessions can be tested offline.
pub trait PriceEstimator: Send + Sync {
    fn estimate(
        &self,
        request: EstimationRequest,
    ) -> impl Future<Output = Result<EstimationResponse, EstimationError>> + Send;
}

/// Text displayed for a finished request. All failures collapse to one message.
pub fn display_text(result: &Result<EstimationResponse, EstimationError>) -> String {
    match result {
        Ok(response) => response.estimated_price.clone(),
        Err(_) => ESTIMATE_ERROR_MESSAGE.to_string(),
    }
}
