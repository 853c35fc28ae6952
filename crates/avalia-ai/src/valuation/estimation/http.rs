use std::future::Future;

use reqwest::{Client, Url};
use tracing::{debug, warn};

use super::{EstimationError, EstimationRequest, EstimationResponse, PriceEstimator};

/// Posts the form to the configured endpoint. One attempt, no timeout.
#[derive(Debug, Clone)]
pub struct HttpPriceEstimator {
    client: Client,
    endpoint: Url,
}

impl HttpPriceEstimator {
    pub fn new(endpoint: &str) -> Result<Self, EstimationError> {
        let endpoint = Url::parse(endpoint)
            .map_err(|err| EstimationError::InvalidEndpoint(err.to_string()))?;
        let client = Client::builder().build()?;
        Ok(Self { client, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

impl PriceEstimator for HttpPriceEstimator {
    fn estimate(
        &self,
        request: EstimationRequest,
    ) -> impl Future<Output = Result<EstimationResponse, EstimationError>> + Send {
        let client = self.client.clone();
        let endpoint = self.endpoint.clone();

        async move {
            debug!(%endpoint, address = %request.address, "requesting price estimate");
            let response = client.post(endpoint).json(&request).send().await?;

            let status = response.status();
            if !status.is_success() {
                warn!(status = status.as_u16(), "estimation endpoint rejected request");
                return Err(EstimationError::Status(status.as_u16()));
            }

            let body = response.bytes().await?;
            serde_json::from_slice::<EstimationResponse>(&body)
                .map_err(|err| EstimationError::Decode(err.to_string()))
        }
    }
}
