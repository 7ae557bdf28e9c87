use super::types::{Envelope, PricingResponse};
use crate::errors::{VizError, VizResult};
use crate::validate::RequestParams;
use reqwest::Client;

/// Client for the remote BOPM pricing endpoint. Single attempt per call:
/// no retry and no request timeout.
#[derive(Clone)]
pub struct PricingClient {
    client: Client,
    endpoint: String,
}

impl PricingClient {
    pub fn new(endpoint: &str) -> Self {
        Self {
            client: Client::builder()
                .pool_max_idle_per_host(4)
                .build()
                .unwrap_or_default(),
            endpoint: endpoint.trim().to_string(),
        }
    }

    /// POST the request parameters and decode the lattice response.
    pub async fn quote(&self, params: &RequestParams) -> VizResult<PricingResponse> {
        let resp = self.client.post(&self.endpoint).json(params).send().await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(VizError::PricingService {
                status: status.as_u16(),
                message: body,
            });
        }

        let envelope: Envelope = resp
            .json()
            .await
            .map_err(|e| VizError::Parse(format!("pricing envelope: {e}")))?;

        envelope.into_response()
    }
}
