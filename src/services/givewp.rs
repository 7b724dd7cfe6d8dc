use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use serde_json::Value;
use thiserror::Error;
use tracing::info;

use crate::config::GiveWpConfig;
use crate::models::donation::DonationPayload;

pub const DONATIONS_PATH: &str = "/wp-json/give-api/v2/donations";
pub const NONCE_HEADER: &str = "X-WP-Nonce";
pub const IDEMPOTENCY_HEADER: &str = "Idempotency-Key";

#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("donation API returned {status}: {body}")]
    Rejected { status: u16, body: String },
    #[error("donation API request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("donation API returned an unreadable body: {0}")]
    InvalidResponse(String),
}

/// Where validated donations are recorded.
#[async_trait]
pub trait DonationGateway: Send + Sync {
    async fn create_donation(
        &self,
        payload: &DonationPayload,
        idempotency_key: Option<&str>,
    ) -> Result<Value, GatewayError>;
}

pub struct GiveWpClient {
    http: reqwest::Client,
    config: GiveWpConfig,
}

impl GiveWpClient {
    pub fn new(config: GiveWpConfig) -> Result<Self, GatewayError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            http: builder.build()?,
            config,
        })
    }

    pub fn donations_url(&self) -> String {
        format!("{}{}", self.config.base_url, DONATIONS_PATH)
    }

    pub fn build_request(
        &self,
        payload: &DonationPayload,
        idempotency_key: Option<&str>,
    ) -> Result<reqwest::Request, GatewayError> {
        let mut request = self
            .http
            .post(self.donations_url())
            .header(AUTHORIZATION, format!("Bearer {}", self.config.api_token))
            .header(NONCE_HEADER, &self.config.api_key)
            .json(payload);

        if let Some(key) = idempotency_key {
            request = request.header(IDEMPOTENCY_HEADER, key);
        }

        Ok(request.build()?)
    }
}

#[async_trait]
impl DonationGateway for GiveWpClient {
    async fn create_donation(
        &self,
        payload: &DonationPayload,
        idempotency_key: Option<&str>,
    ) -> Result<Value, GatewayError> {
        let request = self.build_request(payload, idempotency_key)?;
        info!("Relaying donation for form {} to GiveWP", payload.form_id);

        let response = self.http.execute(request).await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GatewayError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| GatewayError::InvalidResponse(e.to_string()))
    }
}
