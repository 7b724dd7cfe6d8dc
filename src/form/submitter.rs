use async_trait::async_trait;
use thiserror::Error;

use crate::models::donation::SubmissionEnvelope;
use crate::requests::donation::DonationRequest;

pub const SUBMIT_PATH: &str = "/api/submit-donation";

#[derive(Error, Debug)]
pub enum SubmitError {
    #[error("submission request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

#[async_trait]
pub trait DonationSubmitter: Send + Sync {
    async fn submit(&self, request: &DonationRequest) -> Result<SubmissionEnvelope, SubmitError>;
}

/// Posts donations to a running submission endpoint.
pub struct HttpDonationSubmitter {
    http: reqwest::Client,
    endpoint: String,
}

impl HttpDonationSubmitter {
    pub fn new(origin: &str) -> Self {
        Self::with_http_client(origin, reqwest::Client::new())
    }

    pub fn with_http_client(origin: &str, http: reqwest::Client) -> Self {
        Self {
            http,
            endpoint: format!("{}{}", origin.trim_end_matches('/'), SUBMIT_PATH),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl DonationSubmitter for HttpDonationSubmitter {
    // The envelope is read whatever the status: 400 and 500 answers carry `error`.
    async fn submit(&self, request: &DonationRequest) -> Result<SubmissionEnvelope, SubmitError> {
        let envelope = self
            .http
            .post(&self.endpoint)
            .json(request)
            .send()
            .await?
            .json::<SubmissionEnvelope>()
            .await?;

        Ok(envelope)
    }
}
