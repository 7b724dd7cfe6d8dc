use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenizationError {
    /// The SDK's own message, shown to the donor as-is.
    #[error("{0}")]
    Declined(String),
    #[error("payment method creation failed")]
    Failed,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct BillingDetails {
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct PaymentMethod {
    pub id: String,
}

/// The embedded payment widget: turns the card the donor typed into an opaque token.
#[async_trait]
pub trait PaymentTokenizer: Send + Sync {
    fn is_ready(&self) -> bool;

    async fn create_payment_method(
        &self,
        billing: &BillingDetails,
    ) -> Result<PaymentMethod, TokenizationError>;
}
