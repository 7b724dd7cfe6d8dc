use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

pub const PAYMENT_GATEWAY: &str = "stripe";
pub const PAYMENT_METHOD: &str = "card";

#[derive(Error, Debug, PartialEq, Eq)]
pub enum DonationError {
    #[error("Missing required fields")]
    MissingFields,
    #[error("Invalid donation amount")]
    InvalidAmount,
}

/// Donation record in the shape the GiveWP donations API accepts.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DonationPayload {
    pub form_id: u64,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub donor: Donor,
    pub payment: PaymentDetails,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Donor {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PaymentDetails {
    pub gateway: String,
    pub method: String,
    pub stripe_payment_method_id: String,
}

impl DonationPayload {
    pub fn new(form_id: u64, amount: Decimal, donor: Donor, stripe_payment_method_id: String) -> Self {
        Self {
            form_id,
            amount,
            donor,
            payment: PaymentDetails {
                gateway: PAYMENT_GATEWAY.to_string(),
                method: PAYMENT_METHOD.to_string(),
                stripe_payment_method_id,
            },
        }
    }
}

/// What the submission endpoint answers, as read back by the form.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct SubmissionEnvelope {
    pub success: bool,
    #[serde(default)]
    pub donation: Option<Value>,
    #[serde(default)]
    pub error: Option<String>,
}
