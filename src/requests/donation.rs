use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::donation::{DonationError, DonationPayload, Donor};

/// Body of `POST /api/submit-donation`.
///
/// Every field is optional on the wire so that an incomplete body is answered
/// with a 400 instead of a deserialization failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DonationRequest {
    pub form_id: Option<u64>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub amount: Option<Decimal>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub payment_method_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub idempotency_key: Option<String>,
}

impl DonationRequest {
    pub fn new(
        form_id: u64,
        amount: Decimal,
        first_name: String,
        last_name: String,
        email: String,
        payment_method_id: String,
    ) -> Self {
        Self {
            form_id: Some(form_id),
            amount: Some(amount),
            first_name: Some(first_name),
            last_name: Some(last_name),
            email: Some(email),
            payment_method_id: Some(payment_method_id),
            idempotency_key: None,
        }
    }

    pub fn with_idempotency_key(mut self, key: String) -> Self {
        self.idempotency_key = Some(key);
        self
    }

    /// Zero ids, zero amounts and empty strings count as missing.
    pub fn validate(&self) -> Result<DonationPayload, DonationError> {
        let (
            Some(form_id),
            Some(amount),
            Some(first_name),
            Some(last_name),
            Some(email),
            Some(payment_method_id),
        ) = (
            self.form_id.filter(|id| *id != 0),
            self.amount.filter(|amount| !amount.is_zero()),
            present(&self.first_name),
            present(&self.last_name),
            present(&self.email),
            present(&self.payment_method_id),
        )
        else {
            return Err(DonationError::MissingFields);
        };

        if amount < Decimal::ONE {
            return Err(DonationError::InvalidAmount);
        }

        Ok(DonationPayload::new(
            form_id,
            amount,
            Donor {
                first_name,
                last_name,
                email,
            },
            payment_method_id,
        ))
    }

    pub fn idempotency_key(&self) -> Option<&str> {
        self.idempotency_key.as_deref().filter(|key| !key.is_empty())
    }
}

fn present(value: &Option<String>) -> Option<String> {
    value.as_ref().filter(|v| !v.is_empty()).cloned()
}
