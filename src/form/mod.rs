//! Donor-facing form state.
//!
//! A submission runs in three steps so the form can be rendered while the
//! network work is in flight: [`DonationForm::begin_submit`] validates and
//! locks the submit control, [`PendingDonation::send`] tokenizes the card and
//! posts the donation without borrowing the form, and
//! [`DonationForm::finish_submit`] unlocks it and shows the result.
//! [`DonationForm::submit`] chains the three.

pub mod payment;
pub mod submitter;

use std::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use tracing::{error, info};
use uuid::Uuid;

use crate::requests::donation::DonationRequest;
use payment::{BillingDetails, PaymentTokenizer, TokenizationError};
use submitter::DonationSubmitter;

pub const SDK_NOT_READY: &str = "Stripe has not loaded yet. Please try again.";
pub const FIELDS_REQUIRED: &str = "Please fill in all required fields.";
pub const INVALID_AMOUNT: &str = "Please enter a valid donation amount.";
pub const PAYMENT_METHOD_FAILED: &str = "Payment method creation failed.";
pub const DONATION_THANKS: &str =
    "Thank you for your donation! Your support helps us build stronger communities through technology.";
pub const DONATION_FAILED: &str = "Donation processing failed. Please try again.";
pub const UNEXPECTED_ERROR: &str = "An unexpected error occurred. Please try again.";

pub const SUBMIT_LABEL: &str = "Donate Now";
pub const PROCESSING_LABEL: &str = "Processing...";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    FirstName,
    LastName,
    Email,
    Amount,
}

impl FromStr for FormField {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "firstName" => Ok(FormField::FirstName),
            "lastName" => Ok(FormField::LastName),
            "email" => Ok(FormField::Email),
            "amount" => Ok(FormField::Amount),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormMessage {
    pub kind: MessageKind,
    pub text: String,
}

impl FormMessage {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            kind: MessageKind::Success,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: MessageKind::Error,
            text: text.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.kind == MessageKind::Success
    }
}

/// Raw input values, exactly as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DonationFormData {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub amount: String,
}

impl DonationFormData {
    fn is_complete(&self) -> bool {
        !self.first_name.is_empty()
            && !self.last_name.is_empty()
            && !self.email.is_empty()
            && !self.amount.is_empty()
    }
}

#[derive(Debug)]
pub struct DonationForm {
    form_id: u64,
    data: DonationFormData,
    is_processing: bool,
    message: Option<FormMessage>,
}

impl DonationForm {
    pub fn new(form_id: u64) -> Self {
        Self {
            form_id,
            data: DonationFormData::default(),
            is_processing: false,
            message: None,
        }
    }

    pub fn form_id(&self) -> u64 {
        self.form_id
    }

    pub fn data(&self) -> &DonationFormData {
        &self.data
    }

    pub fn message(&self) -> Option<&FormMessage> {
        self.message.as_ref()
    }

    pub fn is_processing(&self) -> bool {
        self.is_processing
    }

    pub fn set_field(&mut self, field: FormField, value: impl Into<String>) {
        let value = value.into();
        match field {
            FormField::FirstName => self.data.first_name = value,
            FormField::LastName => self.data.last_name = value,
            FormField::Email => self.data.email = value,
            FormField::Amount => self.data.amount = value,
        }
    }

    pub fn submit_disabled<T: PaymentTokenizer>(&self, tokenizer: &T) -> bool {
        !tokenizer.is_ready() || self.is_processing
    }

    pub fn submit_label(&self) -> &'static str {
        if self.is_processing {
            PROCESSING_LABEL
        } else {
            SUBMIT_LABEL
        }
    }

    /// Validates the inputs and locks the form.
    ///
    /// Returns `None` when the submission must not proceed: a submission is
    /// already in flight, or validation failed (the reason is left in
    /// [`DonationForm::message`]).
    pub fn begin_submit<T: PaymentTokenizer>(&mut self, tokenizer: &T) -> Option<PendingDonation> {
        if self.is_processing {
            return None;
        }

        if !tokenizer.is_ready() {
            self.message = Some(FormMessage::error(SDK_NOT_READY));
            return None;
        }

        if !self.data.is_complete() {
            self.message = Some(FormMessage::error(FIELDS_REQUIRED));
            return None;
        }

        let Some(amount) = parse_amount(&self.data.amount) else {
            self.message = Some(FormMessage::error(INVALID_AMOUNT));
            return None;
        };

        self.is_processing = true;
        self.message = None;

        Some(PendingDonation {
            form_id: self.form_id,
            amount,
            billing: BillingDetails {
                name: format!("{} {}", self.data.first_name, self.data.last_name),
                email: self.data.email.clone(),
            },
            first_name: self.data.first_name.clone(),
            last_name: self.data.last_name.clone(),
            idempotency_key: Uuid::new_v4().to_string(),
        })
    }

    /// Unlocks the form and shows `message`; a successful donation clears the inputs.
    pub fn finish_submit(&mut self, message: FormMessage) {
        if message.is_success() {
            self.data = DonationFormData::default();
        }
        self.is_processing = false;
        self.message = Some(message);
    }

    /// Unlocks the form after a [`PendingDonation`] was dropped unsent.
    pub fn cancel_submit(&mut self) {
        self.is_processing = false;
    }

    pub async fn submit<T, S>(&mut self, tokenizer: &T, submitter: &S)
    where
        T: PaymentTokenizer,
        S: DonationSubmitter,
    {
        let Some(pending) = self.begin_submit(tokenizer) else {
            return;
        };
        let message = pending.send(tokenizer, submitter).await;
        self.finish_submit(message);
    }
}

/// A validated submission that has not been sent yet.
#[derive(Debug, Clone)]
pub struct PendingDonation {
    form_id: u64,
    amount: Decimal,
    billing: BillingDetails,
    first_name: String,
    last_name: String,
    idempotency_key: String,
}

impl PendingDonation {
    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn billing(&self) -> &BillingDetails {
        &self.billing
    }

    /// One tokenization call, then at most one submission call.
    pub async fn send<T, S>(self, tokenizer: &T, submitter: &S) -> FormMessage
    where
        T: PaymentTokenizer,
        S: DonationSubmitter,
    {
        let payment_method = match tokenizer.create_payment_method(&self.billing).await {
            Ok(method) => method,
            Err(TokenizationError::Declined(message)) if !message.is_empty() => {
                return FormMessage::error(message);
            }
            Err(_) => return FormMessage::error(PAYMENT_METHOD_FAILED),
        };

        let request = DonationRequest::new(
            self.form_id,
            self.amount,
            self.first_name,
            self.last_name,
            self.billing.email,
            payment_method.id,
        )
        .with_idempotency_key(self.idempotency_key);

        match submitter.submit(&request).await {
            Ok(envelope) if envelope.success => {
                info!("Donation accepted for form {}", self.form_id);
                FormMessage::success(DONATION_THANKS)
            }
            Ok(envelope) => FormMessage::error(
                envelope
                    .error
                    .filter(|e| !e.is_empty())
                    .unwrap_or_else(|| DONATION_FAILED.to_string()),
            ),
            Err(e) => {
                error!("Donation error: {}", e);
                FormMessage::error(UNEXPECTED_ERROR)
            }
        }
    }
}

fn parse_amount(raw: &str) -> Option<Decimal> {
    let value = raw.trim().parse::<f64>().ok()?;
    if value.is_nan() || value < 1.0 {
        return None;
    }
    Decimal::from_f64(value)
}
