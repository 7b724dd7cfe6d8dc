use serde::Serialize;

pub const DEFAULT_AMOUNT_CENTS: u64 = 2500;
pub const DEFAULT_CURRENCY: &str = "usd";

/// Bootstrap data the browser needs to mount the payment element.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DonationFormConfig {
    pub publishable_key: String,
    pub form_id: u64,
    pub elements: PaymentElementOptions,
}

#[derive(Debug, Clone, Serialize)]
pub struct PaymentElementOptions {
    pub mode: &'static str,
    pub amount: u64,
    pub currency: &'static str,
    pub appearance: Appearance,
}

#[derive(Debug, Clone, Serialize)]
pub struct Appearance {
    pub theme: &'static str,
}

impl Default for PaymentElementOptions {
    fn default() -> Self {
        Self {
            mode: "payment",
            amount: DEFAULT_AMOUNT_CENTS,
            currency: DEFAULT_CURRENCY,
            appearance: Appearance { theme: "stripe" },
        }
    }
}

impl DonationFormConfig {
    pub fn new(publishable_key: String, form_id: u64) -> Self {
        Self {
            publishable_key,
            form_id,
            elements: PaymentElementOptions::default(),
        }
    }
}
