use std::sync::Arc;

use tracing::{error, info};

use crate::config::{AppConfig, GiveWpConfig};
use crate::models::form::DonationFormConfig;
use crate::services::givewp::{DonationGateway, GiveWpClient};

/// Shared handler state, built once at startup.
#[derive(Clone)]
pub struct AppState {
    /// `None` when the GiveWP credentials were incomplete at startup.
    pub gateway: Option<Arc<dyn DonationGateway>>,
    pub form: DonationFormConfig,
}

impl AppState {
    pub fn new(gateway: Option<Arc<dyn DonationGateway>>, form: DonationFormConfig) -> Self {
        Self { gateway, form }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        let gateway = match GiveWpConfig::from_settings(config) {
            Ok(give) => {
                info!("Relaying donations to {}", give.base_url);
                match GiveWpClient::new(give) {
                    Ok(client) => Some(Arc::new(client) as Arc<dyn DonationGateway>),
                    Err(e) => {
                        error!("Failed to build GiveWP client: {}", e);
                        None
                    }
                }
            }
            Err(e) => {
                error!("Missing GiveWP configuration: {}", e);
                None
            }
        };

        let form = DonationFormConfig::new(
            config.public_stripe_publishable_key.clone(),
            config.donation_form_id,
        );

        Self::new(gateway, form)
    }
}
