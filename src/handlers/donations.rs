use crate::{
    models::donation::DonationError,
    requests::donation::DonationRequest,
    services::givewp::GatewayError,
    state::AppState,
    utils::helpers::ApiResponse,
};
use actix_web::{HttpResponse, Result, web};
use tracing::{error, info, warn};

pub const MISSING_FIELDS: &str = "Missing required fields";
pub const CONFIGURATION_ERROR: &str = "Server configuration error";
pub const PROCESSING_FAILED: &str = "Payment processing failed";
pub const INTERNAL_ERROR: &str = "Internal server error";

pub async fn submit(
    state: web::Data<AppState>,
    request: web::Json<DonationRequest>,
) -> Result<HttpResponse> {
    let request = request.into_inner();

    let payload = match request.validate() {
        Ok(payload) => payload,
        Err(e @ DonationError::MissingFields) => {
            warn!("Rejected donation: {}", e);
            return Ok(HttpResponse::BadRequest()
                .json(ApiResponse::<()>::error(MISSING_FIELDS.to_string())));
        }
        Err(e) => {
            warn!("Rejected donation: {}", e);
            return Ok(HttpResponse::BadRequest().json(ApiResponse::<()>::error(e.to_string())));
        }
    };

    let Some(gateway) = state.gateway.as_ref() else {
        error!("Missing GiveWP environment variables");
        return Ok(HttpResponse::InternalServerError()
            .json(ApiResponse::<()>::error(CONFIGURATION_ERROR.to_string())));
    };

    info!(
        "Submitting donation of {} for form {}",
        payload.amount, payload.form_id
    );

    match gateway
        .create_donation(&payload, request.idempotency_key())
        .await
    {
        Ok(donation) => {
            info!("Donation recorded for form {}", payload.form_id);
            Ok(HttpResponse::Ok().json(ApiResponse::<()>::donation(donation)))
        }
        Err(GatewayError::Rejected { status, body }) => {
            error!("GiveWP API error ({}): {}", status, body);
            Ok(HttpResponse::InternalServerError()
                .json(ApiResponse::<()>::error(PROCESSING_FAILED.to_string())))
        }
        Err(e) => {
            error!("Donation submission error: {}", e);
            Ok(HttpResponse::InternalServerError()
                .json(ApiResponse::<()>::error(INTERNAL_ERROR.to_string())))
        }
    }
}

pub async fn form_config(state: web::Data<AppState>) -> Result<HttpResponse> {
    Ok(HttpResponse::Ok().json(ApiResponse::success(state.form.clone())))
}
