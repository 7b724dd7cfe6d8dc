use actix_web::HttpResponse;
use serde::Serialize;
use serde_json::Value;

#[derive(Serialize, Debug)]
pub struct ApiResponse<T> {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    donation: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            donation: None,
            error: None,
        }
    }

    /// Envelope for a donation recorded upstream; the platform's body is passed through untouched.
    pub fn donation(donation: Value) -> ApiResponse<()> {
        ApiResponse {
            success: true,
            data: None,
            donation: Some(donation),
            error: None,
        }
    }

    pub fn error(message: String) -> ApiResponse<()> {
        ApiResponse {
            success: false,
            data: None,
            donation: None,
            error: Some(message),
        }
    }
}

impl ApiResponse<()> {
    pub fn to_response(&self, status: actix_web::http::StatusCode) -> HttpResponse {
        HttpResponse::build(status).json(self)
    }
}
