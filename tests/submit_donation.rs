use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use actix_web::{App, http::StatusCode, test, web};
use async_trait::async_trait;
use rust_decimal::Decimal;
use serde_json::{Value, json};

use donation_portal::{
    AppState,
    models::{donation::DonationPayload, form::DonationFormConfig},
    routes,
    services::givewp::{DonationGateway, GatewayError},
};

enum Reply {
    Recorded(Value),
    Rejected(u16, &'static str),
    Unreadable,
}

struct StubGateway {
    reply: Reply,
    calls: AtomicUsize,
    last: Mutex<Option<(DonationPayload, Option<String>)>>,
}

impl StubGateway {
    fn new(reply: Reply) -> Arc<Self> {
        Arc::new(Self {
            reply,
            calls: AtomicUsize::new(0),
            last: Mutex::new(None),
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn last(&self) -> (DonationPayload, Option<String>) {
        self.last.lock().unwrap().clone().expect("gateway was not called")
    }
}

#[async_trait]
impl DonationGateway for StubGateway {
    async fn create_donation(
        &self,
        payload: &DonationPayload,
        idempotency_key: Option<&str>,
    ) -> Result<Value, GatewayError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last.lock().unwrap() = Some((payload.clone(), idempotency_key.map(str::to_string)));

        match &self.reply {
            Reply::Recorded(body) => Ok(body.clone()),
            Reply::Rejected(status, body) => Err(GatewayError::Rejected {
                status: *status,
                body: body.to_string(),
            }),
            Reply::Unreadable => Err(GatewayError::InvalidResponse("expected value".to_string())),
        }
    }
}

fn state_with(gateway: Option<Arc<StubGateway>>) -> AppState {
    AppState::new(
        gateway.map(|g| g as Arc<dyn DonationGateway>),
        DonationFormConfig::new("pk_test_123".to_string(), 4),
    )
}

fn valid_body() -> Value {
    json!({
        "formId": 1,
        "amount": 50,
        "firstName": "Jane",
        "lastName": "Doe",
        "email": "jane@x.com",
        "paymentMethodId": "pm_123"
    })
}

async fn post_raw(state: AppState, body: String) -> (StatusCode, Value) {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .configure(routes::api::scoped_config),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/api/submit-donation")
        .insert_header(("Content-Type", "application/json"))
        .set_payload(body)
        .to_request();
    let resp = test::call_service(&app, req).await;
    let status = resp.status();
    let body: Value = test::read_body_json(resp).await;
    (status, body)
}

async fn post(state: AppState, body: Value) -> (StatusCode, Value) {
    post_raw(state, body.to_string()).await
}

#[actix_rt::test]
async fn records_donation_and_embeds_upstream_body() {
    let upstream = json!({ "id": 981, "status": "publish", "total": "50.00" });
    let gateway = StubGateway::new(Reply::Recorded(upstream.clone()));

    let (status, body) = post(state_with(Some(gateway.clone())), valid_body()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "success": true, "donation": upstream }));
    assert_eq!(gateway.calls(), 1);

    let (payload, key) = gateway.last();
    assert_eq!(payload.form_id, 1);
    assert_eq!(payload.amount, Decimal::from(50));
    assert_eq!(payload.donor.first_name, "Jane");
    assert_eq!(payload.donor.last_name, "Doe");
    assert_eq!(payload.donor.email, "jane@x.com");
    assert_eq!(payload.payment.gateway, "stripe");
    assert_eq!(payload.payment.method, "card");
    assert_eq!(payload.payment.stripe_payment_method_id, "pm_123");
    assert_eq!(key, None);
}

#[actix_rt::test]
async fn each_missing_field_is_rejected_without_relaying() {
    for field in ["formId", "amount", "firstName", "lastName", "email", "paymentMethodId"] {
        let gateway = StubGateway::new(Reply::Recorded(json!({})));
        let mut body = valid_body();
        body.as_object_mut().unwrap().remove(field);

        let (status, body) = post(state_with(Some(gateway.clone())), body).await;

        assert_eq!(status, StatusCode::BAD_REQUEST, "field {field}");
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "Missing required fields");
        assert_eq!(gateway.calls(), 0);
    }
}

#[actix_rt::test]
async fn zero_amount_counts_as_missing() {
    let gateway = StubGateway::new(Reply::Recorded(json!({})));
    let mut body = valid_body();
    body["amount"] = json!(0);

    let (status, body) = post(state_with(Some(gateway.clone())), body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Missing required fields");
    assert_eq!(gateway.calls(), 0);
}

#[actix_rt::test]
async fn amount_below_one_is_rejected() {
    let gateway = StubGateway::new(Reply::Recorded(json!({})));
    let mut body = valid_body();
    body["amount"] = json!(0.5);

    let (status, body) = post(state_with(Some(gateway.clone())), body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Invalid donation amount");
    assert_eq!(gateway.calls(), 0);
}

#[actix_rt::test]
async fn missing_configuration_never_reaches_upstream() {
    let (status, body) = post(state_with(None), valid_body()).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "success": false, "error": "Server configuration error" }));
}

#[actix_rt::test]
async fn upstream_rejection_is_not_leaked() {
    for (code, detail) in [(422, "card_declined: insufficient funds"), (503, "maintenance")] {
        let gateway = StubGateway::new(Reply::Rejected(code, detail));

        let (status, body) = post(state_with(Some(gateway.clone())), valid_body()).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({ "success": false, "error": "Payment processing failed" }));
        assert!(!body.to_string().contains(detail));
        assert_eq!(gateway.calls(), 1);
    }
}

#[actix_rt::test]
async fn unreadable_upstream_body_is_an_internal_error() {
    let gateway = StubGateway::new(Reply::Unreadable);

    let (status, body) = post(state_with(Some(gateway)), valid_body()).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "success": false, "error": "Internal server error" }));
}

#[actix_rt::test]
async fn malformed_json_is_an_internal_error() {
    let gateway = StubGateway::new(Reply::Recorded(json!({})));

    let (status, body) =
        post_raw(state_with(Some(gateway.clone())), "{\"formId\": 1,".to_string()).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "success": false, "error": "Internal server error" }));
    assert_eq!(gateway.calls(), 0);
}

#[actix_rt::test]
async fn fractional_amount_stays_a_number() {
    let gateway = StubGateway::new(Reply::Recorded(json!({ "id": 1 })));
    let mut body = valid_body();
    body["amount"] = json!(25.5);

    let (status, _) = post(state_with(Some(gateway.clone())), body).await;

    assert_eq!(status, StatusCode::OK);
    let (payload, _) = gateway.last();
    assert_eq!(payload.amount, Decimal::new(255, 1));
    assert_eq!(serde_json::to_value(&payload).unwrap()["amount"], json!(25.5));
}

#[actix_rt::test]
async fn idempotency_key_is_passed_to_gateway() {
    let gateway = StubGateway::new(Reply::Recorded(json!({ "id": 2 })));
    let mut body = valid_body();
    body["idempotencyKey"] = json!("6f1c2a4e-0d7b-4e8e-9d0a-3b1f5c2e7a90");

    let (status, _) = post(state_with(Some(gateway.clone())), body).await;

    assert_eq!(status, StatusCode::OK);
    let (_, key) = gateway.last();
    assert_eq!(key.as_deref(), Some("6f1c2a4e-0d7b-4e8e-9d0a-3b1f5c2e7a90"));
}

#[actix_rt::test]
async fn form_config_publishes_widget_options() {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state_with(None)))
            .configure(routes::api::scoped_config),
    )
    .await;

    let req = test::TestRequest::get().uri("/api/donation-form").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(
        body,
        json!({
            "success": true,
            "data": {
                "publishableKey": "pk_test_123",
                "formId": 4,
                "elements": {
                    "mode": "payment",
                    "amount": 2500,
                    "currency": "usd",
                    "appearance": { "theme": "stripe" }
                }
            }
        })
    );
}
