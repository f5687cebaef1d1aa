//! Route tests for code generation and validation

mod common;

use actix_web::{http::StatusCode, test};
use serde_json::{json, Value};

use common::{fixture, fixture_with, postmark_provider, JSON_LIMIT};
use msg_api::app::create_app;
use msg_core::services::verification::BypassPolicy;

macro_rules! post_json {
    ($app:expr, $uri:expr, $body:expr) => {{
        let req = test::TestRequest::post()
            .uri($uri)
            .set_json(&$body)
            .to_request();
        test::call_service(&$app, req).await
    }};
}

const GENERATE: &str = "/api/v1/verification/generate";
const VALIDATE: &str = "/api/v1/verification/validate";

#[actix_rt::test]
async fn test_health_check() {
    let fx = fixture();
    let app = test::init_service(create_app(fx.state.clone(), JSON_LIMIT)).await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "healthy");
    assert!(body["version"].is_string());
}

#[actix_rt::test]
async fn test_generate_sms_then_validate() {
    let fx = fixture();
    let app = test::init_service(create_app(fx.state.clone(), JSON_LIMIT)).await;

    let resp = post_json!(
        app,
        GENERATE,
        json!({ "identifier": "+8613812345678", "template": "{{.Code}}" })
    );
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({ "status": "Done", "code": 0, "message": "Done" }));

    let sent = fx.outbox.lock().unwrap().clone();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].provider, "sms");
    assert_eq!(sent[0].destination, "+8613812345678");
    let code = sent[0].body.clone();
    assert_eq!(code.len(), 4);

    let resp = post_json!(
        app,
        VALIDATE,
        json!({ "identifier": "+8613812345678", "code": code })
    );
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "Valid");
    assert_eq!(body["code"], 0);
    assert_eq!(body["message"], "Verified");

    // The code is consumed on success
    assert!(fx.store.is_empty());
}

#[actix_rt::test]
async fn test_generate_default_sms_message_uses_purpose() {
    let fx = fixture();
    let app = test::init_service(create_app(fx.state.clone(), JSON_LIMIT)).await;

    let resp = post_json!(app, GENERATE, json!({ "identifier": "+61412345678", "purpose": 1 }));
    assert_eq!(resp.status(), StatusCode::OK);

    let sent = fx.outbox.lock().unwrap().clone();
    assert!(sent[0].body.starts_with("Acme login code: "));
}

#[actix_rt::test]
async fn test_generate_twice_is_too_frequent() {
    let fx = fixture();
    let app = test::init_service(create_app(fx.state.clone(), JSON_LIMIT)).await;

    let first = post_json!(app, GENERATE, json!({ "identifier": "+8613812345678" }));
    assert_eq!(first.status(), StatusCode::OK);

    let second = post_json!(app, GENERATE, json!({ "identifier": "+8613812345678" }));
    assert_eq!(second.status(), StatusCode::OK);
    let body: Value = test::read_body_json(second).await;
    assert_eq!(body["status"], "TooFrequent");
    assert_eq!(body["code"], 1102);
    assert_eq!(body["message"], "too frequently sending code");

    assert_eq!(fx.outbox.lock().unwrap().len(), 1);
}

#[actix_rt::test]
async fn test_generate_email_through_postmark() {
    let fx = fixture();
    let app = test::init_service(create_app(fx.state.clone(), JSON_LIMIT)).await;

    let resp = post_json!(
        app,
        GENERATE,
        json!({
            "identifier": "User@Example.com",
            "subject": "Your code",
            "email_provider": postmark_provider()
        })
    );
    assert_eq!(resp.status(), StatusCode::OK);

    let sent = fx.outbox.lock().unwrap().clone();
    assert_eq!(sent[0].provider, "postmark");
    assert_eq!(sent[0].destination, "User@Example.com");
    assert_eq!(sent[0].subject, "Your code");
    assert!(sent[0].body.contains("<strong>"));
}

#[actix_rt::test]
async fn test_generate_email_without_provider_is_config_error() {
    let fx = fixture();
    let app = test::init_service(create_app(fx.state.clone(), JSON_LIMIT)).await;

    let resp = post_json!(app, GENERATE, json!({ "identifier": "user@example.com" }));
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "CONFIG_ERROR");

    assert!(fx.outbox.lock().unwrap().is_empty());
    assert!(fx.store.is_empty());
}

#[actix_rt::test]
async fn test_generate_unknown_purpose_is_rejected() {
    let fx = fixture();
    let app = test::init_service(create_app(fx.state.clone(), JSON_LIMIT)).await;

    let resp = post_json!(app, GENERATE, json!({ "identifier": "+8613812345678", "purpose": 7 }));
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "VALIDATION_ERROR");
}

#[actix_rt::test]
async fn test_generate_bad_template_stores_nothing() {
    let fx = fixture();
    let app = test::init_service(create_app(fx.state.clone(), JSON_LIMIT)).await;

    let resp = post_json!(
        app,
        GENERATE,
        json!({ "identifier": "+8613812345678", "template": "Code {{.Code" })
    );
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "TEMPLATE_ERROR");
    assert!(fx.store.is_empty());
}

#[actix_rt::test]
async fn test_generate_delivery_failure_is_bad_gateway() {
    let fx = fixture_with(BypassPolicy::disabled(), true);
    let app = test::init_service(create_app(fx.state.clone(), JSON_LIMIT)).await;

    let resp = post_json!(app, GENERATE, json!({ "identifier": "+8613812345678" }));
    assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "DELIVERY_FAILED");

    // Nothing stored, so an immediate retry is not throttled
    assert!(fx.store.is_empty());
}

#[actix_rt::test]
async fn test_generate_empty_identifier_fails_validation() {
    let fx = fixture();
    let app = test::init_service(create_app(fx.state.clone(), JSON_LIMIT)).await;

    let resp = post_json!(app, GENERATE, json!({ "identifier": "" }));
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "VALIDATION_ERROR");
    assert!(body["details"]["identifier"].is_array());
}

#[actix_rt::test]
async fn test_malformed_json_is_bad_request() {
    let fx = fixture();
    let app = test::init_service(create_app(fx.state.clone(), JSON_LIMIT)).await;

    let req = test::TestRequest::post()
        .uri(GENERATE)
        .insert_header(("content-type", "application/json"))
        .set_payload("{\"identifier\": ")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "BAD_REQUEST");
}

#[actix_rt::test]
async fn test_validate_without_code_is_expired() {
    let fx = fixture();
    let app = test::init_service(create_app(fx.state.clone(), JSON_LIMIT)).await;

    let resp = post_json!(
        app,
        VALIDATE,
        json!({ "identifier": "+8613812345678", "code": "1234" })
    );
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "Expired");
    assert_eq!(body["code"], 1100);
}

#[actix_rt::test]
async fn test_validate_wrong_code_until_maximum_attempts() {
    let fx = fixture();
    let app = test::init_service(create_app(fx.state.clone(), JSON_LIMIT)).await;

    post_json!(app, GENERATE, json!({ "identifier": "+8613812345678" }));

    for _ in 0..3 {
        let resp = post_json!(
            app,
            VALIDATE,
            json!({ "identifier": "+8613812345678", "code": "0000" })
        );
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["code"], 1101);
    }

    let resp = post_json!(
        app,
        VALIDATE,
        json!({ "identifier": "+8613812345678", "code": "0000" })
    );
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "MaximumAttempts");
    assert_eq!(body["code"], 1104);

    let resp = post_json!(
        app,
        VALIDATE,
        json!({ "identifier": "+8613812345678", "code": "0000" })
    );
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], 1100);
}

#[actix_rt::test]
async fn test_validate_identifier_is_case_insensitive() {
    let fx = fixture();
    let app = test::init_service(create_app(fx.state.clone(), JSON_LIMIT)).await;

    post_json!(
        app,
        GENERATE,
        json!({
            "identifier": "Someone@Example.com",
            "template": "{{.Code}}",
            "email_provider": postmark_provider()
        })
    );
    let code = fx.outbox.lock().unwrap()[0].body.clone();

    let resp = post_json!(
        app,
        VALIDATE,
        json!({ "identifier": "someone@example.com", "code": code })
    );
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "Valid");
}

#[actix_rt::test]
async fn test_validate_bypass_code_skips_store() {
    let bypass = BypassPolicy::new(false, Vec::new(), None, Some("8888".to_string()));
    let fx = fixture_with(bypass, false);
    let app = test::init_service(create_app(fx.state.clone(), JSON_LIMIT)).await;

    let resp = post_json!(
        app,
        VALIDATE,
        json!({ "identifier": "+8613812345678", "code": "8888" })
    );
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "Valid");

    // Email identifiers are not covered by the phone bypass code
    let resp = post_json!(
        app,
        VALIDATE,
        json!({ "identifier": "user@example.com", "code": "8888" })
    );
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "Expired");
}

#[actix_rt::test]
async fn test_validate_code_too_long_fails_validation() {
    let fx = fixture();
    let app = test::init_service(create_app(fx.state.clone(), JSON_LIMIT)).await;

    let resp = post_json!(
        app,
        VALIDATE,
        json!({ "identifier": "+8613812345678", "code": "12345678901234567" })
    );
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_rt::test]
async fn test_validate_blank_identifier_is_rejected() {
    let fx = fixture();
    let app = test::init_service(create_app(fx.state.clone(), JSON_LIMIT)).await;

    let resp = post_json!(app, VALIDATE, json!({ "identifier": "   ", "code": "1234" }));
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "VALIDATION_ERROR");
}

#[actix_rt::test]
async fn test_unknown_route_is_not_found() {
    let fx = fixture();
    let app = test::init_service(create_app(fx.state.clone(), JSON_LIMIT)).await;

    let req = test::TestRequest::get().uri("/api/v1/nope").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "NOT_FOUND");
}
