//! Application state and factory
//!
//! This module holds the shared state handed to every handler and builds
//! the actix-web application around it.

use std::sync::Arc;

use actix_web::{web, App, HttpResponse};
use tracing_actix_web::TracingLogger;

use msg_core::services::verification::{ChannelResolver, CodeStore, VerificationService};
use msg_shared::{error_codes, ErrorResponse};

use crate::handlers::error::ApiError;
use crate::routes::email::send_with_attachment;
use crate::routes::verification::{generate, validate};

/// Application state that holds shared services
pub struct AppState<S, R>
where
    S: CodeStore,
    R: ChannelResolver,
{
    pub verification_service: Arc<VerificationService<S, R>>,
}

impl<S: CodeStore, R: ChannelResolver> AppState<S, R> {
    pub fn new(verification_service: Arc<VerificationService<S, R>>) -> Self {
        Self {
            verification_service,
        }
    }
}

/// Create and configure the application with all dependencies
///
/// `json_limit` bounds request bodies; attachments travel inline as base64
/// so it is usually raised well above actix's default.
pub fn create_app<S, R>(
    app_state: web::Data<AppState<S, R>>,
    json_limit: usize,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse<
            impl actix_web::body::MessageBody,
        >,
        Error = actix_web::Error,
        InitError = (),
    >,
>
where
    S: CodeStore + 'static,
    R: ChannelResolver + 'static,
{
    App::new()
        .app_data(app_state)
        .app_data(json_config(json_limit))
        .wrap(TracingLogger::default())
        .route("/health", web::get().to(health_check))
        .service(
            web::scope("/api/v1")
                .service(
                    web::scope("/verification")
                        .route("/generate", web::post().to(generate::<S, R>))
                        .route("/validate", web::post().to(validate::<S, R>)),
                )
                .service(
                    web::scope("/email")
                        .route("/attachment", web::post().to(send_with_attachment::<S, R>)),
                )
                .route("/", web::get().to(api_documentation)),
        )
        .default_service(web::route().to(not_found))
}

/// Malformed JSON is answered with the same error envelope as everything else
pub fn json_config(limit: usize) -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(limit)
        .error_handler(|err, _req| ApiError::BadRequest(err.to_string()).into())
}

/// Health check endpoint
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "messaging-api",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// API documentation endpoint
async fn api_documentation() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "message": "Messaging API v1",
        "endpoints": {
            "health": "/health",
            "verification": {
                "generate": {
                    "path": "/api/v1/verification/generate",
                    "method": "POST",
                    "description": "Generate a one-time code and deliver it by SMS or email",
                    "request_body": {
                        "identifier": "string, phone number or email address",
                        "purpose": "integer 0-3 (optional)",
                        "template": "string (optional)",
                        "subject": "string (optional)",
                        "email_provider": "{provider, api_key, sender} (required for email)"
                    },
                    "responses": {
                        "200": "Status body, code 0 or 1102",
                        "400": "Invalid request or provider configuration",
                        "502": "Delivery failed",
                        "503": "Code store unavailable"
                    }
                },
                "validate": {
                    "path": "/api/v1/verification/validate",
                    "method": "POST",
                    "description": "Check a supplied code",
                    "request_body": {
                        "identifier": "string",
                        "code": "string"
                    },
                    "responses": {
                        "200": "Status body, code 0, 1100, 1101 or 1104",
                        "400": "Invalid request",
                        "503": "Code store unavailable"
                    }
                }
            },
            "email": {
                "attachment": {
                    "path": "/api/v1/email/attachment",
                    "method": "POST",
                    "description": "Send an email with base64 attachments",
                    "responses": {
                        "200": "{success: true}",
                        "400": "Invalid request or provider configuration",
                        "502": "Delivery failed"
                    }
                }
            }
        }
    }))
}

/// Default 404 handler
async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse::new(
        error_codes::NOT_FOUND,
        "The requested resource was not found",
    ))
}
