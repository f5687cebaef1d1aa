use actix_web::{web, HttpResponse};
use validator::Validate;

use msg_core::services::verification::{ChannelResolver, CodeStore};

use crate::app::AppState;
use crate::dto::{GenerateCodeRequest, StatusResponse};
use crate::handlers::error::ApiError;

/// Handler for POST /api/v1/verification/generate
///
/// Generates a code for the identifier and delivers it by SMS, or by email
/// through the provider named in the request.
///
/// # Request Body
///
/// ```json
/// {
///     "identifier": "user@example.com",
///     "purpose": 1,
///     "email_provider": {
///         "provider": "postmark",
///         "api_key": "server-token",
///         "sender": "noreply@example.com"
///     }
/// }
/// ```
///
/// # Response
///
/// Always 200 for policy outcomes:
/// ```json
/// { "status": "Done", "code": 0, "message": "Done" }
/// { "status": "TooFrequent", "code": 1102, "message": "too frequently sending code" }
/// ```
pub async fn generate<S, R>(
    state: web::Data<AppState<S, R>>,
    request: web::Json<GenerateCodeRequest>,
) -> Result<HttpResponse, ApiError>
where
    S: CodeStore + 'static,
    R: ChannelResolver + 'static,
{
    let request = request.into_inner();
    request.validate()?;

    let status = state
        .verification_service
        .generate_and_send(request.into_domain()?)
        .await?;

    Ok(HttpResponse::Ok().json(StatusResponse::from(status)))
}
