use actix_web::{web, HttpResponse};
use validator::Validate;

use msg_core::domain::value_objects::Identifier;
use msg_core::services::verification::{ChannelResolver, CodeStore};

use crate::app::AppState;
use crate::dto::{StatusResponse, ValidateCodeRequest};
use crate::handlers::error::ApiError;

/// Handler for POST /api/v1/verification/validate
///
/// Expired, wrong and exhausted codes are answered with 200 and the matching
/// status code (1100, 1101, 1104); only store failures produce an error status.
pub async fn validate<S, R>(
    state: web::Data<AppState<S, R>>,
    request: web::Json<ValidateCodeRequest>,
) -> Result<HttpResponse, ApiError>
where
    S: CodeStore + 'static,
    R: ChannelResolver + 'static,
{
    let request = request.into_inner();
    request.validate()?;

    let identifier = Identifier::new(&request.identifier);
    let status = state
        .verification_service
        .validate(&identifier, &request.code)
        .await?;

    Ok(HttpResponse::Ok().json(StatusResponse::from(status)))
}
