use actix_web::{web, HttpResponse};
use validator::Validate;

use msg_core::services::verification::{ChannelResolver, CodeStore};

use crate::app::AppState;
use crate::dto::{AttachmentEmailRequest, SendResponse};
use crate::handlers::error::ApiError;

/// Handler for POST /api/v1/email/attachment
///
/// Sends an HTML email with base64 attachments through the provider named in
/// the request. Returns `{"success": true}` once the vendor accepted it.
pub async fn send_with_attachment<S, R>(
    state: web::Data<AppState<S, R>>,
    request: web::Json<AttachmentEmailRequest>,
) -> Result<HttpResponse, ApiError>
where
    S: CodeStore + 'static,
    R: ChannelResolver + 'static,
{
    let request = request.into_inner();
    request.validate()?;

    state
        .verification_service
        .send_email_with_attachment(request.into_domain()?)
        .await?;

    Ok(HttpResponse::Ok().json(SendResponse { success: true }))
}
