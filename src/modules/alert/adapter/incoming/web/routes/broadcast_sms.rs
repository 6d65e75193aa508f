use actix_web::{post, web, Responder};
use tracing::error;

use crate::alert::application::domain::notification::BroadcastInput;
use crate::alert::application::ports::incoming::use_cases::{BroadcastReceipt, BroadcastSmsError};
use crate::api::schemas::ErrorResponse;
use crate::auth::adapter::incoming::web::extractors::AuthenticatedUser;
use crate::shared::api::ApiResponse;
use crate::AppState;

/// Send an SMS alert to subscribers in the selected regions
#[utoipa::path(
    post,
    path = "/api/notifications/sms",
    tag = "notifications",
    security(("bearer_auth" = [])),
    request_body = BroadcastInput,
    responses(
        (status = 200, description = "Broadcast sent", body = BroadcastReceipt),
        (status = 400, description = "Missing message, level or region", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Caller may not broadcast", body = ErrorResponse),
        (status = 500, description = "Gateway failure", body = ErrorResponse),
    )
)]
#[post("/api/notifications/sms")]
pub async fn broadcast_sms_handler(
    user: AuthenticatedUser,
    body: web::Json<BroadcastInput>,
    data: web::Data<AppState>,
) -> impl Responder {
    match data
        .alert
        .broadcast_sms
        .execute(user.actor(), body.into_inner())
        .await
    {
        Ok(receipt) => ApiResponse::success(receipt),
        Err(e @ BroadcastSmsError::Forbidden) => ApiResponse::forbidden("FORBIDDEN", &e.to_string()),
        Err(BroadcastSmsError::Validation(e)) => {
            ApiResponse::bad_request("VALIDATION_ERROR", &e.to_string())
        }
        Err(BroadcastSmsError::GatewayError(e)) => {
            error!(user_id = %user.user_id, error = %e, "SMS broadcast failed");
            ApiResponse::internal_error()
        }
    }
}
