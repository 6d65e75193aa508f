use actix_web::{post, web, Responder};
use serde::Deserialize;
use tracing::error;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::alert::application::ports::incoming::use_cases::{
    SubmitVerificationResultError, VerificationAck, VerificationResult,
};
use crate::api::schemas::ErrorResponse;
use crate::auth::adapter::incoming::web::extractors::AuthenticatedUser;
use crate::shared::api::ApiResponse;
use crate::AppState;

#[derive(Debug, Deserialize, ToSchema)]
pub struct VerificationResultDto {
    /// `true` verifies the alert, `false` dismisses it.
    pub verified: Option<bool>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Record the outcome of a drone verification
///
/// A result for an alert that another reviewer already resolved is
/// acknowledged with `applied: false` and changes nothing.
#[utoipa::path(
    post,
    path = "/api/alerts/{alert_id}/verification/result",
    tag = "verification",
    security(("bearer_auth" = [])),
    params(("alert_id" = Uuid, Path, description = "Alert id")),
    request_body = VerificationResultDto,
    responses(
        (status = 200, description = "Result acknowledged", body = VerificationAck),
        (status = 400, description = "Missing verdict", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Caller may not submit results", body = ErrorResponse),
        (status = 404, description = "No such alert", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
#[post("/api/alerts/{alert_id}/verification/result")]
pub async fn submit_verification_result_handler(
    user: AuthenticatedUser,
    alert_id: web::Path<Uuid>,
    body: web::Json<VerificationResultDto>,
    data: web::Data<AppState>,
) -> impl Responder {
    let alert_id = alert_id.into_inner();
    let body = body.into_inner();

    let Some(verified) = body.verified else {
        return ApiResponse::bad_request("VALIDATION_ERROR", "verified is required");
    };
    let result = VerificationResult {
        verified,
        notes: body.notes.unwrap_or_default(),
    };

    match data
        .alert
        .submit_verification_result
        .execute(user.actor(), alert_id, result)
        .await
    {
        Ok(ack) => ApiResponse::success(ack),
        Err(SubmitVerificationResultError::NotFound) => {
            ApiResponse::not_found("ALERT_NOT_FOUND", "Alert not found")
        }
        Err(e @ SubmitVerificationResultError::Forbidden) => {
            ApiResponse::forbidden("FORBIDDEN", &e.to_string())
        }
        Err(SubmitVerificationResultError::RepositoryError(e)) => {
            error!(%alert_id, error = %e, "Failed to apply verification result");
            ApiResponse::internal_error()
        }
    }
}
