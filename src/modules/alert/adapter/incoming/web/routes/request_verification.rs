use actix_web::{post, web, Responder};
use serde::Deserialize;
use tracing::error;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::alert::application::domain::notification::DroneTeam;
use crate::alert::application::ports::incoming::use_cases::RequestVerificationError;
use crate::alert::application::ports::outgoing::DispatchReceipt;
use crate::api::schemas::ErrorResponse;
use crate::auth::adapter::incoming::web::extractors::AuthenticatedUser;
use crate::shared::api::ApiResponse;
use crate::AppState;

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct VerificationRequestDto {
    /// `unmiss` (default) | `county` | `police`
    #[serde(default)]
    #[schema(example = "unmiss")]
    pub team: Option<String>,
}

/// Dispatch a drone team to verify a pending alert
///
/// Repeating the request while one is outstanding returns the original
/// receipt without a second dispatch.
#[utoipa::path(
    post,
    path = "/api/alerts/{alert_id}/verification",
    tag = "verification",
    security(("bearer_auth" = [])),
    params(("alert_id" = Uuid, Path, description = "Alert id")),
    request_body = VerificationRequestDto,
    responses(
        (status = 202, description = "Dispatch accepted", body = DispatchReceipt),
        (status = 400, description = "Unknown drone team", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Caller may not request verification", body = ErrorResponse),
        (status = 404, description = "No such alert", body = ErrorResponse),
        (status = 409, description = "Alert is no longer pending", body = ErrorResponse),
        (status = 500, description = "Dispatcher or storage failure", body = ErrorResponse),
    )
)]
#[post("/api/alerts/{alert_id}/verification")]
pub async fn request_verification_handler(
    user: AuthenticatedUser,
    alert_id: web::Path<Uuid>,
    body: web::Json<VerificationRequestDto>,
    data: web::Data<AppState>,
) -> impl Responder {
    let alert_id = alert_id.into_inner();

    let team = match body.into_inner().team.as_deref().map(str::parse::<DroneTeam>) {
        None => DroneTeam::default(),
        Some(Ok(team)) => team,
        Some(Err(e)) => {
            return ApiResponse::bad_request(
                "VALIDATION_ERROR",
                &format!("team must be one of unmiss, county, police (got '{}')", e.0),
            )
        }
    };

    match data
        .alert
        .request_verification
        .execute(user.actor(), alert_id, team)
        .await
    {
        Ok(receipt) => ApiResponse::accepted(receipt),
        Err(RequestVerificationError::NotFound) => {
            ApiResponse::not_found("ALERT_NOT_FOUND", "Alert not found")
        }
        Err(e @ RequestVerificationError::Forbidden) => {
            ApiResponse::forbidden("FORBIDDEN", &e.to_string())
        }
        Err(e @ RequestVerificationError::NotPending { .. }) => {
            ApiResponse::conflict("INVALID_TRANSITION", &e.to_string())
        }
        Err(e @ RequestVerificationError::DispatchFailed(_)) => {
            error!(%alert_id, %team, error = %e, "Drone dispatch failed");
            ApiResponse::internal_error()
        }
        Err(RequestVerificationError::RepositoryError(e)) => {
            error!(%alert_id, error = %e, "Failed to load alert for verification");
            ApiResponse::internal_error()
        }
    }
}
