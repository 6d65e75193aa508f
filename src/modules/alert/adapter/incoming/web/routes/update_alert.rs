use actix_web::{put, web, Responder};
use serde_json::{Map, Value};
use tracing::error;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::alert::application::domain::entities::Alert;
use crate::alert::application::domain::patch::{PatchError, StatusPatch};
use crate::alert::application::ports::incoming::use_cases::UpdateAlertStatusError;
use crate::api::schemas::ErrorResponse;
use crate::auth::adapter::incoming::web::extractors::AuthenticatedUser;
use crate::shared::api::ApiResponse;
use crate::AppState;

/// Documented shape of the update body. The handler reads the raw object so
/// that foreign keys can be reported precisely.
#[derive(ToSchema)]
#[allow(dead_code)]
pub struct StatusPatchBody {
    /// `verified` | `dismissed`
    #[schema(example = "verified")]
    status: String,
}

/// Verify or dismiss a pending alert
///
/// The body may only carry `status`. Any other alert field is rejected
/// with `IMMUTABLE_FIELD`, even when the value is unchanged.
#[utoipa::path(
    put,
    path = "/api/alerts/{alert_id}",
    tag = "alerts",
    security(("bearer_auth" = [])),
    params(("alert_id" = Uuid, Path, description = "Alert id")),
    request_body = StatusPatchBody,
    responses(
        (status = 200, description = "Updated alert", body = Alert),
        (status = 400, description = "Immutable field or bad status", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Caller may not review alerts", body = ErrorResponse),
        (status = 404, description = "No such alert", body = ErrorResponse),
        (status = 409, description = "Alert is no longer pending", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
#[put("/api/alerts/{alert_id}")]
pub async fn update_alert_handler(
    user: AuthenticatedUser,
    alert_id: web::Path<Uuid>,
    body: web::Json<Map<String, Value>>,
    data: web::Data<AppState>,
) -> impl Responder {
    let alert_id = alert_id.into_inner();

    let patch = match StatusPatch::from_json(&body) {
        Ok(patch) => patch,
        Err(e @ PatchError::ImmutableField(_)) => {
            return ApiResponse::bad_request("IMMUTABLE_FIELD", &e.to_string())
        }
        Err(e) => return ApiResponse::bad_request("VALIDATION_ERROR", &e.to_string()),
    };

    match data
        .alert
        .update_status
        .execute(user.actor(), alert_id, patch)
        .await
    {
        Ok(alert) => ApiResponse::success(alert),
        Err(UpdateAlertStatusError::NotFound) => {
            ApiResponse::not_found("ALERT_NOT_FOUND", "Alert not found")
        }
        Err(e @ UpdateAlertStatusError::Forbidden(_)) => {
            ApiResponse::forbidden("FORBIDDEN", &e.to_string())
        }
        Err(e @ UpdateAlertStatusError::InvalidTransition { .. }) => {
            ApiResponse::conflict("INVALID_TRANSITION", &e.to_string())
        }
        Err(UpdateAlertStatusError::RepositoryError(e)) => {
            error!(%alert_id, error = %e, "Failed to update alert status");
            ApiResponse::internal_error()
        }
    }
}
