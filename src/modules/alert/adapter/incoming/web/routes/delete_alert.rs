use actix_web::{delete, web, Responder};
use tracing::error;
use uuid::Uuid;

use crate::alert::application::ports::incoming::use_cases::DeleteAlertError;
use crate::api::schemas::ErrorResponse;
use crate::auth::adapter::incoming::web::extractors::AuthenticatedUser;
use crate::shared::api::ApiResponse;
use crate::AppState;

#[utoipa::path(
    delete,
    path = "/api/alerts/{alert_id}",
    tag = "alerts",
    security(("bearer_auth" = [])),
    params(("alert_id" = Uuid, Path, description = "Alert id")),
    responses(
        (status = 204, description = "Alert deleted"),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Caller is not an admin", body = ErrorResponse),
        (status = 404, description = "No such alert", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
#[delete("/api/alerts/{alert_id}")]
pub async fn delete_alert_handler(
    user: AuthenticatedUser,
    alert_id: web::Path<Uuid>,
    data: web::Data<AppState>,
) -> impl Responder {
    let alert_id = alert_id.into_inner();

    match data.alert.delete.execute(user.actor(), alert_id).await {
        Ok(()) => ApiResponse::no_content(),
        Err(DeleteAlertError::NotFound) => {
            ApiResponse::not_found("ALERT_NOT_FOUND", "Alert not found")
        }
        Err(e @ DeleteAlertError::Forbidden) => ApiResponse::forbidden("FORBIDDEN", &e.to_string()),
        Err(DeleteAlertError::RepositoryError(e)) => {
            error!(%alert_id, error = %e, "Failed to delete alert");
            ApiResponse::internal_error()
        }
    }
}
