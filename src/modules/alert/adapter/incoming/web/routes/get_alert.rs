use actix_web::{get, web, Responder};
use tracing::error;
use uuid::Uuid;

use crate::alert::application::domain::entities::Alert;
use crate::alert::application::ports::incoming::use_cases::GetAlertError;
use crate::api::schemas::ErrorResponse;
use crate::auth::adapter::incoming::web::extractors::AuthenticatedUser;
use crate::shared::api::ApiResponse;
use crate::AppState;

#[utoipa::path(
    get,
    path = "/api/alerts/{alert_id}",
    tag = "alerts",
    security(("bearer_auth" = [])),
    params(("alert_id" = Uuid, Path, description = "Alert id")),
    responses(
        (status = 200, description = "The alert", body = Alert),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 404, description = "No such alert", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
#[get("/api/alerts/{alert_id}")]
pub async fn get_alert_handler(
    _user: AuthenticatedUser,
    alert_id: web::Path<Uuid>,
    data: web::Data<AppState>,
) -> impl Responder {
    let alert_id = alert_id.into_inner();

    match data.alert.get_single.execute(alert_id).await {
        Ok(alert) => ApiResponse::success(alert),
        Err(GetAlertError::NotFound) => {
            ApiResponse::not_found("ALERT_NOT_FOUND", "Alert not found")
        }
        Err(GetAlertError::RepositoryError(e)) => {
            error!(%alert_id, error = %e, "Failed to load alert");
            ApiResponse::internal_error()
        }
    }
}
