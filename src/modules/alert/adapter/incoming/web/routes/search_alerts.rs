use actix_web::{get, web, Responder};
use tracing::error;

use crate::alert::application::domain::query::{AlertPage, AlertQuery, AlertQueryParams};
use crate::api::schemas::ErrorResponse;
use crate::auth::adapter::incoming::web::extractors::AuthenticatedUser;
use crate::shared::api::ApiResponse;
use crate::AppState;

/// Filter, sort and paginate alerts
#[utoipa::path(
    get,
    path = "/api/alerts/search",
    tag = "alerts",
    security(("bearer_auth" = [])),
    params(AlertQueryParams),
    responses(
        (status = 200, description = "One page of matching alerts", body = AlertPage),
        (status = 400, description = "Malformed or out-of-range parameter", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
#[get("/api/alerts/search")]
pub async fn search_alerts_handler(
    _user: AuthenticatedUser,
    params: web::Query<AlertQueryParams>,
    data: web::Data<AppState>,
) -> impl Responder {
    let query = match AlertQuery::from_params(&params) {
        Ok(query) => query,
        Err(e) => return ApiResponse::bad_request("INVALID_ARGUMENT", &e.to_string()),
    };

    match data.alert.search.execute(query).await {
        Ok(page) => ApiResponse::success(page),
        Err(e) => {
            error!(error = %e, "Alert search failed");
            ApiResponse::internal_error()
        }
    }
}
