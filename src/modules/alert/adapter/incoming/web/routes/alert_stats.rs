use actix_web::{get, web, Responder};
use tracing::error;

use crate::alert::application::domain::analytics::{AlertStats, AlertStatsParams};
use crate::api::schemas::ErrorResponse;
use crate::auth::adapter::incoming::web::extractors::AuthenticatedUser;
use crate::shared::api::ApiResponse;
use crate::AppState;

/// Aggregate counts and a per-day timeline over the filtered alerts
#[utoipa::path(
    get,
    path = "/api/alerts/stats",
    tag = "alerts",
    security(("bearer_auth" = [])),
    params(AlertStatsParams),
    responses(
        (status = 200, description = "Alert statistics", body = AlertStats),
        (status = 400, description = "Malformed filter or date", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
#[get("/api/alerts/stats")]
pub async fn alert_stats_handler(
    _user: AuthenticatedUser,
    params: web::Query<AlertStatsParams>,
    data: web::Data<AppState>,
) -> impl Responder {
    let (filter, range) = match params.into_inner().into_parts() {
        Ok(parts) => parts,
        Err(e) => return ApiResponse::bad_request("INVALID_ARGUMENT", &e.to_string()),
    };

    match data.alert.stats.execute(filter, range).await {
        Ok(stats) => ApiResponse::success(stats),
        Err(e) => {
            error!(error = %e, "Failed to compute alert stats");
            ApiResponse::internal_error()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alert::application::domain::entities::AlertLevel;
    use crate::auth::application::domain::entities::UserRole;
    use crate::tests::support::alert_fixtures::{
        actor, alert_at, InMemoryAlertRepository, RecordingPublisher,
    };
    use crate::tests::support::app_state_builder::TestAppStateBuilder;
    use crate::tests::support::http::{call_route, BEARER};
    use actix_web::{http::StatusCode, test};
    use serde_json::Value;

    fn routes(cfg: &mut web::ServiceConfig) {
        cfg.service(alert_stats_handler);
    }

    async fn stats(uri: &str) -> (StatusCode, Value) {
        let repo = InMemoryAlertRepository::with_alerts(vec![
            alert_at("first", AlertLevel::High, 0),
            alert_at("second", AlertLevel::Low, 1),
            alert_at("next day", AlertLevel::High, 24),
        ]);
        let state = TestAppStateBuilder::default()
            .with_alert_store(&repo, &RecordingPublisher::default())
            .build();

        call_route(
            state,
            actor(UserRole::User),
            routes,
            test::TestRequest::get().uri(uri).insert_header(BEARER),
        )
        .await
    }

    #[actix_web::test]
    async fn counts_everything_by_default() {
        let (status, body) = stats("/api/alerts/stats").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total"], 3);
        assert_eq!(body["by_level"]["high"], 2);
        assert_eq!(body["by_level"]["low"], 1);
        assert_eq!(body["by_status"]["pending"], 3);
        assert_eq!(body["timeline"].as_array().unwrap().len(), 2);
        assert_eq!(body["timeline"][0]["date"], "2024-03-01");
        assert_eq!(body["timeline"][0]["total"], 2);
    }

    #[actix_web::test]
    async fn date_range_is_inclusive() {
        let (status, body) = stats("/api/alerts/stats?from=2024-03-02&to=2024-03-02").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total"], 1);
        assert_eq!(body["timeline"][0]["date"], "2024-03-02");
    }

    #[actix_web::test]
    async fn reversed_range_is_invalid_argument() {
        let (status, body) = stats("/api/alerts/stats?from=2024-03-05&to=2024-03-01").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "INVALID_ARGUMENT");
    }

    #[actix_web::test]
    async fn malformed_date_is_invalid_argument() {
        let (status, body) = stats("/api/alerts/stats?from=yesterday").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "INVALID_ARGUMENT");
    }
}
