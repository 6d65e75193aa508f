use actix_web::{get, web, Responder};
use tracing::error;

use crate::alert::application::domain::entities::Alert;
use crate::api::schemas::ErrorResponse;
use crate::auth::adapter::incoming::web::extractors::AuthenticatedUser;
use crate::shared::api::ApiResponse;
use crate::AppState;

/// List every alert
///
/// Returns a bare array in storage order. Use `/api/alerts/search` for
/// filtering, sorting and pages.
#[utoipa::path(
    get,
    path = "/api/alerts",
    tag = "alerts",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All alerts", body = [Alert]),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
#[get("/api/alerts")]
pub async fn get_alerts_handler(_user: AuthenticatedUser, data: web::Data<AppState>) -> impl Responder {
    match data.alert.get_list.execute().await {
        Ok(alerts) => ApiResponse::success(alerts),
        Err(e) => {
            error!(error = %e, "Failed to list alerts");
            ApiResponse::internal_error()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alert::application::domain::entities::{AlertLevel, AlertStatus};
    use crate::auth::application::domain::entities::UserRole;
    use crate::tests::support::alert_fixtures::{
        actor, sample_alert, InMemoryAlertRepository, RecordingPublisher,
    };
    use crate::tests::support::app_state_builder::TestAppStateBuilder;
    use crate::tests::support::http::{call_route, BEARER};
    use actix_web::{http::StatusCode, test};

    fn routes(cfg: &mut web::ServiceConfig) {
        cfg.service(get_alerts_handler);
    }

    #[actix_web::test]
    async fn returns_bare_array() {
        let repo = InMemoryAlertRepository::with_alerts(vec![
            sample_alert("a", AlertLevel::High, AlertStatus::Pending),
            sample_alert("b", AlertLevel::Low, AlertStatus::Verified),
        ]);
        let state = TestAppStateBuilder::default()
            .with_alert_store(&repo, &RecordingPublisher::default())
            .build();

        let (status, body) = call_route(
            state,
            actor(UserRole::User),
            routes,
            test::TestRequest::get().uri("/api/alerts").insert_header(BEARER),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let items = body.as_array().expect("bare array");
        assert_eq!(items.len(), 2);
        assert_eq!(items[0]["title"], "a");
        assert_eq!(items[1]["status"], "verified");
    }

    #[actix_web::test]
    async fn requires_token() {
        let (status, body) = call_route(
            TestAppStateBuilder::default().build(),
            actor(UserRole::Admin),
            routes,
            test::TestRequest::get().uri("/api/alerts"),
        )
        .await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"]["code"], "MISSING_AUTH_HEADER");
    }

    #[actix_web::test]
    async fn storage_failure_is_opaque_500() {
        let repo = InMemoryAlertRepository::default();
        repo.set_failing(true);
        let state = TestAppStateBuilder::default()
            .with_alert_store(&repo, &RecordingPublisher::default())
            .build();

        let (status, body) = call_route(
            state,
            actor(UserRole::User),
            routes,
            test::TestRequest::get().uri("/api/alerts").insert_header(BEARER),
        )
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"]["code"], "INTERNAL_ERROR");
        assert!(!body.to_string().contains("connection reset"));
    }
}
