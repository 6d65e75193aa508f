use actix_web::{post, web, Responder};
use tracing::error;

use crate::alert::application::domain::entities::{Alert, NewAlertInput};
use crate::alert::application::ports::incoming::use_cases::CreateAlertError;
use crate::api::schemas::ErrorResponse;
use crate::auth::adapter::incoming::web::extractors::AuthenticatedUser;
use crate::shared::api::ApiResponse;
use crate::AppState;

/// Report a new security alert
///
/// Any authenticated user may report. The alert starts `pending` and the
/// reporter is recorded as `created_by`.
#[utoipa::path(
    post,
    path = "/api/alerts",
    tag = "alerts",
    security(("bearer_auth" = [])),
    request_body = NewAlertInput,
    responses(
        (status = 201, description = "Alert created", body = Alert),
        (status = 400, description = "Missing or invalid field", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
#[post("/api/alerts")]
pub async fn create_alert_handler(
    user: AuthenticatedUser,
    body: web::Json<NewAlertInput>,
    data: web::Data<AppState>,
) -> impl Responder {
    match data.alert.create.execute(user.actor(), body.into_inner()).await {
        Ok(alert) => ApiResponse::created(alert),
        Err(CreateAlertError::Validation(e)) => {
            ApiResponse::bad_request("VALIDATION_ERROR", &e.to_string())
        }
        Err(CreateAlertError::RepositoryError(e)) => {
            error!(user_id = %user.user_id, error = %e, "Failed to store alert");
            ApiResponse::internal_error()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alert::application::ports::outgoing::AlertChange;
    use crate::auth::application::domain::entities::UserRole;
    use crate::tests::support::alert_fixtures::{actor, InMemoryAlertRepository, RecordingPublisher};
    use crate::tests::support::app_state_builder::TestAppStateBuilder;
    use crate::tests::support::http::{call_route, BEARER};
    use actix_web::{http::StatusCode, test};
    use serde_json::json;

    fn routes(cfg: &mut web::ServiceConfig) {
        cfg.service(create_alert_handler);
    }

    #[actix_web::test]
    async fn creates_pending_alert_for_reporter() {
        let repo = InMemoryAlertRepository::default();
        let events = RecordingPublisher::default();
        let reporter = actor(UserRole::User);

        let (status, body) = call_route(
            TestAppStateBuilder::default().with_alert_store(&repo, &events).build(),
            reporter,
            routes,
            test::TestRequest::post()
                .uri("/api/alerts")
                .insert_header(BEARER)
                .set_json(json!({
                    "title": "Armed group sighted",
                    "description": "Six men with rifles heading east",
                    "location": "Poktap market",
                    "level": "high",
                    "coordinates": { "lat": 6.95, "lng": 31.4 }
                })),
        )
        .await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["status"], "pending");
        assert_eq!(body["level"], "high");
        assert_eq!(body["created_by"], reporter.user_id.to_string());
        assert!(body["verified_by"].is_null());
        assert_eq!(body["coordinates"]["lat"], 6.95);

        assert_eq!(repo.snapshot().len(), 1);
        assert!(matches!(
            events.events().as_slice(),
            [AlertChange::AlertCreated]
        ));
    }

    #[actix_web::test]
    async fn missing_level_is_validation_error() {
        let repo = InMemoryAlertRepository::default();

        let (status, body) = call_route(
            TestAppStateBuilder::default()
                .with_alert_store(&repo, &RecordingPublisher::default())
                .build(),
            actor(UserRole::User),
            routes,
            test::TestRequest::post()
                .uri("/api/alerts")
                .insert_header(BEARER)
                .set_json(json!({
                    "title": "Smoke",
                    "description": "Smoke rising",
                    "location": "Duk"
                })),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert!(repo.snapshot().is_empty());
    }

    #[actix_web::test]
    async fn unknown_level_is_validation_error() {
        let (status, body) = call_route(
            TestAppStateBuilder::default().build(),
            actor(UserRole::User),
            routes,
            test::TestRequest::post()
                .uri("/api/alerts")
                .insert_header(BEARER)
                .set_json(json!({
                    "title": "Smoke",
                    "description": "Smoke rising",
                    "location": "Duk",
                    "level": "critical"
                })),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[actix_web::test]
    async fn malformed_json_is_validation_error() {
        let (status, body) = call_route(
            TestAppStateBuilder::default().build(),
            actor(UserRole::User),
            routes,
            test::TestRequest::post()
                .uri("/api/alerts")
                .insert_header(BEARER)
                .insert_header(("Content-Type", "application/json"))
                .set_payload("{\"title\": "),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }
}
