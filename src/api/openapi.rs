use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::OpenApi;

use crate::alert::application::domain::analytics::{
    AlertStats, DailyBucket, LevelCounts, StatusCounts,
};
use crate::alert::application::domain::entities::{
    Alert, AlertLevel, AlertStatus, Coordinates, NewAlertInput,
};
use crate::alert::application::domain::notification::{BroadcastInput, DroneTeam, Region};
use crate::alert::application::domain::query::AlertPage;
use crate::alert::application::ports::incoming::use_cases::{BroadcastReceipt, VerificationAck};
use crate::alert::application::ports::outgoing::{AlertChange, DispatchReceipt};
use crate::alert::adapter::incoming::web::routes::{
    StatusPatchBody, VerificationRequestDto, VerificationResultDto,
};
use crate::api::schemas::{ErrorDetail, ErrorResponse};
use crate::auth::adapter::incoming::web::routes::{LoginRequestDto, RegisterRequestDto};
use crate::auth::application::use_cases::login_user::AuthToken;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Community Guardian API",
        version = "1.0.0",
        description = "Community security alert reporting, review and notification"
    ),
    paths(
        // Auth endpoints
        crate::auth::adapter::incoming::web::routes::register_user_handler,
        crate::auth::adapter::incoming::web::routes::login_user_handler,

        // Alert endpoints
        crate::alert::adapter::incoming::web::routes::get_alerts_handler,
        crate::alert::adapter::incoming::web::routes::search_alerts_handler,
        crate::alert::adapter::incoming::web::routes::alert_stats_handler,
        crate::alert::adapter::incoming::web::routes::get_alert_handler,
        crate::alert::adapter::incoming::web::routes::create_alert_handler,
        crate::alert::adapter::incoming::web::routes::update_alert_handler,
        crate::alert::adapter::incoming::web::routes::delete_alert_handler,

        // Side channels
        crate::alert::adapter::incoming::web::routes::request_verification_handler,
        crate::alert::adapter::incoming::web::routes::submit_verification_result_handler,
        crate::alert::adapter::incoming::web::routes::broadcast_sms_handler,
    ),
    components(
        schemas(
            ErrorResponse,
            ErrorDetail,

            // Auth DTOs
            LoginRequestDto,
            RegisterRequestDto,
            AuthToken,

            // Alerts
            Alert,
            AlertLevel,
            AlertStatus,
            Coordinates,
            NewAlertInput,
            StatusPatchBody,
            AlertPage,
            AlertStats,
            StatusCounts,
            LevelCounts,
            DailyBucket,
            AlertChange,

            // Side channels
            DroneTeam,
            Region,
            VerificationRequestDto,
            DispatchReceipt,
            VerificationResultDto,
            VerificationAck,
            BroadcastInput,
            BroadcastReceipt,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "auth", description = "Registration and login"),
        (name = "alerts", description = "Alert reporting, review and queries"),
        (name = "verification", description = "Drone verification requests and results"),
        (name = "notifications", description = "SMS broadcast"),
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("Token from /api/auth/login or /api/auth/register"))
                        .build(),
                ),
            )
        }
    }
}
