pub mod api;
pub mod health;
pub mod modules;
pub mod shared;

pub use modules::alert;
pub use modules::auth;

use crate::alert::adapter::outgoing::alert_event_hub::AlertEventHub;
use crate::alert::adapter::outgoing::alert_repository_postgres::AlertRepositoryPostgres;
use crate::alert::adapter::outgoing::simulated_drone_dispatcher::SimulatedDroneDispatcher;
use crate::alert::adapter::outgoing::simulated_sms_gateway::SimulatedSmsGateway;
use crate::alert::application::alert_use_cases::AlertUseCases;
use crate::alert::application::ports::outgoing::AlertEventPublisher;
use crate::alert::application::services::{
    AlertStatsService, BroadcastSmsService, CreateAlertService, DeleteAlertService,
    GetAlertService, ListAlertsService, OutstandingVerifications, RequestVerificationService,
    SearchAlertsService, SubmitVerificationResultService, UpdateAlertStatusService,
};
use crate::auth::adapter::outgoing::jwt::{JwtConfig, JwtTokenService};
use crate::auth::adapter::outgoing::security::Argon2Hasher;
use crate::auth::adapter::outgoing::user_query_postgres::UserQueryPostgres;
use crate::auth::adapter::outgoing::user_repository_postgres::UserRepositoryPostgres;
use crate::auth::application::ports::outgoing::TokenProvider;
use crate::auth::application::use_cases::{
    login_user::{ILoginUserUseCase, LoginUserUseCase},
    register_user::{IRegisterUserUseCase, RegisterUserUseCase},
};
use crate::shared::api::{custom_json_config, custom_path_config, custom_query_config};

use actix_web::{web, App, HttpServer};
use anyhow::Context;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::env;
use std::sync::Arc;
use std::time::Duration;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[cfg(test)]
mod tests;

const DEFAULT_DB_CONNECT_ATTEMPTS: u32 = 5;
const DEFAULT_DB_CONNECT_RETRY_SECS: u64 = 5;

#[derive(Clone)]
pub struct AppState {
    pub login_user_use_case: Arc<dyn ILoginUserUseCase + Send + Sync>,
    pub register_user_use_case: Arc<dyn IRegisterUserUseCase + Send + Sync>,
    pub alert: AlertUseCases,
}

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

#[cfg(not(tarpaulin_include))]
async fn connect_database(db_url: &str) -> anyhow::Result<DatabaseConnection> {
    let max_attempts = env_or("DB_CONNECT_ATTEMPTS", DEFAULT_DB_CONNECT_ATTEMPTS).max(1);
    let retry_delay = Duration::from_secs(env_or(
        "DB_CONNECT_RETRY_SECS",
        DEFAULT_DB_CONNECT_RETRY_SECS,
    ));

    let mut opt = ConnectOptions::new(db_url.to_owned());
    opt.max_connections(20)
        .min_connections(2)
        .connect_timeout(Duration::from_secs(5))
        .acquire_timeout(Duration::from_secs(5))
        .idle_timeout(Duration::from_secs(300))
        .max_lifetime(Duration::from_secs(1800))
        .sqlx_logging(false);

    let mut attempt = 1;
    loop {
        match Database::connect(opt.clone()).await {
            Ok(conn) => return Ok(conn),
            Err(e) if attempt < max_attempts => {
                warn!(
                    attempt,
                    max_attempts,
                    error = %e,
                    "Database not reachable, retrying"
                );
                attempt += 1;
                tokio::time::sleep(retry_delay).await;
            }
            Err(e) => {
                return Err(e).context(format!(
                    "Failed to connect to database after {} attempts",
                    max_attempts
                ))
            }
        }
    }
}

#[cfg(not(tarpaulin_include))]
fn build_alert_use_cases(db: &Arc<DatabaseConnection>, hub: &AlertEventHub) -> AlertUseCases {
    let repo = AlertRepositoryPostgres::new(Arc::clone(db));
    let events: Arc<dyn AlertEventPublisher> = Arc::new(hub.clone());
    let outstanding = OutstandingVerifications::default();

    AlertUseCases {
        create: Arc::new(CreateAlertService::new(repo.clone(), events.clone())),
        get_single: Arc::new(GetAlertService::new(repo.clone())),
        get_list: Arc::new(ListAlertsService::new(repo.clone())),
        search: Arc::new(SearchAlertsService::new(repo.clone())),
        stats: Arc::new(AlertStatsService::new(repo.clone())),
        update_status: Arc::new(UpdateAlertStatusService::new(repo.clone(), events.clone())),
        delete: Arc::new(DeleteAlertService::new(repo.clone(), events.clone())),
        request_verification: Arc::new(RequestVerificationService::new(
            repo.clone(),
            Arc::new(SimulatedDroneDispatcher),
            outstanding.clone(),
        )),
        submit_verification_result: Arc::new(SubmitVerificationResultService::new(
            repo,
            events,
            outstanding,
        )),
        broadcast_sms: Arc::new(BroadcastSmsService::new(Arc::new(SimulatedSmsGateway))),
    }
}

#[actix_web::main]
#[cfg(not(tarpaulin_include))]
async fn start() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,actix_web=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting application...");

    // Environment variable loading
    let env = env::var("RUST_ENV").unwrap_or_else(|_| "development".to_string());

    // Try .env.{environment} first, then fall back to .env
    let env_file = format!(".env.{}", env);
    if dotenvy::from_filename(&env_file).is_err() {
        dotenvy::dotenv().ok();
    }

    let db_url = env::var("DATABASE_URL").context("DATABASE_URL is not set")?;
    let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port = env::var("PORT").unwrap_or_else(|_| "8080".to_string());
    let server_url = format!("{host}:{port}");

    let db_arc = Arc::new(connect_database(&db_url).await?);
    info!("Database connected");

    let jwt_service = JwtTokenService::new(JwtConfig::from_env()?);
    let password_hasher = Arc::new(Argon2Hasher::from_env()?);

    let user_repo = UserRepositoryPostgres::new(Arc::clone(&db_arc));
    let user_query = UserQueryPostgres::new(Arc::clone(&db_arc));

    let login_user_use_case = LoginUserUseCase::new(
        user_query.clone(),
        password_hasher.clone(),
        Arc::new(jwt_service.clone()),
    );
    let register_user_use_case = RegisterUserUseCase::new(
        user_query,
        user_repo,
        password_hasher,
        Arc::new(jwt_service.clone()),
    );

    let hub = AlertEventHub::default();

    let state = AppState {
        login_user_use_case: Arc::new(login_user_use_case),
        register_user_use_case: Arc::new(register_user_use_case),
        alert: build_alert_use_cases(&db_arc, &hub),
    };

    let token_provider_arc: Arc<dyn TokenProvider + Send + Sync> = Arc::new(jwt_service);
    let openapi = crate::api::openapi::ApiDoc::openapi();

    info!(%server_url, env = %env, "Server listening");

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(state.clone()))
            .app_data(web::Data::new(Arc::clone(&token_provider_arc)))
            .app_data(web::Data::new(Arc::clone(&db_arc)))
            .app_data(web::Data::new(hub.clone()))
            .app_data(custom_json_config())
            .app_data(custom_query_config())
            .app_data(custom_path_config())
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", openapi.clone()),
            )
            .configure(init_routes)
    })
    .bind(server_url)?
    .run()
    .await?;

    Ok(())
}

#[cfg(not(tarpaulin_include))]
fn init_routes(cfg: &mut web::ServiceConfig) {
    use crate::alert::adapter::incoming::web::{alert_feed, routes as alert_routes};
    use crate::auth::adapter::incoming::web::routes as auth_routes;

    // Health
    cfg.service(crate::health::health);
    cfg.service(crate::health::readiness);
    // Auth
    cfg.service(auth_routes::register_user_handler);
    cfg.service(auth_routes::login_user_handler);
    // Alerts: literal segments before `{alert_id}`
    cfg.service(alert_routes::search_alerts_handler);
    cfg.service(alert_routes::alert_stats_handler);
    cfg.service(alert_routes::get_alerts_handler);
    cfg.service(alert_routes::create_alert_handler);
    cfg.service(alert_routes::get_alert_handler);
    cfg.service(alert_routes::update_alert_handler);
    cfg.service(alert_routes::delete_alert_handler);
    // Verification and notification side channels
    cfg.service(alert_routes::request_verification_handler);
    cfg.service(alert_routes::submit_verification_result_handler);
    cfg.service(alert_routes::broadcast_sms_handler);
    // Live change feed
    cfg.service(alert_feed::alert_feed_handler);
}

#[cfg(not(tarpaulin_include))]
fn main() {
    if let Err(e) = start() {
        eprintln!("Error starting app: {e:#}");
    }
}
