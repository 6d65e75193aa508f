use actix_web::http::StatusCode;
use actix_web::{test, web, App};
use serde_json::Value;
use std::sync::Arc;

use crate::auth::application::domain::entities::Actor;
use crate::auth::application::ports::outgoing::TokenProvider;
use crate::shared::api::{custom_json_config, custom_path_config, custom_query_config};
use crate::tests::support::stubs::StubTokenProvider;
use crate::AppState;

pub const BEARER: (&str, &str) = ("Authorization", "Bearer test-token");

/// Sends one request through a fresh app carrying the shared extractor
/// configs and a token provider that authenticates as `caller`.
pub async fn call_route<F>(
    state: web::Data<AppState>,
    caller: Actor,
    routes: F,
    req: test::TestRequest,
) -> (StatusCode, Value)
where
    F: FnOnce(&mut web::ServiceConfig),
{
    let token_provider: Arc<dyn TokenProvider + Send + Sync> =
        Arc::new(StubTokenProvider::new(caller));

    let app = test::init_service(
        App::new()
            .app_data(state)
            .app_data(web::Data::new(token_provider))
            .app_data(custom_json_config())
            .app_data(custom_query_config())
            .app_data(custom_path_config())
            .configure(routes),
    )
    .await;

    let resp = test::call_service(&app, req.to_request()).await;
    let status = resp.status();
    let body = test::read_body(resp).await;
    let json = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).unwrap_or(Value::Null)
    };
    (status, json)
}
