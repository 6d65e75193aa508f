pub mod alert_fixtures;
pub mod app_state_builder;
pub mod http;
pub mod stubs;

