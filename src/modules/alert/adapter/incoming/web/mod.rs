pub mod alert_feed;
pub mod routes;
