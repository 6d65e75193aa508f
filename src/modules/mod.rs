pub mod alert;
pub mod auth;
