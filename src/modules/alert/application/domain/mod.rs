pub mod analytics;
pub mod entities;
pub mod notification;
pub mod patch;
pub mod query;
pub mod state_machine;
