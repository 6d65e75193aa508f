use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Cache-invalidation notice pushed to connected clients. Carries no payload;
/// clients re-fetch what they display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AlertChange {
    AlertCreated,
    AlertUpdated,
    AlertDeleted,
}

pub trait AlertEventPublisher: Send + Sync {
    /// Never fails: having no listeners is normal.
    fn publish(&self, change: AlertChange);
}
