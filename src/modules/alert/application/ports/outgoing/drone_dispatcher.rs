use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::alert::application::domain::entities::Alert;
use crate::alert::application::domain::notification::DroneTeam;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DispatchReceipt {
    pub accepted: bool,
    #[schema(example = 12)]
    pub eta_minutes: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DispatchError {
    #[error("Drone team unavailable: {0}")]
    Unavailable(String),
}

#[async_trait]
pub trait DroneDispatcher: Send + Sync {
    async fn dispatch(&self, alert: &Alert, team: DroneTeam) -> Result<DispatchReceipt, DispatchError>;
}
