use async_trait::async_trait;
use uuid::Uuid;

use crate::alert::application::domain::entities::AlertStatus;
use crate::alert::application::domain::notification::DroneTeam;
use crate::alert::application::ports::outgoing::DispatchReceipt;
use crate::auth::application::domain::entities::Actor;

#[derive(Debug, Clone, thiserror::Error)]
pub enum RequestVerificationError {
    #[error("Alert not found")]
    NotFound,

    #[error("Only admins and responders may request drone verification")]
    Forbidden,

    #[error("Alert is already {current}")]
    NotPending { current: AlertStatus },

    #[error("Dispatch failed: {0}")]
    DispatchFailed(String),

    #[error("Repository error: {0}")]
    RepositoryError(String),
}

#[async_trait]
pub trait RequestVerificationUseCase: Send + Sync {
    /// Repeating the request while one is outstanding returns the first
    /// receipt without dispatching again.
    async fn execute(
        &self,
        actor: Actor,
        alert_id: Uuid,
        team: DroneTeam,
    ) -> Result<DispatchReceipt, RequestVerificationError>;
}
