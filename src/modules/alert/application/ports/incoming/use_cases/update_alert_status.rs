use async_trait::async_trait;
use uuid::Uuid;

use crate::alert::application::domain::entities::{Alert, AlertStatus};
use crate::alert::application::domain::patch::StatusPatch;
use crate::auth::application::domain::entities::{Actor, UserRole};

#[derive(Debug, Clone, thiserror::Error)]
pub enum UpdateAlertStatusError {
    #[error("Alert not found")]
    NotFound,

    #[error("Role '{0}' may not change alert status")]
    Forbidden(UserRole),

    #[error("Alert is already {from}")]
    InvalidTransition { from: AlertStatus },

    #[error("Repository error: {0}")]
    RepositoryError(String),
}

#[async_trait]
pub trait UpdateAlertStatusUseCase: Send + Sync {
    async fn execute(
        &self,
        actor: Actor,
        alert_id: Uuid,
        patch: StatusPatch,
    ) -> Result<Alert, UpdateAlertStatusError>;
}
