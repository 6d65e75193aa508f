use async_trait::async_trait;
use uuid::Uuid;

use crate::auth::application::domain::entities::Actor;

#[derive(Debug, Clone, thiserror::Error)]
pub enum DeleteAlertError {
    #[error("Alert not found")]
    NotFound,

    #[error("Only administrators may delete alerts")]
    Forbidden,

    #[error("Repository error: {0}")]
    RepositoryError(String),
}

#[async_trait]
pub trait DeleteAlertUseCase: Send + Sync {
    async fn execute(&self, actor: Actor, alert_id: Uuid) -> Result<(), DeleteAlertError>;
}
