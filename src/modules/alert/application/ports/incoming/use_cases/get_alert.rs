use async_trait::async_trait;
use uuid::Uuid;

use crate::alert::application::domain::entities::Alert;

#[derive(Debug, Clone, thiserror::Error)]
pub enum GetAlertError {
    #[error("Alert not found")]
    NotFound,

    #[error("Repository error: {0}")]
    RepositoryError(String),
}

#[async_trait]
pub trait GetAlertUseCase: Send + Sync {
    async fn execute(&self, alert_id: Uuid) -> Result<Alert, GetAlertError>;
}
