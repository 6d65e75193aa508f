use async_trait::async_trait;

use crate::alert::application::domain::entities::{Alert, AlertValidationError, NewAlertInput};
use crate::auth::application::domain::entities::Actor;

#[derive(Debug, Clone, thiserror::Error)]
pub enum CreateAlertError {
    #[error(transparent)]
    Validation(#[from] AlertValidationError),

    #[error("Repository error: {0}")]
    RepositoryError(String),
}

#[async_trait]
pub trait CreateAlertUseCase: Send + Sync {
    async fn execute(&self, reporter: Actor, input: NewAlertInput)
        -> Result<Alert, CreateAlertError>;
}
