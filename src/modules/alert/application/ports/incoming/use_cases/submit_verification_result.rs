use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::alert::application::domain::entities::AlertStatus;
use crate::auth::application::domain::entities::Actor;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationResult {
    pub verified: bool,
    pub notes: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct VerificationAck {
    /// `false` when the alert had already left `pending`.
    pub applied: bool,
    pub status: AlertStatus,
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum SubmitVerificationResultError {
    #[error("Alert not found")]
    NotFound,

    #[error("Only admins and responders may submit verification results")]
    Forbidden,

    #[error("Repository error: {0}")]
    RepositoryError(String),
}

#[async_trait]
pub trait SubmitVerificationResultUseCase: Send + Sync {
    async fn execute(
        &self,
        actor: Actor,
        alert_id: Uuid,
        result: VerificationResult,
    ) -> Result<VerificationAck, SubmitVerificationResultError>;
}
