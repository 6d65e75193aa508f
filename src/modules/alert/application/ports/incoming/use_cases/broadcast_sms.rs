use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::alert::application::domain::notification::{BroadcastInput, BroadcastValidationError};
use crate::auth::application::domain::entities::Actor;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct BroadcastReceipt {
    #[schema(example = 555)]
    pub recipients: u32,
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum BroadcastSmsError {
    #[error("Only admins and responders may broadcast alerts")]
    Forbidden,

    #[error(transparent)]
    Validation(#[from] BroadcastValidationError),

    #[error("Gateway error: {0}")]
    GatewayError(String),
}

#[async_trait]
pub trait BroadcastSmsUseCase: Send + Sync {
    async fn execute(
        &self,
        actor: Actor,
        input: BroadcastInput,
    ) -> Result<BroadcastReceipt, BroadcastSmsError>;
}
