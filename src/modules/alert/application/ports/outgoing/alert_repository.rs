use async_trait::async_trait;
use uuid::Uuid;

use crate::alert::application::domain::entities::{Alert, AlertStatus, NewAlert};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AlertRepositoryError {
    #[error("Alert not found")]
    NotFound,

    /// The conditional status write matched no pending row.
    #[error("Alert is already {current}")]
    StatusConflict { current: AlertStatus },

    #[error("Database error: {0}")]
    DatabaseError(String),
}

/// Durable alert storage.
///
/// `transition_status` is a compare-and-set: it only succeeds while the
/// stored status is still `pending`.
#[async_trait]
pub trait AlertRepository: Send + Sync {
    async fn create(&self, alert: NewAlert) -> Result<Alert, AlertRepositoryError>;

    async fn get_by_id(&self, id: Uuid) -> Result<Alert, AlertRepositoryError>;

    /// No ordering is guaranteed.
    async fn list(&self) -> Result<Vec<Alert>, AlertRepositoryError>;

    async fn transition_status(
        &self,
        id: Uuid,
        target: AlertStatus,
        verified_by: Uuid,
    ) -> Result<Alert, AlertRepositoryError>;

    async fn delete(&self, id: Uuid) -> Result<(), AlertRepositoryError>;
}
