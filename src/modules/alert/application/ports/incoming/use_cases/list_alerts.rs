use async_trait::async_trait;

use crate::alert::application::domain::entities::Alert;
use crate::alert::application::domain::query::{AlertPage, AlertQuery};

// ──────────────────────────────────────────────────────────
// Full collection
// ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, thiserror::Error)]
pub enum ListAlertsError {
    #[error("Repository error: {0}")]
    RepositoryError(String),
}

#[async_trait]
pub trait ListAlertsUseCase: Send + Sync {
    async fn execute(&self) -> Result<Vec<Alert>, ListAlertsError>;
}

// ──────────────────────────────────────────────────────────
// Filtered, sorted and paginated
// ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, thiserror::Error)]
pub enum SearchAlertsError {
    #[error("Repository error: {0}")]
    RepositoryError(String),
}

#[async_trait]
pub trait SearchAlertsUseCase: Send + Sync {
    async fn execute(&self, query: AlertQuery) -> Result<AlertPage, SearchAlertsError>;
}
