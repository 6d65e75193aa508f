use async_trait::async_trait;

use crate::alert::application::domain::analytics::{AlertStats, DateRange};
use crate::alert::application::domain::query::AlertFilter;

#[derive(Debug, Clone, thiserror::Error)]
pub enum AlertStatsError {
    #[error("Repository error: {0}")]
    RepositoryError(String),
}

#[async_trait]
pub trait AlertStatsUseCase: Send + Sync {
    async fn execute(&self, filter: AlertFilter, range: DateRange)
        -> Result<AlertStats, AlertStatsError>;
}
