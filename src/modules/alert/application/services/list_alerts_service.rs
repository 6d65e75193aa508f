use async_trait::async_trait;

use crate::alert::application::domain::entities::Alert;
use crate::alert::application::domain::query::{run_query, AlertPage, AlertQuery};
use crate::alert::application::ports::incoming::use_cases::{
    ListAlertsError, ListAlertsUseCase, SearchAlertsError, SearchAlertsUseCase,
};
use crate::alert::application::ports::outgoing::AlertRepository;

pub struct ListAlertsService<R>
where
    R: AlertRepository,
{
    repository: R,
}

impl<R> ListAlertsService<R>
where
    R: AlertRepository,
{
    pub fn new(repository: R) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<R> ListAlertsUseCase for ListAlertsService<R>
where
    R: AlertRepository + Send + Sync,
{
    async fn execute(&self) -> Result<Vec<Alert>, ListAlertsError> {
        self.repository
            .list()
            .await
            .map_err(|e| ListAlertsError::RepositoryError(e.to_string()))
    }
}

/// Runs the query engine over a fresh snapshot of the collection.
pub struct SearchAlertsService<R>
where
    R: AlertRepository,
{
    repository: R,
}

impl<R> SearchAlertsService<R>
where
    R: AlertRepository,
{
    pub fn new(repository: R) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<R> SearchAlertsUseCase for SearchAlertsService<R>
where
    R: AlertRepository + Send + Sync,
{
    async fn execute(&self, query: AlertQuery) -> Result<AlertPage, SearchAlertsError> {
        let alerts = self
            .repository
            .list()
            .await
            .map_err(|e| SearchAlertsError::RepositoryError(e.to_string()))?;

        Ok(run_query(&alerts, &query))
    }
}
