use async_trait::async_trait;

use crate::alert::application::domain::analytics::{compute_stats, AlertStats, DateRange};
use crate::alert::application::domain::query::AlertFilter;
use crate::alert::application::ports::incoming::use_cases::{AlertStatsError, AlertStatsUseCase};
use crate::alert::application::ports::outgoing::AlertRepository;

pub struct AlertStatsService<R>
where
    R: AlertRepository,
{
    repository: R,
}

impl<R> AlertStatsService<R>
where
    R: AlertRepository,
{
    pub fn new(repository: R) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<R> AlertStatsUseCase for AlertStatsService<R>
where
    R: AlertRepository + Send + Sync,
{
    async fn execute(
        &self,
        filter: AlertFilter,
        range: DateRange,
    ) -> Result<AlertStats, AlertStatsError> {
        let alerts = self
            .repository
            .list()
            .await
            .map_err(|e| AlertStatsError::RepositoryError(e.to_string()))?;

        Ok(compute_stats(&alerts, &filter, range))
    }
}
