use async_trait::async_trait;
use uuid::Uuid;

use crate::alert::application::domain::entities::Alert;
use crate::alert::application::ports::incoming::use_cases::{GetAlertError, GetAlertUseCase};
use crate::alert::application::ports::outgoing::{AlertRepository, AlertRepositoryError};

pub struct GetAlertService<R>
where
    R: AlertRepository,
{
    repository: R,
}

impl<R> GetAlertService<R>
where
    R: AlertRepository,
{
    pub fn new(repository: R) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<R> GetAlertUseCase for GetAlertService<R>
where
    R: AlertRepository + Send + Sync,
{
    async fn execute(&self, alert_id: Uuid) -> Result<Alert, GetAlertError> {
        self.repository
            .get_by_id(alert_id)
            .await
            .map_err(|e| match e {
                AlertRepositoryError::NotFound => GetAlertError::NotFound,
                other => GetAlertError::RepositoryError(other.to_string()),
            })
    }
}
