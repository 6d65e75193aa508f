use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use crate::alert::application::ports::incoming::use_cases::{DeleteAlertError, DeleteAlertUseCase};
use crate::alert::application::ports::outgoing::{
    AlertChange, AlertEventPublisher, AlertRepository, AlertRepositoryError,
};
use crate::auth::application::domain::entities::Actor;

/// Administrative removal. Sits outside the status lifecycle.
pub struct DeleteAlertService<R>
where
    R: AlertRepository,
{
    repository: R,
    events: Arc<dyn AlertEventPublisher>,
}

impl<R> DeleteAlertService<R>
where
    R: AlertRepository,
{
    pub fn new(repository: R, events: Arc<dyn AlertEventPublisher>) -> Self {
        Self { repository, events }
    }
}

#[async_trait]
impl<R> DeleteAlertUseCase for DeleteAlertService<R>
where
    R: AlertRepository + Send + Sync,
{
    async fn execute(&self, actor: Actor, alert_id: Uuid) -> Result<(), DeleteAlertError> {
        if !actor.role.is_admin() {
            return Err(DeleteAlertError::Forbidden);
        }

        self.repository
            .delete(alert_id)
            .await
            .map_err(|e| match e {
                AlertRepositoryError::NotFound => DeleteAlertError::NotFound,
                other => DeleteAlertError::RepositoryError(other.to_string()),
            })?;

        info!(alert_id = %alert_id, admin = %actor.user_id, "Alert deleted");
        self.events.publish(AlertChange::AlertDeleted);

        Ok(())
    }
}
