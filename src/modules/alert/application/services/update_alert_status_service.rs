use async_trait::async_trait;
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::alert::application::domain::entities::Alert;
use crate::alert::application::domain::patch::StatusPatch;
use crate::alert::application::domain::state_machine::TransitionError;
use crate::alert::application::ports::incoming::use_cases::{
    UpdateAlertStatusError, UpdateAlertStatusUseCase,
};
use crate::alert::application::ports::outgoing::{
    AlertChange, AlertEventPublisher, AlertRepository, AlertRepositoryError,
};
use crate::auth::application::domain::entities::Actor;

pub struct UpdateAlertStatusService<R>
where
    R: AlertRepository,
{
    repository: R,
    events: Arc<dyn AlertEventPublisher>,
}

impl<R> UpdateAlertStatusService<R>
where
    R: AlertRepository,
{
    pub fn new(repository: R, events: Arc<dyn AlertEventPublisher>) -> Self {
        Self { repository, events }
    }
}

impl From<TransitionError> for UpdateAlertStatusError {
    fn from(err: TransitionError) -> Self {
        match err {
            TransitionError::Forbidden(role) => UpdateAlertStatusError::Forbidden(role),
            TransitionError::InvalidTransition { from } => {
                UpdateAlertStatusError::InvalidTransition { from }
            }
        }
    }
}

impl From<AlertRepositoryError> for UpdateAlertStatusError {
    fn from(err: AlertRepositoryError) -> Self {
        match err {
            AlertRepositoryError::NotFound => UpdateAlertStatusError::NotFound,
            AlertRepositoryError::StatusConflict { current } => {
                UpdateAlertStatusError::InvalidTransition { from: current }
            }
            AlertRepositoryError::DatabaseError(msg) => {
                UpdateAlertStatusError::RepositoryError(msg)
            }
        }
    }
}

#[async_trait]
impl<R> UpdateAlertStatusUseCase for UpdateAlertStatusService<R>
where
    R: AlertRepository + Send + Sync,
{
    async fn execute(
        &self,
        actor: Actor,
        alert_id: Uuid,
        patch: StatusPatch,
    ) -> Result<Alert, UpdateAlertStatusError> {
        let current = self.repository.get_by_id(alert_id).await?;
        let target = current.status.apply(patch.transition, actor.role)?;

        // the read above is advisory; the conditional write decides
        let updated = self
            .repository
            .transition_status(alert_id, target, actor.user_id)
            .await
            .inspect_err(|e| {
                if let AlertRepositoryError::StatusConflict { current } = e {
                    warn!(alert_id = %alert_id, current = %current, "Lost status race");
                }
            })?;

        info!(
            alert_id = %alert_id,
            status = %updated.status,
            actor = %actor.user_id,
            "Alert status changed"
        );
        self.events.publish(AlertChange::AlertUpdated);

        Ok(updated)
    }
}
