use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;

use crate::alert::application::domain::entities::{Alert, NewAlert, NewAlertInput};
use crate::alert::application::ports::incoming::use_cases::{CreateAlertError, CreateAlertUseCase};
use crate::alert::application::ports::outgoing::{AlertChange, AlertEventPublisher, AlertRepository};
use crate::auth::application::domain::entities::Actor;

pub struct CreateAlertService<R>
where
    R: AlertRepository,
{
    repository: R,
    events: Arc<dyn AlertEventPublisher>,
}

impl<R> CreateAlertService<R>
where
    R: AlertRepository,
{
    pub fn new(repository: R, events: Arc<dyn AlertEventPublisher>) -> Self {
        Self { repository, events }
    }
}

#[async_trait]
impl<R> CreateAlertUseCase for CreateAlertService<R>
where
    R: AlertRepository + Send + Sync,
{
    async fn execute(
        &self,
        reporter: Actor,
        input: NewAlertInput,
    ) -> Result<Alert, CreateAlertError> {
        // any signed-in role may report
        let new_alert = NewAlert::validate(input, reporter.user_id)?;

        let alert = self
            .repository
            .create(new_alert)
            .await
            .map_err(|e| CreateAlertError::RepositoryError(e.to_string()))?;

        info!(alert_id = %alert.id, level = %alert.level, reporter = %reporter.user_id, "Alert reported");
        self.events.publish(AlertChange::AlertCreated);

        Ok(alert)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alert::application::domain::entities::{AlertStatus, AlertValidationError};
    use crate::auth::application::domain::entities::UserRole;
    use crate::tests::support::alert_fixtures::{actor, InMemoryAlertRepository, RecordingPublisher};

    fn input() -> NewAlertInput {
        NewAlertInput {
            title: Some("Armed group spotted".to_string()),
            description: Some("Five to seven individuals moving west".to_string()),
            location: Some("Eastern Panyagor".to_string()),
            level: Some("high".to_string()),
            coordinates: None,
        }
    }

    #[tokio::test]
    async fn creates_pending_alert_and_publishes() {
        let repo = InMemoryAlertRepository::default();
        let events = RecordingPublisher::default();
        let service = CreateAlertService::new(repo.clone(), Arc::new(events.clone()));
        let reporter = actor(UserRole::User);

        let alert = service.execute(reporter, input()).await.unwrap();

        assert_eq!(alert.status, AlertStatus::Pending);
        assert_eq!(alert.created_by, reporter.user_id);
        assert!(alert.verified_by.is_none());
        assert_eq!(repo.snapshot().len(), 1);
        assert_eq!(events.events(), vec![AlertChange::AlertCreated]);
    }

    #[tokio::test]
    async fn invalid_input_never_reaches_repository() {
        let repo = InMemoryAlertRepository::default();
        let events = RecordingPublisher::default();
        let service = CreateAlertService::new(repo.clone(), Arc::new(events.clone()));

        let mut bad = input();
        bad.title = Some("   ".to_string());

        let result = service.execute(actor(UserRole::User), bad).await;

        assert!(matches!(
            result,
            Err(CreateAlertError::Validation(AlertValidationError::MissingField("title")))
        ));
        assert!(repo.snapshot().is_empty());
        assert!(events.events().is_empty());
    }

    #[tokio::test]
    async fn storage_failure_is_repository_error() {
        let repo = InMemoryAlertRepository::default();
        repo.set_failing(true);
        let events = RecordingPublisher::default();
        let service = CreateAlertService::new(repo, Arc::new(events.clone()));

        let result = service.execute(actor(UserRole::Admin), input()).await;

        assert!(matches!(result, Err(CreateAlertError::RepositoryError(_))));
        assert!(events.events().is_empty());
    }
}
