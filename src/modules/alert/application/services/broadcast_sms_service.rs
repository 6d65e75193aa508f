use async_trait::async_trait;
use std::sync::Arc;
use tracing::{error, info};

use crate::alert::application::domain::notification::{BroadcastInput, SmsBroadcast};
use crate::alert::application::ports::incoming::use_cases::{
    BroadcastReceipt, BroadcastSmsError, BroadcastSmsUseCase,
};
use crate::alert::application::ports::outgoing::SmsGateway;
use crate::auth::application::domain::entities::Actor;

/// Fire-and-forget from the alert's point of view: nothing here reads or
/// writes alert state.
pub struct BroadcastSmsService {
    gateway: Arc<dyn SmsGateway>,
}

impl BroadcastSmsService {
    pub fn new(gateway: Arc<dyn SmsGateway>) -> Self {
        Self { gateway }
    }
}

#[async_trait]
impl BroadcastSmsUseCase for BroadcastSmsService {
    async fn execute(
        &self,
        actor: Actor,
        input: BroadcastInput,
    ) -> Result<BroadcastReceipt, BroadcastSmsError> {
        if !actor.role.can_review_alerts() {
            return Err(BroadcastSmsError::Forbidden);
        }

        let broadcast = SmsBroadcast::validate(input)?;

        let recipients = self.gateway.broadcast(&broadcast).await.map_err(|e| {
            error!(error = %e, "SMS broadcast failed");
            BroadcastSmsError::GatewayError(e.to_string())
        })?;

        info!(
            level = %broadcast.level(),
            regions = ?broadcast.regions(),
            recipients,
            sender = %actor.user_id,
            "SMS broadcast sent"
        );

        Ok(BroadcastReceipt { recipients })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alert::application::domain::notification::{BroadcastValidationError, Region};
    use crate::auth::application::domain::entities::UserRole;
    use crate::tests::support::alert_fixtures::{actor, RecordingGateway};

    fn input(regions: &[&str]) -> BroadcastInput {
        BroadcastInput {
            message: Some("Avoid the river crossing".to_string()),
            level: Some("medium".to_string()),
            regions: regions.iter().map(|r| r.to_string()).collect(),
            use_template: false,
            location: None,
        }
    }

    #[tokio::test]
    async fn responder_broadcasts_to_regions() {
        let gateway = RecordingGateway::default();
        let service = BroadcastSmsService::new(Arc::new(gateway.clone()));

        let receipt = service
            .execute(actor(UserRole::Responder), input(&["panyagor", "duk"]))
            .await
            .unwrap();

        assert_eq!(receipt.recipients, 200);
        let sent = gateway.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].regions(), &[Region::Panyagor, Region::Duk]);
    }

    #[tokio::test]
    async fn plain_user_cannot_broadcast() {
        let gateway = RecordingGateway::default();
        let service = BroadcastSmsService::new(Arc::new(gateway.clone()));

        let result = service.execute(actor(UserRole::User), input(&["duk"])).await;

        assert!(matches!(result, Err(BroadcastSmsError::Forbidden)));
        assert!(gateway.sent().is_empty());
    }

    #[tokio::test]
    async fn empty_regions_is_validation_error() {
        let gateway = RecordingGateway::default();
        let service = BroadcastSmsService::new(Arc::new(gateway.clone()));

        let result = service.execute(actor(UserRole::Admin), input(&[])).await;

        assert!(matches!(
            result,
            Err(BroadcastSmsError::Validation(BroadcastValidationError::MissingRegions))
        ));
        assert!(gateway.sent().is_empty());
    }
}
