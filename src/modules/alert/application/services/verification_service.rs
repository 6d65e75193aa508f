//! Drone verification requests and their results.
//!
//! Outstanding requests are tracked per alert so that a repeated request
//! while the drone is out returns the original receipt instead of
//! dispatching again. Concurrent first requests share one dispatch.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::OnceCell;
use tracing::{info, warn};
use uuid::Uuid;

use crate::alert::application::domain::notification::DroneTeam;
use crate::alert::application::domain::state_machine::{Transition, TransitionError};
use crate::alert::application::ports::incoming::use_cases::{
    RequestVerificationError, RequestVerificationUseCase, SubmitVerificationResultError,
    SubmitVerificationResultUseCase, VerificationAck, VerificationResult,
};
use crate::alert::application::ports::outgoing::{
    AlertChange, AlertEventPublisher, AlertRepository, AlertRepositoryError, DispatchReceipt,
    DroneDispatcher,
};
use crate::auth::application::domain::entities::Actor;

type Slot = Arc<OnceCell<DispatchReceipt>>;

// ──────────────────────────────────────────────────────────
// Outstanding requests
// ──────────────────────────────────────────────────────────

#[derive(Clone, Default)]
pub struct OutstandingVerifications {
    slots: Arc<Mutex<HashMap<Uuid, Slot>>>,
}

impl OutstandingVerifications {
    fn lock(&self) -> MutexGuard<'_, HashMap<Uuid, Slot>> {
        self.slots.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn slot(&self, alert_id: Uuid) -> Slot {
        self.lock().entry(alert_id).or_default().clone()
    }

    fn clear(&self, alert_id: Uuid) {
        self.lock().remove(&alert_id);
    }

    /// Drops `slot` if it is still the registered one and never filled.
    fn clear_unfilled(&self, alert_id: Uuid, slot: &Slot) {
        let mut slots = self.lock();
        if slots
            .get(&alert_id)
            .is_some_and(|current| Arc::ptr_eq(current, slot) && current.get().is_none())
        {
            slots.remove(&alert_id);
        }
    }
}

#[cfg(test)]
impl OutstandingVerifications {
    /// Receipt of the dispatched request for `alert_id`, if one is out.
    pub fn receipt(&self, alert_id: Uuid) -> Option<DispatchReceipt> {
        self.lock().get(&alert_id).and_then(|slot| slot.get().copied())
    }

    /// Number of alerts with a request being dispatched or outstanding.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}

// ──────────────────────────────────────────────────────────
// Request
// ──────────────────────────────────────────────────────────

pub struct RequestVerificationService<R>
where
    R: AlertRepository,
{
    repository: R,
    dispatcher: Arc<dyn DroneDispatcher>,
    outstanding: OutstandingVerifications,
}

impl<R> RequestVerificationService<R>
where
    R: AlertRepository,
{
    pub fn new(
        repository: R,
        dispatcher: Arc<dyn DroneDispatcher>,
        outstanding: OutstandingVerifications,
    ) -> Self {
        Self {
            repository,
            dispatcher,
            outstanding,
        }
    }
}

#[async_trait]
impl<R> RequestVerificationUseCase for RequestVerificationService<R>
where
    R: AlertRepository + Send + Sync,
{
    async fn execute(
        &self,
        actor: Actor,
        alert_id: Uuid,
        team: DroneTeam,
    ) -> Result<DispatchReceipt, RequestVerificationError> {
        if !actor.role.can_review_alerts() {
            return Err(RequestVerificationError::Forbidden);
        }

        let alert = self
            .repository
            .get_by_id(alert_id)
            .await
            .map_err(|e| match e {
                AlertRepositoryError::NotFound => {
                    self.outstanding.clear(alert_id);
                    RequestVerificationError::NotFound
                }
                other => RequestVerificationError::RepositoryError(other.to_string()),
            })?;

        if !alert.status.is_pending() {
            self.outstanding.clear(alert_id);
            return Err(RequestVerificationError::NotPending {
                current: alert.status,
            });
        }

        let slot = self.outstanding.slot(alert_id);
        let receipt = slot
            .get_or_try_init(|| self.dispatcher.dispatch(&alert, team))
            .await
            .map_err(|e| {
                warn!(alert_id = %alert_id, error = %e, "Drone dispatch failed");
                self.outstanding.clear_unfilled(alert_id, &slot);
                RequestVerificationError::DispatchFailed(e.to_string())
            })?;

        info!(
            alert_id = %alert_id,
            team = %team,
            eta_minutes = receipt.eta_minutes,
            "Drone verification outstanding"
        );

        Ok(*receipt)
    }
}

// ──────────────────────────────────────────────────────────
// Result
// ──────────────────────────────────────────────────────────

pub struct SubmitVerificationResultService<R>
where
    R: AlertRepository,
{
    repository: R,
    events: Arc<dyn AlertEventPublisher>,
    outstanding: OutstandingVerifications,
}

impl<R> SubmitVerificationResultService<R>
where
    R: AlertRepository,
{
    pub fn new(
        repository: R,
        events: Arc<dyn AlertEventPublisher>,
        outstanding: OutstandingVerifications,
    ) -> Self {
        Self {
            repository,
            events,
            outstanding,
        }
    }

    fn discard(&self, alert_id: Uuid, ack: VerificationAck) -> VerificationAck {
        warn!(
            alert_id = %alert_id,
            current = %ack.status,
            "Verification result arrived after alert was resolved; discarded"
        );
        self.outstanding.clear(alert_id);
        ack
    }
}

#[async_trait]
impl<R> SubmitVerificationResultUseCase for SubmitVerificationResultService<R>
where
    R: AlertRepository + Send + Sync,
{
    async fn execute(
        &self,
        actor: Actor,
        alert_id: Uuid,
        result: VerificationResult,
    ) -> Result<VerificationAck, SubmitVerificationResultError> {
        let current = match self.repository.get_by_id(alert_id).await {
            Ok(alert) => alert,
            Err(AlertRepositoryError::NotFound) => {
                self.outstanding.clear(alert_id);
                return Err(SubmitVerificationResultError::NotFound);
            }
            Err(e) => return Err(SubmitVerificationResultError::RepositoryError(e.to_string())),
        };

        let transition = Transition::from_verdict(result.verified);
        let target = match current.status.apply(transition, actor.role) {
            Ok(target) => target,
            Err(TransitionError::Forbidden(_)) => {
                return Err(SubmitVerificationResultError::Forbidden)
            }
            Err(TransitionError::InvalidTransition { from }) => {
                return Ok(self.discard(
                    alert_id,
                    VerificationAck {
                        applied: false,
                        status: from,
                    },
                ));
            }
        };

        match self
            .repository
            .transition_status(alert_id, target, actor.user_id)
            .await
        {
            Ok(updated) => {
                self.outstanding.clear(alert_id);
                info!(
                    alert_id = %alert_id,
                    status = %updated.status,
                    actor = %actor.user_id,
                    notes = %result.notes,
                    "Verification result applied"
                );
                self.events.publish(AlertChange::AlertUpdated);
                Ok(VerificationAck {
                    applied: true,
                    status: updated.status,
                })
            }
            Err(AlertRepositoryError::StatusConflict { current }) => Ok(self.discard(
                alert_id,
                VerificationAck {
                    applied: false,
                    status: current,
                },
            )),
            Err(AlertRepositoryError::NotFound) => {
                self.outstanding.clear(alert_id);
                Err(SubmitVerificationResultError::NotFound)
            }
            // request stays outstanding so the caller can retry
            Err(AlertRepositoryError::DatabaseError(msg)) => {
                Err(SubmitVerificationResultError::RepositoryError(msg))
            }
        }
    }
}
