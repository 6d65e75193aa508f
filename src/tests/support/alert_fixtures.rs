use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};
use uuid::Uuid;

use crate::alert::application::alert_use_cases::AlertUseCases;
use crate::alert::application::domain::entities::{Alert, AlertLevel, AlertStatus, NewAlert};
use crate::alert::application::domain::notification::{DroneTeam, SmsBroadcast};
use crate::alert::application::ports::outgoing::{
    AlertChange, AlertEventPublisher, AlertRepository, AlertRepositoryError, DispatchError,
    DispatchReceipt, DroneDispatcher, SmsGateway, SmsGatewayError,
};
use crate::alert::application::services::{
    AlertStatsService, BroadcastSmsService, CreateAlertService, DeleteAlertService,
    GetAlertService, ListAlertsService, OutstandingVerifications, RequestVerificationService,
    SearchAlertsService, SubmitVerificationResultService, UpdateAlertStatusService,
};
use crate::auth::application::domain::entities::{Actor, UserRole};

pub fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap()
}

pub fn actor(role: UserRole) -> Actor {
    Actor {
        user_id: Uuid::new_v4(),
        role,
    }
}

pub fn sample_alert(title: &str, level: AlertLevel, status: AlertStatus) -> Alert {
    let verified_by = (!status.is_pending()).then(Uuid::new_v4);
    Alert {
        id: Uuid::new_v4(),
        title: title.to_string(),
        description: format!("{} description", title),
        location: "Panyagor".to_string(),
        level,
        status,
        coordinates: None,
        created_by: Uuid::new_v4(),
        verified_by,
        created_at: base_time(),
        updated_at: base_time(),
    }
}

pub fn alert_at(title: &str, level: AlertLevel, hours_after_base: i64) -> Alert {
    let mut alert = sample_alert(title, level, AlertStatus::Pending);
    alert.created_at = base_time() + Duration::hours(hours_after_base);
    alert.updated_at = alert.created_at;
    alert
}

// ============================================================
// In-memory repository with compare-and-set transitions
// ============================================================

#[derive(Clone, Default)]
pub struct InMemoryAlertRepository {
    alerts: Arc<Mutex<Vec<Alert>>>,
    failing: Arc<AtomicBool>,
}

impl InMemoryAlertRepository {
    pub fn with_alerts(alerts: Vec<Alert>) -> Self {
        Self {
            alerts: Arc::new(Mutex::new(alerts)),
            failing: Arc::default(),
        }
    }

    /// Every call fails with a database error until switched back.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn snapshot(&self) -> Vec<Alert> {
        self.alerts.lock().unwrap().clone()
    }

    /// Out-of-band status change, as if another actor got there first.
    pub fn force_status(&self, id: Uuid, status: AlertStatus) {
        let mut alerts = self.alerts.lock().unwrap();
        if let Some(alert) = alerts.iter_mut().find(|a| a.id == id) {
            alert.status = status;
            alert.verified_by = (!status.is_pending()).then(Uuid::new_v4);
        }
    }

    fn check(&self) -> Result<(), AlertRepositoryError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(AlertRepositoryError::DatabaseError("connection reset".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl AlertRepository for InMemoryAlertRepository {
    async fn create(&self, new_alert: NewAlert) -> Result<Alert, AlertRepositoryError> {
        self.check()?;
        let now = Utc::now();
        let alert = Alert {
            id: Uuid::new_v4(),
            title: new_alert.title().to_string(),
            description: new_alert.description().to_string(),
            location: new_alert.location().to_string(),
            level: new_alert.level(),
            status: AlertStatus::Pending,
            coordinates: new_alert.coordinates(),
            created_by: new_alert.created_by(),
            verified_by: None,
            created_at: now,
            updated_at: now,
        };
        self.alerts.lock().unwrap().push(alert.clone());
        Ok(alert)
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Alert, AlertRepositoryError> {
        self.check()?;
        self.alerts
            .lock()
            .unwrap()
            .iter()
            .find(|a| a.id == id)
            .cloned()
            .ok_or(AlertRepositoryError::NotFound)
    }

    async fn list(&self) -> Result<Vec<Alert>, AlertRepositoryError> {
        self.check()?;
        Ok(self.snapshot())
    }

    async fn transition_status(
        &self,
        id: Uuid,
        target: AlertStatus,
        verified_by: Uuid,
    ) -> Result<Alert, AlertRepositoryError> {
        self.check()?;
        let mut alerts = self.alerts.lock().unwrap();
        let alert = alerts
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or(AlertRepositoryError::NotFound)?;
        if !alert.status.is_pending() {
            return Err(AlertRepositoryError::StatusConflict {
                current: alert.status,
            });
        }
        alert.status = target;
        alert.verified_by = Some(verified_by);
        alert.updated_at = Utc::now();
        Ok(alert.clone())
    }

    async fn delete(&self, id: Uuid) -> Result<(), AlertRepositoryError> {
        self.check()?;
        let mut alerts = self.alerts.lock().unwrap();
        let before = alerts.len();
        alerts.retain(|a| a.id != id);
        if alerts.len() == before {
            return Err(AlertRepositoryError::NotFound);
        }
        Ok(())
    }
}

// ============================================================
// Side-channel and event fakes
// ============================================================

#[derive(Clone, Default)]
pub struct RecordingPublisher {
    events: Arc<Mutex<Vec<AlertChange>>>,
}

impl RecordingPublisher {
    pub fn events(&self) -> Vec<AlertChange> {
        self.events.lock().unwrap().clone()
    }
}

impl AlertEventPublisher for RecordingPublisher {
    fn publish(&self, change: AlertChange) {
        self.events.lock().unwrap().push(change);
    }
}

#[derive(Clone, Default)]
pub struct CountingDispatcher {
    calls: Arc<AtomicUsize>,
    unavailable: bool,
}

impl CountingDispatcher {
    pub fn unavailable() -> Self {
        Self {
            calls: Arc::default(),
            unavailable: true,
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DroneDispatcher for CountingDispatcher {
    async fn dispatch(
        &self,
        _alert: &Alert,
        _team: DroneTeam,
    ) -> Result<DispatchReceipt, DispatchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.unavailable {
            return Err(DispatchError::Unavailable("all drones grounded".to_string()));
        }
        Ok(DispatchReceipt {
            accepted: true,
            eta_minutes: 7,
        })
    }
}

#[derive(Clone, Default)]
pub struct RecordingGateway {
    sent: Arc<Mutex<Vec<SmsBroadcast>>>,
}

impl RecordingGateway {
    pub fn sent(&self) -> Vec<SmsBroadcast> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl SmsGateway for RecordingGateway {
    async fn broadcast(&self, broadcast: &SmsBroadcast) -> Result<u32, SmsGatewayError> {
        self.sent.lock().unwrap().push(broadcast.clone());
        Ok(broadcast.regions().len() as u32 * 100)
    }
}

/// Every alert use case wired to `repo`, recording changes into `events`.
/// Drone dispatch always succeeds; SMS counts 100 recipients per region.
pub fn in_memory_alert_use_cases(
    repo: &InMemoryAlertRepository,
    events: &RecordingPublisher,
) -> AlertUseCases {
    let publisher: Arc<dyn AlertEventPublisher> = Arc::new(events.clone());
    let outstanding = OutstandingVerifications::default();

    AlertUseCases {
        create: Arc::new(CreateAlertService::new(repo.clone(), publisher.clone())),
        get_single: Arc::new(GetAlertService::new(repo.clone())),
        get_list: Arc::new(ListAlertsService::new(repo.clone())),
        search: Arc::new(SearchAlertsService::new(repo.clone())),
        stats: Arc::new(AlertStatsService::new(repo.clone())),
        update_status: Arc::new(UpdateAlertStatusService::new(repo.clone(), publisher.clone())),
        delete: Arc::new(DeleteAlertService::new(repo.clone(), publisher.clone())),
        request_verification: Arc::new(RequestVerificationService::new(
            repo.clone(),
            Arc::new(CountingDispatcher::default()),
            outstanding.clone(),
        )),
        submit_verification_result: Arc::new(SubmitVerificationResultService::new(
            repo.clone(),
            publisher,
            outstanding,
        )),
        broadcast_sms: Arc::new(BroadcastSmsService::new(Arc::new(RecordingGateway::default()))),
    }
}
