use std::sync::Arc;

use crate::alert::application::ports::incoming::use_cases::{
    AlertStatsUseCase, BroadcastSmsUseCase, CreateAlertUseCase, DeleteAlertUseCase,
    GetAlertUseCase, ListAlertsUseCase, RequestVerificationUseCase, SearchAlertsUseCase,
    SubmitVerificationResultUseCase, UpdateAlertStatusUseCase,
};

#[derive(Clone)]
pub struct AlertUseCases {
    pub create: Arc<dyn CreateAlertUseCase + Send + Sync>,
    pub get_single: Arc<dyn GetAlertUseCase + Send + Sync>,
    pub get_list: Arc<dyn ListAlertsUseCase + Send + Sync>,
    pub search: Arc<dyn SearchAlertsUseCase + Send + Sync>,
    pub stats: Arc<dyn AlertStatsUseCase + Send + Sync>,
    pub update_status: Arc<dyn UpdateAlertStatusUseCase + Send + Sync>,
    pub delete: Arc<dyn DeleteAlertUseCase + Send + Sync>,
    pub request_verification: Arc<dyn RequestVerificationUseCase + Send + Sync>,
    pub submit_verification_result: Arc<dyn SubmitVerificationResultUseCase + Send + Sync>,
    pub broadcast_sms: Arc<dyn BroadcastSmsUseCase + Send + Sync>,
}
