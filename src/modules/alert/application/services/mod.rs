pub mod alert_stats_service;
pub mod broadcast_sms_service;
pub mod create_alert_service;
pub mod delete_alert_service;
pub mod get_alert_service;
pub mod list_alerts_service;
pub mod update_alert_status_service;
pub mod verification_service;

pub use alert_stats_service::AlertStatsService;
pub use broadcast_sms_service::BroadcastSmsService;
pub use create_alert_service::CreateAlertService;
pub use delete_alert_service::DeleteAlertService;
pub use get_alert_service::GetAlertService;
pub use list_alerts_service::{ListAlertsService, SearchAlertsService};
pub use update_alert_status_service::UpdateAlertStatusService;
pub use verification_service::{
    OutstandingVerifications, RequestVerificationService, SubmitVerificationResultService,
};
