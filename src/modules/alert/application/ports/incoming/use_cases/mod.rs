mod alert_stats;
mod broadcast_sms;
mod create_alert;
mod delete_alert;
mod get_alert;
mod list_alerts;
mod request_verification;
mod submit_verification_result;
mod update_alert_status;

pub use alert_stats::{AlertStatsError, AlertStatsUseCase};
pub use broadcast_sms::{BroadcastReceipt, BroadcastSmsError, BroadcastSmsUseCase};
pub use create_alert::{CreateAlertError, CreateAlertUseCase};
pub use delete_alert::{DeleteAlertError, DeleteAlertUseCase};
pub use get_alert::{GetAlertError, GetAlertUseCase};
pub use list_alerts::{ListAlertsError, ListAlertsUseCase, SearchAlertsError, SearchAlertsUseCase};
pub use request_verification::{RequestVerificationError, RequestVerificationUseCase};
pub use submit_verification_result::{
    SubmitVerificationResultError, SubmitVerificationResultUseCase, VerificationAck,
    VerificationResult,
};
pub use update_alert_status::{UpdateAlertStatusError, UpdateAlertStatusUseCase};
