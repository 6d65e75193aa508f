mod alert_stats;
mod broadcast_sms;
mod create_alert;
mod delete_alert;
mod get_alert;
mod get_alerts;
mod request_verification;
mod search_alerts;
mod submit_verification_result;
mod update_alert;

pub use alert_stats::*;
pub use broadcast_sms::*;
pub use create_alert::*;
pub use delete_alert::*;
pub use get_alert::*;
pub use get_alerts::*;
pub use request_verification::*;
pub use search_alerts::*;
pub use submit_verification_result::*;
pub use update_alert::*;
