pub mod alert_events;
pub mod alert_repository;
pub mod drone_dispatcher;
pub mod sms_gateway;

pub use alert_events::{AlertChange, AlertEventPublisher};
pub use alert_repository::{AlertRepository, AlertRepositoryError};
pub use drone_dispatcher::{DispatchError, DispatchReceipt, DroneDispatcher};
pub use sms_gateway::{SmsGateway, SmsGatewayError};
