pub mod alert_event_hub;
pub mod alert_repository_postgres;
pub mod sea_orm_entity;
pub mod simulated_drone_dispatcher;
pub mod simulated_sms_gateway;
