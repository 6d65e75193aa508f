use async_trait::async_trait;

use crate::alert::application::domain::notification::SmsBroadcast;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SmsGatewayError {
    #[error("SMS gateway unavailable: {0}")]
    Unavailable(String),
}

#[async_trait]
pub trait SmsGateway: Send + Sync {
    /// Returns how many subscribers the message was handed to.
    async fn broadcast(&self, broadcast: &SmsBroadcast) -> Result<u32, SmsGatewayError>;
}
