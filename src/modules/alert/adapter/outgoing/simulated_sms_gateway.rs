use async_trait::async_trait;
use tracing::info;

use crate::alert::application::domain::notification::{Region, SmsBroadcast};
use crate::alert::application::ports::outgoing::{SmsGateway, SmsGatewayError};

/// Registered community members per region.
pub fn subscribers(region: Region) -> u32 {
    match region {
        Region::Panyagor => 342,
        Region::Poktap => 213,
        Region::Duk => 187,
        Region::Makuach => 276,
        Region::Eastern => 104,
    }
}

/// Counts recipients from the subscriber table instead of sending anything.
#[derive(Debug, Clone, Default)]
pub struct SimulatedSmsGateway;

#[async_trait]
impl SmsGateway for SimulatedSmsGateway {
    async fn broadcast(&self, broadcast: &SmsBroadcast) -> Result<u32, SmsGatewayError> {
        let recipients: u32 = broadcast.regions().iter().copied().map(subscribers).sum();

        info!(
            level = %broadcast.level(),
            recipients,
            chars = broadcast.message().chars().count(),
            "Simulated SMS broadcast"
        );

        Ok(recipients)
    }
}
