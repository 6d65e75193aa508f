use async_trait::async_trait;
use tracing::info;

use crate::alert::application::domain::entities::Alert;
use crate::alert::application::domain::notification::DroneTeam;
use crate::alert::application::ports::outgoing::{DispatchError, DispatchReceipt, DroneDispatcher};

pub const SIMULATED_ETA_MINUTES: u32 = 12;

/// Stand-in for real drone tasking. Always accepts.
#[derive(Debug, Clone, Default)]
pub struct SimulatedDroneDispatcher;

#[async_trait]
impl DroneDispatcher for SimulatedDroneDispatcher {
    async fn dispatch(&self, alert: &Alert, team: DroneTeam) -> Result<DispatchReceipt, DispatchError> {
        info!(alert_id = %alert.id, location = %alert.location, team = %team, "Simulated drone tasked");

        Ok(DispatchReceipt {
            accepted: true,
            eta_minutes: SIMULATED_ETA_MINUTES,
        })
    }
}
