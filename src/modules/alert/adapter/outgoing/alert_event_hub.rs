use tokio::sync::broadcast;
use tracing::debug;

use crate::alert::application::ports::outgoing::{AlertChange, AlertEventPublisher};

const DEFAULT_CAPACITY: usize = 64;

/// In-process fan-out of alert changes to live WebSocket sessions.
#[derive(Debug, Clone)]
pub struct AlertEventHub {
    sender: broadcast::Sender<AlertChange>,
}

impl Default for AlertEventHub {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl AlertEventHub {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<AlertChange> {
        self.sender.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl AlertEventPublisher for AlertEventHub {
    fn publish(&self, change: AlertChange) {
        // Err only means nobody is listening
        match self.sender.send(change) {
            Ok(n) => debug!(?change, subscribers = n, "Alert change published"),
            Err(_) => debug!(?change, "Alert change dropped: no subscribers"),
        }
    }
}
