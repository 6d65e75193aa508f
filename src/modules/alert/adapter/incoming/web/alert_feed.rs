use actix_web::{get, web, HttpRequest, HttpResponse};
use actix_ws::{AggregatedMessage, AggregatedMessageStream, CloseCode, CloseReason, Session};
use tokio::sync::broadcast::{self, error::RecvError};
use tracing::{debug, info, warn};

use crate::alert::adapter::outgoing::alert_event_hub::AlertEventHub;
use crate::alert::application::ports::outgoing::AlertChange;

/// Live change feed
///
/// Pushes `{"type": "alert_created" | "alert_updated" | "alert_deleted"}`
/// notices carrying no alert data. Clients refetch over REST on each notice.
#[get("/ws")]
pub async fn alert_feed_handler(
    req: HttpRequest,
    body: web::Payload,
    hub: web::Data<AlertEventHub>,
) -> actix_web::Result<HttpResponse> {
    let (response, session, stream) = actix_ws::handle(&req, body)?;

    let changes = hub.subscribe();
    let messages = stream.aggregate_continuations();
    info!(subscribers = hub.subscriber_count(), "Alert feed session opened");

    actix_web::rt::spawn(run_session(session, messages, changes));

    Ok(response)
}

/// What to send for one receive from the hub. A lagging subscriber missed
/// some changes, so it gets a generic update notice telling it to refetch.
/// `None` means the hub is gone and the session should end.
pub fn notice_for(received: Result<AlertChange, RecvError>) -> Option<AlertChange> {
    match received {
        Ok(change) => Some(change),
        Err(RecvError::Lagged(skipped)) => {
            warn!(skipped, "Alert feed subscriber lagged");
            Some(AlertChange::AlertUpdated)
        }
        Err(RecvError::Closed) => None,
    }
}

async fn run_session(
    mut session: Session,
    mut messages: AggregatedMessageStream,
    mut changes: broadcast::Receiver<AlertChange>,
) {
    let reason = loop {
        tokio::select! {
            received = changes.recv() => {
                let Some(change) = notice_for(received) else {
                    break Some(CloseCode::Away.into());
                };
                let Ok(text) = serde_json::to_string(&change) else {
                    continue;
                };
                if session.text(text).await.is_err() {
                    // client already gone
                    return;
                }
            }
            msg = messages.recv() => match msg {
                Some(Ok(AggregatedMessage::Ping(bytes))) => {
                    if session.pong(&bytes).await.is_err() {
                        return;
                    }
                }
                Some(Ok(AggregatedMessage::Close(reason))) => break reason,
                Some(Ok(_)) => {}
                Some(Err(e)) => {
                    debug!(error = %e, "Alert feed protocol error");
                    break Some(CloseReason::from(CloseCode::Protocol));
                }
                None => break None,
            }
        }
    };

    debug!(?reason, "Alert feed session closing");
    let _ = session.close(reason).await;
}
