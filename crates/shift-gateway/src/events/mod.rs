//! Event bridge
//!
//! Forwards messages received over Redis pub/sub to the WebSocket rooms
//! that match their channel.

use shift_cache::ReceivedMessage;

use crate::protocol::{EventPayload, GatewayMessage};
use crate::server::GatewayState;

/// Run the pub/sub -> room bridge until the subscriber closes.
///
/// Chat messages and domain events arrive on channels named after the
/// rooms clients join (`shift:<id>`, `facility:<id>`, `nurse:<id>`,
/// `broadcast`); each is dispatched to the local members of that room.
pub async fn run_event_bridge(state: GatewayState) {
    let mut receiver = state.subscriber().receiver();

    tracing::info!("Event bridge started");

    loop {
        match receiver.recv().await {
            Ok(message) => {
                dispatch(&state, message).await;
            }
            Err(tokio::sync::broadcast::error::RecvError::Lagged(skipped)) => {
                tracing::warn!(skipped = skipped, "Event bridge lagged; messages dropped");
            }
            Err(tokio::sync::broadcast::error::RecvError::Closed) => {
                tracing::info!("Event bridge stopped: subscriber closed");
                break;
            }
        }
    }
}

async fn dispatch(state: &GatewayState, message: ReceivedMessage) {
    let room = message.channel.name();

    if !state.connection_manager().room_is_active(&room) {
        return;
    }

    let Some(event) = message.event else {
        tracing::debug!(room = %room, "Dropping non-event pub/sub payload");
        return;
    };

    let frame = GatewayMessage::dispatch(
        event.event_type.clone(),
        serde_json::to_value(EventPayload {
            channel: room.clone(),
            data: event.data,
        })
        .unwrap_or_default(),
    );

    let delivered = state
        .connection_manager()
        .broadcast_to_room(&room, &frame)
        .await;

    tracing::trace!(
        room = %room,
        event_type = %event.event_type,
        delivered = delivered,
        "Dispatched event to room"
    );
}
