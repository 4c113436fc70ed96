//! WebSocket handler
//!
//! Handles WebSocket connections and message processing. Sockets must
//! Identify before any room operation; a missed heartbeat window closes
//! the connection.

use axum::{
    extract::{
        ws::{CloseFrame, Message, WebSocket},
        State, WebSocketUpgrade,
    },
    response::IntoResponse,
};
use chrono::Utc;
use futures_util::{SinkExt, StreamExt};
use shift_cache::PubSubChannel;
use shift_core::DomainEvent;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::interval;

use crate::connection::Connection;
use crate::protocol::{CloseCode, GatewayMessage, OpCode, ReadyPayload};
use crate::server::GatewayState;

/// Heartbeat interval advertised to clients (milliseconds)
const HEARTBEAT_INTERVAL_MS: u64 = 45_000;

/// Timeout for no heartbeat before considering the connection dead
const HEARTBEAT_TIMEOUT_MS: u128 = 90_000;

/// Channel buffer size for outgoing messages
const MESSAGE_BUFFER_SIZE: usize = 100;

/// WebSocket gateway handler
pub async fn gateway_handler(
    State(state): State<GatewayState>,
    ws: WebSocketUpgrade,
) -> impl IntoResponse {
    ws.on_upgrade(|socket| handle_socket(state, socket))
}

/// Handle an upgraded WebSocket connection
async fn handle_socket(state: GatewayState, socket: WebSocket) {
    let session_id = Connection::generate_session_id();

    // Create message channel for outgoing messages
    let (tx, mut rx) = mpsc::channel::<GatewayMessage>(MESSAGE_BUFFER_SIZE);

    // Register connection
    let connection = state
        .connection_manager()
        .add_connection(session_id.clone(), tx);

    tracing::info!(session_id = %session_id, "WebSocket connection established");

    let (mut ws_sink, mut ws_stream) = socket.split();

    // Send Hello immediately
    let hello = GatewayMessage::hello(HEARTBEAT_INTERVAL_MS);
    if let Ok(json) = hello.to_json() {
        if ws_sink.send(Message::Text(json)).await.is_err() {
            tracing::warn!(session_id = %session_id, "Failed to send Hello message");
            state.connection_manager().remove_connection(&session_id);
            return;
        }
    }

    let mut heartbeat_check = interval(Duration::from_millis(HEARTBEAT_INTERVAL_MS));
    let mut close_code: Option<CloseCode> = None;

    loop {
        tokio::select! {
            // Outgoing messages queued for this connection
            outgoing = rx.recv() => {
                match outgoing {
                    Some(message) => {
                        let Ok(json) = message.to_json() else { continue };
                        if ws_sink.send(Message::Text(json)).await.is_err() {
                            break;
                        }
                    }
                    None => break,
                }
            }

            // Incoming frames from the client
            incoming = ws_stream.next() => {
                match incoming {
                    Some(Ok(Message::Text(text))) => {
                        if let Err(code) = handle_text_frame(&state, &connection, &text).await {
                            close_code = Some(code);
                            break;
                        }
                    }
                    Some(Ok(Message::Binary(_))) => {
                        tracing::debug!(session_id = %session_id, "Binary messages not supported");
                        close_code = Some(CloseCode::DecodeError);
                        break;
                    }
                    Some(Ok(Message::Close(_))) | None => {
                        tracing::info!(session_id = %session_id, "Client closed connection");
                        break;
                    }
                    Some(Ok(_)) => {
                        // Ping/Pong handled by axum
                    }
                    Some(Err(e)) => {
                        tracing::debug!(session_id = %session_id, error = %e, "WebSocket error");
                        break;
                    }
                }
            }

            // Heartbeat liveness check
            _ = heartbeat_check.tick() => {
                if connection.millis_since_heartbeat() > HEARTBEAT_TIMEOUT_MS {
                    tracing::info!(session_id = %session_id, "Heartbeat timeout");
                    close_code = Some(CloseCode::HeartbeatTimeout);
                    break;
                }
            }
        }
    }

    if let Some(code) = close_code {
        let frame = CloseFrame {
            code: code.code(),
            reason: code.reason().into(),
        };
        let _ = ws_sink.send(Message::Close(Some(frame))).await;
    }

    state.connection_manager().remove_connection(&session_id);
    tracing::info!(session_id = %session_id, "WebSocket connection closed");
}

/// Process one client frame; an error closes the connection
async fn handle_text_frame(
    state: &GatewayState,
    connection: &Arc<Connection>,
    text: &str,
) -> Result<(), CloseCode> {
    let frame = GatewayMessage::from_json(text).map_err(|_| CloseCode::DecodeError)?;

    match frame.op {
        OpCode::Heartbeat => {
            connection.touch_heartbeat();
            if !connection.send(GatewayMessage::heartbeat_ack()).await {
                return Err(CloseCode::UnknownError);
            }
            Ok(())
        }

        OpCode::Identify => {
            if connection.is_identified() {
                return Err(CloseCode::AlreadyAuthenticated);
            }

            let identify = frame.as_identify().ok_or(CloseCode::DecodeError)?;
            let claims = state
                .jwt_service()
                .validate_access_token(&identify.token)
                .map_err(|_| CloseCode::AuthenticationFailed)?;
            let user_id = claims
                .user_id()
                .map_err(|_| CloseCode::AuthenticationFailed)?;

            connection.set_user_id(user_id);
            connection.touch_heartbeat();

            tracing::info!(
                session_id = %connection.session_id(),
                user_id = %user_id,
                "Connection identified"
            );

            let ready = GatewayMessage::ready(ReadyPayload {
                session_id: connection.session_id().to_string(),
                user_id: user_id.to_string(),
            });
            if !connection.send(ready).await {
                return Err(CloseCode::UnknownError);
            }
            Ok(())
        }

        OpCode::Join => {
            require_identified(connection)?;
            let join = frame.as_join().ok_or(CloseCode::DecodeError)?;

            state
                .connection_manager()
                .join_room(connection.session_id(), &join.room);

            // Mirror the room membership onto the Redis subscription so
            // events published by other instances reach this one
            let channel = PubSubChannel::parse(&join.room);
            if let Err(e) = state.subscriber().subscribe(&[channel]).await {
                tracing::warn!(room = %join.room, error = %e, "Failed to subscribe to room channel");
            }
            Ok(())
        }

        OpCode::Leave => {
            require_identified(connection)?;
            let leave = frame.as_leave().ok_or(CloseCode::DecodeError)?;

            state
                .connection_manager()
                .leave_room(connection.session_id(), &leave.room);
            Ok(())
        }

        OpCode::MessageSend => {
            require_identified(connection)?;
            let send = frame.as_send().ok_or(CloseCode::DecodeError)?;

            if !connection.in_room(&send.room) {
                tracing::debug!(
                    session_id = %connection.session_id(),
                    room = %send.room,
                    "MessageSend to a room the connection has not joined"
                );
                return Ok(());
            }

            let sender_id = connection.user_id().ok_or(CloseCode::NotAuthenticated)?;

            // Route through Redis so every gateway instance broadcasts it
            let event = DomainEvent::ChatMessage {
                room: send.room.clone(),
                sender_id,
                content: send.content,
                at: Utc::now(),
            };
            if let Err(e) = state.publisher().publish_domain_event(&event).await {
                tracing::warn!(room = %send.room, error = %e, "Failed to publish chat message");
            }
            Ok(())
        }

        OpCode::Dispatch | OpCode::Hello | OpCode::HeartbeatAck => {
            // Server-only opcodes are invalid from clients
            Err(CloseCode::UnknownOpCode)
        }
    }
}

fn require_identified(connection: &Arc<Connection>) -> Result<(), CloseCode> {
    if connection.is_identified() {
        Ok(())
    } else {
        Err(CloseCode::NotAuthenticated)
    }
}
