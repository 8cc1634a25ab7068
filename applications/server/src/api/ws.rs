//! WebSocket surface for listeners and producers.

use crate::{
    error::CommandError,
    protocol::{ClientMessage, ServerMessage},
    services::{self, Origin, SessionId, Station},
    state::AppState,
};
use axum::extract::ws::{Message, WebSocket};
use axum::extract::{State, WebSocketUpgrade};
use axum::response::IntoResponse;
use futures_util::{SinkExt, StreamExt};
use std::sync::Arc;

/// WebSocket upgrade handler.
pub async fn ws_handler(ws: WebSocketUpgrade, State(state): State<AppState>) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state.station))
}

/// Main WebSocket connection handler.
async fn handle_socket(socket: WebSocket, station: Arc<Station>) {
    let (mut sender, mut receiver) = socket.split();
    let (mailbox, mut outbox) = services::mailbox();

    // Registration replays the current state into the mailbox. The registry
    // holds the only sender from here on.
    let session = station.connect(mailbox).await;
    tracing::debug!("[WS] New connection established: {}", session);

    // Writer: drains the mailbox onto the socket. Exiting drops `outbox`,
    // which the registry notices on its next send. Once the registry drops a
    // stalled session the mailbox closes and the writer ends too.
    let mut writer = tokio::spawn(async move {
        while let Some(message) = outbox.recv().await {
            let Ok(json) = serde_json::to_string(&message) else {
                continue;
            };
            if sender.send(Message::Text(json)).await.is_err() {
                break;
            }
        }
    });

    loop {
        tokio::select! {
            _ = &mut writer => break,
            msg = receiver.next() => {
                match msg {
                    Some(Ok(Message::Text(text))) => handle_text(&station, &session, &text).await,
                    Some(Ok(Message::Close(_))) | Some(Err(_)) | None => break,
                    // Binary frames and pings carry no commands
                    Some(Ok(_)) => {}
                }
            }
        }
    }

    station.disconnect(&session).await;
    writer.abort();
    tracing::debug!("[WS] Connection closed: {}", session);
}

/// Handle one text frame from a client, replying privately to `session`.
pub async fn handle_text(station: &Station, session: &SessionId, text: &str) {
    let message = match serde_json::from_str::<ClientMessage>(text) {
        Ok(message) => message,
        Err(e) => {
            tracing::debug!("[WS] Unrecognized message: {}", e);
            station
                .reply(session, ServerMessage::error("unrecognized message"))
                .await;
            return;
        }
    };

    let result = match message {
        ClientMessage::Play {
            request,
            credential,
        } => station
            .play(&request, credential.as_deref(), Origin::Socket)
            .await
            .map(drop),
        ClientMessage::Stop { credential } => {
            station.stop(credential.as_deref()).await.map(drop)
        }
        ClientMessage::Skip { credential } => {
            station.skip(credential.as_deref()).await.map(drop)
        }
        ClientMessage::QueueList { .. } => {
            let lines = station.queue_lines().await;
            station.reply(session, ServerMessage::QueueList { lines }).await;
            Ok(())
        }
        ClientMessage::Ended { location } => {
            station.track_ended(&location).await;
            Ok(())
        }
    };

    match result {
        Ok(()) => {}
        Err(CommandError::Unauthorized) => {
            station.reply(session, ServerMessage::error("unauthorized")).await;
        }
        // Already broadcast to every listener, this one included
        Err(CommandError::Unresolved(_)) => {}
    }
}
