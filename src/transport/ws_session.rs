use crate::game::session::GameSession;
use crate::protocol::ServerMessage;
use axum::extract::ws::{Message, WebSocket};
use futures_util::{SinkExt, StreamExt};
use std::sync::Arc;
use tokio::sync::mpsc;

pub async fn handle_socket(socket: WebSocket, session: Arc<GameSession>) {
    let (mut sender, mut receiver) = socket.split();
    let (tx, mut rx) = mpsc::unbounded_channel::<ServerMessage>();
    session.attach_client(tx).await;

    let send_task = tokio::spawn(async move {
        while let Some(message) = rx.recv().await {
            let Ok(payload) = serde_json::to_string(&message) else { continue };
            if sender.send(Message::Text(payload)).await.is_err() {
                break;
            }
        }
    });

    while let Some(result) = receiver.next().await {
        let Ok(message) = result else { break };
        match message {
            Message::Text(text) => session.handle_message(&text).await,
            Message::Close(_) => break,
            _ => {}
        }
    }

    session.detach_client().await;
    send_task.abort();
}
