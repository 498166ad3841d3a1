//! # Matrix Service Adapter
//!
//! Implements the `ChatProvider` trait for the Matrix protocol using the
//! `matrix_sdk`. This is the bridge between the generic `ChatProvider`
//! interface used by the dispatcher and the Matrix SDK specifics.

use crate::domain::traits::ChatProvider;
use async_trait::async_trait;
use matrix_sdk::room::Room;
use matrix_sdk::ruma::events::room::message::RoomMessageEventContent;

#[derive(Clone)]
pub struct MatrixService {
    room: Room,
}

impl MatrixService {
    pub fn new(room: Room) -> Self {
        Self { room }
    }
}

#[async_trait]
impl ChatProvider for MatrixService {
    fn room_id(&self) -> String {
        self.room.room_id().as_str().to_string()
    }

    async fn send_message(&self, content: &str) -> Result<String, String> {
        tracing::debug!("Sending message to {}", self.room_id());
        self.room
            .send(RoomMessageEventContent::text_markdown(content))
            .await
            .map(|resp| resp.event_id.to_string())
            .map_err(|e| e.to_string())
    }

    async fn reply_message(&self, content: &str, recipients: &[String]) -> Result<(), String> {
        // Matrix has no per-recipient delivery inside a room; mention the
        // addressed members instead.
        let body = if recipients.is_empty() {
            content.to_string()
        } else {
            format!("{}: {}", recipients.join(", "), content)
        };
        self.send_message(&body).await.map(|_| ())
    }

    async fn send_notification(&self, content: &str) -> Result<(), String> {
        self.room
            .send(RoomMessageEventContent::text_plain(content))
            .await
            .map(|_| ())
            .map_err(|e| e.to_string())
    }
}
