//! Channel messages over the Discord HTTP API.

use super::conversions::{to_channel_id, to_embed};
use async_trait::async_trait;
use cadenza_core::{ChannelId, RenderedMessage};
use cadenza_error::{CadenzaResult, DeliveryError};
use cadenza_interface::ChannelMessenger;
use serenity::all::{CreateMessage, Http};
use std::sync::Arc;
use tracing::{debug, instrument};

/// Posts embeds to text channels.
#[derive(Clone)]
pub struct DiscordMessenger {
    http: Arc<Http>,
}

impl DiscordMessenger {
    /// Messenger sharing `http` with the running client.
    pub fn new(http: Arc<Http>) -> Self {
        Self { http }
    }
}

#[async_trait]
impl ChannelMessenger for DiscordMessenger {
    #[instrument(skip(self, message), fields(title = %message.title))]
    async fn send(&self, channel: ChannelId, message: &RenderedMessage) -> CadenzaResult<()> {
        let builder = CreateMessage::new().embed(to_embed(message)?);
        let sent = to_channel_id(channel)
            .send_message(&*self.http, builder)
            .await
            .map_err(|e| DeliveryError::send(e.to_string()))?;
        debug!(message_id = %sent.id, "Posted channel message");
        Ok(())
    }
}
