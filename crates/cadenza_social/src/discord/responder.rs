//! Interaction responses over the Discord HTTP API.

use super::conversions::to_embed;
use async_trait::async_trait;
use cadenza_core::RenderedMessage;
use cadenza_error::{CadenzaResult, DeliveryError};
use cadenza_interface::InteractionResponder;
use serenity::all::{
    CommandInteraction, CreateInteractionResponse, CreateInteractionResponseMessage,
    EditInteractionResponse, Http,
};
use std::sync::Arc;
use tracing::instrument;

/// Answers one slash-command interaction.
pub struct DiscordResponder {
    http: Arc<Http>,
    interaction: CommandInteraction,
}

impl DiscordResponder {
    /// Responder for `interaction`.
    pub fn new(http: Arc<Http>, interaction: CommandInteraction) -> Self {
        Self { http, interaction }
    }
}

#[async_trait]
impl InteractionResponder for DiscordResponder {
    #[instrument(skip(self, message), fields(interaction = %self.interaction.id))]
    async fn reply(&self, message: &RenderedMessage, ephemeral: bool) -> CadenzaResult<()> {
        let response = CreateInteractionResponseMessage::new()
            .embed(to_embed(message)?)
            .ephemeral(ephemeral);
        self.interaction
            .create_response(&*self.http, CreateInteractionResponse::Message(response))
            .await
            .map_err(|e| DeliveryError::send(e.to_string()))?;
        Ok(())
    }

    #[instrument(skip(self), fields(interaction = %self.interaction.id))]
    async fn defer(&self, ephemeral: bool) -> CadenzaResult<()> {
        let response = CreateInteractionResponseMessage::new().ephemeral(ephemeral);
        self.interaction
            .create_response(&*self.http, CreateInteractionResponse::Defer(response))
            .await
            .map_err(|e| DeliveryError::send(e.to_string()))?;
        Ok(())
    }

    #[instrument(skip(self, message), fields(interaction = %self.interaction.id))]
    async fn edit_reply(&self, message: &RenderedMessage) -> CadenzaResult<()> {
        let edit = EditInteractionResponse::new().embed(to_embed(message)?);
        self.interaction
            .edit_response(&*self.http, edit)
            .await
            .map_err(|e| DeliveryError::send(e.to_string()))?;
        Ok(())
    }
}
