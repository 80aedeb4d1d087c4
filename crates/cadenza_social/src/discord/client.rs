//! Discord bot client setup and lifecycle management.

use super::{DiscordError, DiscordErrorKind, DiscordMessenger, handler::CadenzaHandler};
use serenity::Client;
use serenity::all::{ApplicationId, Http, ShardManager};
use std::sync::Arc;
use tracing::{info, instrument};

/// The Serenity client running the bot.
///
/// # Example
/// ```no_run
/// # async fn example(handler: cadenza_social::CadenzaHandler) -> Result<(), cadenza_social::DiscordError> {
/// use cadenza_social::CadenzaBot;
///
/// let token = std::env::var("DISCORD_TOKEN").unwrap_or_default();
/// let mut bot = CadenzaBot::new(&token, None, handler).await?;
/// bot.start().await?;
/// # Ok(())
/// # }
/// ```
pub struct CadenzaBot {
    client: Client,
}

impl CadenzaBot {
    /// Build the client.
    ///
    /// # Errors
    /// Returns an error if the token is empty or the client fails to build.
    #[instrument(skip(token, handler), fields(token_len = token.len()))]
    pub async fn new(
        token: &str,
        application_id: Option<u64>,
        handler: CadenzaHandler,
    ) -> Result<Self, DiscordError> {
        if token.trim().is_empty() {
            return Err(DiscordError::new(DiscordErrorKind::InvalidToken));
        }

        let intents = CadenzaHandler::intents();
        info!("Building Serenity client with intents: {:?}", intents);

        let mut builder = Client::builder(token, intents).event_handler(handler);
        if let Some(id) = application_id.filter(|id| *id != 0) {
            builder = builder.application_id(ApplicationId::new(id));
        }
        let client = builder.await.map_err(|e| {
            DiscordError::new(DiscordErrorKind::ConnectionFailed(format!(
                "Failed to build client: {}",
                e
            )))
        })?;

        info!("Serenity client built successfully");
        Ok(Self { client })
    }

    /// HTTP client shared with the gateway.
    pub fn http(&self) -> Arc<Http> {
        self.client.http.clone()
    }

    /// Messenger posting through this client.
    pub fn messenger(&self) -> DiscordMessenger {
        DiscordMessenger::new(self.http())
    }

    /// Handle used to shut every shard down.
    pub fn shard_manager(&self) -> Arc<ShardManager> {
        self.client.shard_manager.clone()
    }

    /// Run until the shards stop.
    ///
    /// # Errors
    /// Returns an error if the client fails to start or hits a fatal gateway error.
    #[instrument(skip(self))]
    pub async fn start(&mut self) -> Result<(), DiscordError> {
        info!("Starting Discord bot");
        self.client.start().await.map_err(|e| {
            DiscordError::new(DiscordErrorKind::ConnectionFailed(format!(
                "Client error: {}",
                e
            )))
        })?;
        Ok(())
    }
}
