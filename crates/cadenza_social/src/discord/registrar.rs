//! Slash-command registration over the Discord HTTP API.

use super::conversions::{to_command, to_guild_id};
use async_trait::async_trait;
use cadenza_core::CommandSpec;
use cadenza_error::{CadenzaResult, RegistrationError};
use cadenza_interface::{CommandRegistrar, RegistrationScope};
use serenity::all::{Command, CreateCommand, Http};
use std::sync::Arc;
use tracing::{debug, instrument};

/// Overwrites the application's command set.
#[derive(Clone)]
pub struct DiscordRegistrar {
    http: Arc<Http>,
}

impl DiscordRegistrar {
    /// Registrar using `http`.
    pub fn new(http: Arc<Http>) -> Self {
        Self { http }
    }
}

#[async_trait]
impl CommandRegistrar for DiscordRegistrar {
    #[instrument(skip(self, commands), fields(count = commands.len()))]
    async fn register(
        &self,
        commands: &[CommandSpec],
        scope: RegistrationScope,
    ) -> CadenzaResult<usize> {
        let builders: Vec<CreateCommand> = commands.iter().map(to_command).collect();
        let registered = match scope {
            RegistrationScope::Global => Command::set_global_commands(&*self.http, builders).await,
            RegistrationScope::Guild(guild) => {
                to_guild_id(guild).set_commands(&*self.http, builders).await
            }
        }
        .map_err(|e| RegistrationError::new(e.to_string()))?;
        debug!(registered = registered.len(), "Discord accepted commands");
        Ok(registered.len())
    }
}
