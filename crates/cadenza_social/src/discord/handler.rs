//! Serenity event handler wiring the gateway to the command layer.

use super::conversions::{channel_id, guild_id, option_values, user_id};
use super::{DiscordRegistrar, DiscordResponder};
use crate::{Dispatcher, InteractionContext, StartupSequence, VoiceState};
use serenity::all::{CommandInteraction, Context, EventHandler, GatewayIntents, Interaction, Ready};
use serenity::async_trait;
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Gateway event handler.
///
/// Runs the startup sequence on every ready event until it succeeds, and
/// dispatches slash commands.
pub struct CadenzaHandler {
    dispatcher: Arc<Dispatcher>,
    startup: Arc<StartupSequence>,
}

impl CadenzaHandler {
    /// Handler dispatching through `dispatcher` and starting up via `startup`.
    pub fn new(dispatcher: Arc<Dispatcher>, startup: Arc<StartupSequence>) -> Self {
        Self {
            dispatcher,
            startup,
        }
    }

    /// Gateway intents the handler needs.
    pub fn intents() -> GatewayIntents {
        GatewayIntents::GUILDS | GatewayIntents::GUILD_VOICE_STATES
    }

    fn context_for(ctx: &Context, command: CommandInteraction) -> InteractionContext {
        let guild = command.guild_id;
        let voice = guild.and_then(|guild| voice_state(ctx, guild, command.user.id));
        let options = option_values(&command.data.options);
        let name = command.data.name.clone();
        let user = user_id(command.user.id);
        let channel = channel_id(command.channel_id);

        let responder = Arc::new(DiscordResponder::new(ctx.http.clone(), command));
        let mut interaction =
            InteractionContext::new(name, user, channel, responder).with_options(options);
        if let Some(guild) = guild {
            interaction = interaction.with_guild(guild_id(guild));
        }
        if let Some(voice) = voice {
            interaction = interaction.with_voice(voice);
        }
        interaction
    }
}

/// The member's voice channel and the bot's permissions there, from the cache.
///
/// Unknown bot permissions count as missing.
fn voice_state(
    ctx: &Context,
    guild: serenity::all::GuildId,
    user: serenity::all::UserId,
) -> Option<VoiceState> {
    let bot = ctx.cache.current_user().id;
    let guild = ctx.cache.guild(guild)?;
    let channel = guild.voice_states.get(&user)?.channel_id?;

    let permissions = guild
        .channels
        .get(&channel)
        .zip(guild.members.get(&bot))
        .map(|(channel, member)| guild.user_permissions_in(channel, member));

    Some(VoiceState {
        channel: channel_id(channel),
        bot_can_connect: permissions.is_some_and(|p| p.connect()),
        bot_can_speak: permissions.is_some_and(|p| p.speak()),
    })
}

#[async_trait]
impl EventHandler for CadenzaHandler {
    #[instrument(skip_all, fields(bot = %ready.user.name))]
    async fn ready(&self, ctx: Context, ready: Ready) {
        info!(guilds = ready.guilds.len(), "Connected to Discord");
        let registrar = DiscordRegistrar::new(ctx.http.clone());
        let state = self
            .startup
            .on_ready(user_id(ready.user.id), &registrar)
            .await;
        info!(%state, "Startup sequence finished");
    }

    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        let Interaction::Command(command) = interaction else {
            debug!("Ignoring non-command interaction");
            return;
        };
        let mut interaction = Self::context_for(&ctx, command);
        self.dispatcher.dispatch(&mut interaction).await;
    }
}
