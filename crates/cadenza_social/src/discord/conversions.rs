//! Conversions between Cadenza types and Serenity models and builders.

use super::{DiscordError, DiscordErrorKind};
use crate::render::DESCRIPTION_LIMIT;
use cadenza_core::{
    ChannelId, CommandSpec, GuildId, ParamValue, ParameterKind, ParameterSpec, RenderedMessage,
    UserId,
};
use cadenza_error::{CadenzaResult, DeliveryError, DeliveryErrorKind};
use serenity::all::{
    CommandDataOption, CommandDataOptionValue, CommandOptionType, CreateCommand,
    CreateCommandOption, CreateEmbed, CreateEmbedFooter,
};
use std::collections::HashMap;
use tracing::debug;

/// Maximum embed title length.
pub const TITLE_LIMIT: usize = 256;
/// Maximum number of embed fields.
pub const FIELD_COUNT_LIMIT: usize = 25;
/// Maximum embed field name length.
pub const FIELD_NAME_LIMIT: usize = 256;
/// Maximum embed field value length.
pub const FIELD_VALUE_LIMIT: usize = 1024;
/// Maximum embed footer length.
pub const FOOTER_LIMIT: usize = 2048;

/// Serenity guild id to Cadenza guild id.
pub fn guild_id(id: serenity::all::GuildId) -> GuildId {
    GuildId(id.get())
}

/// Serenity channel id to Cadenza channel id.
pub fn channel_id(id: serenity::all::ChannelId) -> ChannelId {
    ChannelId(id.get())
}

/// Serenity user id to Cadenza user id.
pub fn user_id(id: serenity::all::UserId) -> UserId {
    UserId(id.get())
}

/// Cadenza channel id to Serenity channel id.
pub fn to_channel_id(id: ChannelId) -> serenity::all::ChannelId {
    serenity::all::ChannelId::new(id.0)
}

/// Cadenza guild id to Serenity guild id.
pub fn to_guild_id(id: GuildId) -> serenity::all::GuildId {
    serenity::all::GuildId::new(id.0)
}

fn check_len(what: &str, text: &str, limit: usize) -> Result<(), DiscordError> {
    let len = text.chars().count();
    if len > limit {
        return Err(DiscordError::new(DiscordErrorKind::EmbedLimit(format!(
            "{} is {} characters (limit {})",
            what, len, limit
        ))));
    }
    Ok(())
}

/// Check `message` against Discord's embed size limits.
pub fn validate_embed(message: &RenderedMessage) -> Result<(), DiscordError> {
    check_len("title", &message.title, TITLE_LIMIT)?;
    check_len("description", &message.description, DESCRIPTION_LIMIT)?;
    if message.fields.len() > FIELD_COUNT_LIMIT {
        return Err(DiscordError::new(DiscordErrorKind::EmbedLimit(format!(
            "{} fields (limit {})",
            message.fields.len(),
            FIELD_COUNT_LIMIT
        ))));
    }
    for field in &message.fields {
        check_len("field name", &field.name, FIELD_NAME_LIMIT)?;
        check_len("field value", &field.value, FIELD_VALUE_LIMIT)?;
    }
    if let Some(footer) = &message.footer {
        check_len("footer", footer, FOOTER_LIMIT)?;
    }
    Ok(())
}

/// Build an embed from a rendered message.
///
/// # Errors
///
/// [`DeliveryErrorKind::Render`] when the message exceeds an embed limit.
#[track_caller]
pub fn to_embed(message: &RenderedMessage) -> CadenzaResult<CreateEmbed> {
    validate_embed(message)
        .map_err(|e| DeliveryError::new(DeliveryErrorKind::Render(e.kind().to_string())))?;

    let mut embed = CreateEmbed::new()
        .title(&message.title)
        .colour(message.color);
    if !message.description.is_empty() {
        embed = embed.description(&message.description);
    }
    for field in &message.fields {
        embed = embed.field(&field.name, &field.value, field.inline);
    }
    if let Some(thumbnail) = &message.thumbnail {
        embed = embed.thumbnail(thumbnail);
    }
    if let Some(footer) = &message.footer {
        embed = embed.footer(CreateEmbedFooter::new(footer));
    }
    Ok(embed)
}

fn to_option(parameter: &ParameterSpec) -> CreateCommandOption {
    let kind = match parameter.kind {
        ParameterKind::String => CommandOptionType::String,
        ParameterKind::Integer => CommandOptionType::Integer,
    };
    let mut option = CreateCommandOption::new(kind, &parameter.name, &parameter.description)
        .required(parameter.required);

    if let Some(min) = parameter.min.and_then(|min| u64::try_from(min).ok()) {
        option = option.min_int_value(min);
    }
    if let Some(max) = parameter.max.and_then(|max| u64::try_from(max).ok()) {
        option = option.max_int_value(max);
    }
    for choice in &parameter.choices {
        option = match &choice.value {
            ParamValue::String(value) => option.add_string_choice(&choice.name, value),
            ParamValue::Integer(value) => match i32::try_from(*value) {
                Ok(value) => option.add_int_choice(&choice.name, value),
                Err(_) => {
                    debug!(choice = %choice.name, "Integer choice out of range; skipped");
                    option
                }
            },
        };
    }
    option
}

/// Build a slash-command registration from a command spec.
pub fn to_command(spec: &CommandSpec) -> CreateCommand {
    spec.parameters.iter().fold(
        CreateCommand::new(&spec.name).description(&spec.description),
        |command, parameter| command.add_option(to_option(parameter)),
    )
}

/// Parameter values of a slash-command interaction.
///
/// Option types the catalog never declares are ignored.
pub fn option_values(options: &[CommandDataOption]) -> HashMap<String, ParamValue> {
    options
        .iter()
        .filter_map(|option| {
            let value = match &option.value {
                CommandDataOptionValue::String(value) => ParamValue::String(value.clone()),
                CommandDataOptionValue::Integer(value) => ParamValue::Integer(*value),
                _ => {
                    debug!(name = %option.name, "Ignoring unsupported option");
                    return None;
                }
            };
            Some((option.name.clone(), value))
        })
        .collect()
}
