//! Bot settings layered from `cadenza.toml` files and the environment.

use cadenza_core::GuildId;
use cadenza_error::{CadenzaError, CadenzaResult, ConfigError};
use cadenza_interface::RegistrationScope;
use config::{Config, ConfigBuilder, Environment, File, builder::DefaultState};
use derive_getters::Getters;
use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, instrument};

const REDACTED: &str = "[redacted]";

fn default_library_path() -> PathBuf {
    PathBuf::from("library.toml")
}

fn default_tick_ms() -> u64 {
    1000
}

/// Runtime settings for the bot process.
///
/// Keys match the environment variables that override them, lowercased:
/// `DISCORD_TOKEN` becomes `discord_token`.
#[derive(Clone, Deserialize, Getters)]
pub struct BotSettings {
    /// Bot token
    #[serde(default)]
    discord_token: String,
    /// Application id, when the token alone is not enough to register commands
    #[serde(default)]
    application_id: Option<u64>,
    /// Register commands in this guild only
    #[serde(default)]
    guild_id: Option<u64>,
    /// Spotify client id, passed through to the playback service
    #[serde(default)]
    spotify_client_id: Option<String>,
    /// Spotify client secret, passed through to the playback service
    #[serde(default)]
    spotify_client_secret: Option<String>,
    /// Track library for the in-memory playback service
    #[serde(default = "default_library_path")]
    library_path: PathBuf,
    /// Emit JSON logs
    #[serde(default)]
    log_json: bool,
    /// How often finished tracks are advanced, in milliseconds
    #[serde(default = "default_tick_ms")]
    tick_interval_ms: u64,
}

impl fmt::Debug for BotSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let secret = |value: &Option<String>| value.as_ref().map(|_| REDACTED);
        f.debug_struct("BotSettings")
            .field("discord_token", &REDACTED)
            .field("application_id", &self.application_id)
            .field("guild_id", &self.guild_id)
            .field("spotify_client_id", &secret(&self.spotify_client_id))
            .field("spotify_client_secret", &secret(&self.spotify_client_secret))
            .field("library_path", &self.library_path)
            .field("log_json", &self.log_json)
            .field("tick_interval_ms", &self.tick_interval_ms)
            .finish()
    }
}

impl BotSettings {
    /// Load settings with precedence: environment > explicit file > ./cadenza.toml >
    /// ~/.config/cadenza/cadenza.toml.
    ///
    /// `.env` is read into the environment first. Every file is optional except
    /// an explicit `path`.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if a file cannot be parsed or no token is set.
    #[instrument(skip_all, fields(path = ?path))]
    pub fn load(path: Option<&Path>) -> CadenzaResult<Self> {
        match dotenvy::dotenv() {
            Ok(env_file) => debug!(env_file = %env_file.display(), "Loaded .env"),
            Err(e) => debug!(error = %e, "No .env loaded"),
        }

        let mut builder = Config::builder();
        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".config/cadenza/cadenza.toml");
            builder = builder.add_source(File::from(home_config).required(false));
        }
        builder = builder.add_source(File::with_name("cadenza").required(false));
        if let Some(path) = path {
            builder = builder.add_source(File::from(path));
        }
        builder = builder.add_source(Environment::default().try_parsing(true));

        Self::build(builder)
    }

    /// Load settings from a single TOML file, ignoring the environment.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the file cannot be read or parsed, or sets
    /// no token.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> CadenzaResult<Self> {
        Self::build(Config::builder().add_source(File::from(path.as_ref())))
    }

    fn build(builder: ConfigBuilder<DefaultState>) -> CadenzaResult<Self> {
        let settings: Self = builder
            .build()
            .map_err(|e| {
                CadenzaError::from(ConfigError::new(format!(
                    "Failed to build configuration: {}",
                    e
                )))
            })?
            .try_deserialize()
            .map_err(|e| {
                CadenzaError::from(ConfigError::new(format!(
                    "Failed to parse configuration: {}",
                    e
                )))
            })?;

        if settings.discord_token.trim().is_empty() {
            return Err(ConfigError::missing("DISCORD_TOKEN").into());
        }
        debug!(?settings, "Settings loaded");
        Ok(settings)
    }

    /// Where slash commands are registered.
    pub fn registration_scope(&self) -> RegistrationScope {
        RegistrationScope::from(self.guild_id.map(GuildId))
    }

    /// Interval between finished-track checks.
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms.max(100))
    }
}
