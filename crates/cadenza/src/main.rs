//! Cadenza bot binary.
//!
//! Loads settings, builds the in-memory playback service, wires the command
//! layer to Discord and runs until Ctrl-C.

use cadenza::{
    BotSettings, CadenzaBot, CadenzaHandler, CommandCatalog, CommandHandlers, Dispatcher,
    EventBridge, InMemoryPlayback, PlaybackService, StartupSequence, TelemetryConfig,
    TrackLibrary, init_telemetry, install_panic_hook, readiness,
};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info};

/// Command-line arguments.
#[derive(Parser, Debug)]
#[command(name = "cadenza")]
#[command(about = "Cadenza - Discord music bot")]
#[command(version)]
struct Args {
    /// Settings file, layered over ./cadenza.toml
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Emit JSON logs
    #[arg(long, env = "LOG_JSON")]
    json_logs: bool,

    /// Track library, overriding the settings
    #[arg(long)]
    library: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let args = Args::parse();
    let settings = BotSettings::load(args.config.as_deref())?;

    let telemetry = TelemetryConfig::default().with_json_logs(args.json_logs || *settings.log_json());
    let _guard = init_telemetry(&telemetry)?;
    install_panic_hook();
    info!(?settings, "Starting Cadenza");

    let library_path = args.library.unwrap_or_else(|| settings.library_path().clone());
    let library = TrackLibrary::from_file(&library_path)?;
    info!(path = %library_path.display(), tracks = library.len(), "Track library loaded");

    let playback = Arc::new(InMemoryPlayback::new(library));
    let service: Arc<dyn PlaybackService> = playback.clone();
    let subscription = service.subscribe();

    let (gate, watch) = readiness();
    let catalog = CommandCatalog::new();
    let startup = StartupSequence::new(
        service.clone(),
        catalog,
        settings.registration_scope(),
        gate,
    );
    let dispatcher = Dispatcher::new(CommandHandlers::new(service), watch);
    let handler = CadenzaHandler::new(Arc::new(dispatcher), Arc::new(startup));

    let mut bot = CadenzaBot::new(
        settings.discord_token(),
        *settings.application_id(),
        handler,
    )
    .await?;

    let bridge = EventBridge::new(Arc::new(bot.messenger()));
    tokio::spawn(bridge.run(subscription));

    let ticker = playback.clone();
    let tick = settings.tick_interval();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(tick);
        loop {
            interval.tick().await;
            ticker.advance_finished().await;
        }
    });

    let shard_manager = bot.shard_manager();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => info!("Shutdown signal received, stopping gracefully..."),
            Err(e) => error!(error = %e, "Failed to listen for Ctrl-C; shutting down"),
        }
        shard_manager.shutdown_all().await;
    });

    bot.start().await?;
    info!("Cadenza stopped");
    Ok(())
}
