//! Routes inbound interactions to their handlers.

use crate::render::{MessageSpec, error_message, render};
use crate::{Command, CommandHandlers, CommandInvocation, InteractionContext, ReadinessWatch};
use cadenza_core::ReplyState;
use cadenza_error::CadenzaResult;
use futures::FutureExt;
use std::panic::AssertUnwindSafe;
use std::str::FromStr;
use tracing::{debug, error, info, instrument, warn};

const NOT_READY: &str = "I'm still starting up. Try again in a few seconds.";
const PANIC_MESSAGE: &str = "Something went wrong while running this command";

/// How a dispatch ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum DispatchOutcome {
    /// The service was still initializing; no handler ran
    NotReady,
    /// The command name is not in the catalog
    Unknown,
    /// The handler completed
    Completed,
    /// The handler failed or panicked; the failure was reported
    Failed,
}

/// Maps command identity to handler and enforces the single-acknowledgment rule.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    handlers: CommandHandlers,
    readiness: ReadinessWatch,
}

impl Dispatcher {
    /// Dispatcher serving `handlers` once `readiness` reports ready.
    pub fn new(handlers: CommandHandlers, readiness: ReadinessWatch) -> Self {
        Self {
            handlers,
            readiness,
        }
    }

    /// Handle one interaction to completion.
    #[instrument(skip(self, ctx), fields(command = ctx.command(), user = %ctx.user(), guild = ?ctx.guild()))]
    pub async fn dispatch(&self, ctx: &mut InteractionContext) -> DispatchOutcome {
        if !self.readiness.is_ready() {
            debug!("Command received before startup finished");
            let message = render(&MessageSpec::notice("Not ready", NOT_READY));
            if let Err(e) = ctx.reply(&message, true).await {
                warn!(error = %e, "Failed to send not-ready reply");
            }
            return DispatchOutcome::NotReady;
        }

        let Ok(command) = Command::from_str(ctx.command()) else {
            warn!("Unknown command");
            return DispatchOutcome::Unknown;
        };

        let outcome = AssertUnwindSafe(self.run(command, ctx)).catch_unwind().await;
        match outcome {
            Ok(Ok(())) => {
                info!(state = %ctx.reply_state(), "Command completed");
                DispatchOutcome::Completed
            }
            Ok(Err(e)) => {
                warn!(error = %e, "Command failed");
                report_failure(ctx, e.user_message()).await;
                DispatchOutcome::Failed
            }
            Err(panic) => {
                let reason = panic
                    .downcast_ref::<&str>()
                    .map(|s| s.to_string())
                    .or_else(|| panic.downcast_ref::<String>().cloned())
                    .unwrap_or_else(|| "unknown panic".to_string());
                error!(%reason, "Command handler panicked");
                report_failure(ctx, PANIC_MESSAGE.to_string()).await;
                DispatchOutcome::Failed
            }
        }
    }

    async fn run(&self, command: Command, ctx: &mut InteractionContext) -> CadenzaResult<()> {
        ctx.guild_id()?;
        let invocation = CommandInvocation::parse(command, ctx)?;
        self.handlers.handle(ctx, invocation).await
    }
}

/// Deliver a failure according to the reply state.
async fn report_failure(ctx: &mut InteractionContext, text: String) {
    let message = error_message(text);
    let sent = match ctx.reply_state() {
        ReplyState::Unacknowledged => ctx.reply(&message, true).await,
        ReplyState::Deferred => ctx.edit_reply(&message).await,
        ReplyState::Replied => {
            debug!("Failure after reply; logged only");
            return;
        }
    };
    if let Err(e) = sent {
        error!(error = %e, "Failed to deliver error reply");
    }
}
