//! Process readiness: commands are refused until startup completes.

use crate::CommandCatalog;
use cadenza_core::UserId;
use cadenza_interface::{CommandRegistrar, PlaybackService, RegistrationScope};
use std::sync::Arc;
use tokio::sync::{Mutex, watch};
use tracing::{error, info, instrument};

/// Lifecycle of the bot process.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::IntoStaticStr,
)]
#[strum(serialize_all = "snake_case")]
pub enum ServiceState {
    /// Startup has not finished; commands are refused
    #[default]
    Initializing,
    /// Commands are served
    Ready,
}

/// The single handle allowed to open the gate.
///
/// [`mark_ready`](Self::mark_ready) consumes the gate, so the state changes at
/// most once and never back.
#[derive(Debug)]
pub struct ReadinessGate {
    sender: watch::Sender<ServiceState>,
}

/// Read side of the gate, cheap to clone.
#[derive(Debug, Clone)]
pub struct ReadinessWatch {
    receiver: watch::Receiver<ServiceState>,
}

/// A closed gate and a watch on it.
///
/// # Examples
///
/// ```
/// use cadenza_social::{ServiceState, readiness};
///
/// let (gate, watch) = readiness();
/// assert_eq!(watch.state(), ServiceState::Initializing);
/// gate.mark_ready();
/// assert!(watch.is_ready());
/// ```
pub fn readiness() -> (ReadinessGate, ReadinessWatch) {
    let (sender, receiver) = watch::channel(ServiceState::Initializing);
    (ReadinessGate { sender }, ReadinessWatch { receiver })
}

impl ReadinessGate {
    /// Another watch on this gate.
    pub fn watch(&self) -> ReadinessWatch {
        ReadinessWatch {
            receiver: self.sender.subscribe(),
        }
    }

    /// Open the gate.
    pub fn mark_ready(self) {
        self.sender.send_replace(ServiceState::Ready);
        info!("Service ready");
    }
}

impl ReadinessWatch {
    /// Current state.
    pub fn state(&self) -> ServiceState {
        *self.receiver.borrow()
    }

    /// Whether commands are served.
    pub fn is_ready(&self) -> bool {
        self.state() == ServiceState::Ready
    }

    /// Wait until the gate opens. Returns false if the gate was dropped closed.
    pub async fn wait_ready(&mut self) -> bool {
        self.receiver
            .wait_for(|state| *state == ServiceState::Ready)
            .await
            .is_ok()
    }
}

/// Work done when the gateway reports ready: initialize the collaborator,
/// register the catalog, then open the gate.
///
/// A failed step is logged and retried on the next ready event. Once the gate
/// is open later ready events do nothing.
pub struct StartupSequence {
    playback: Arc<dyn PlaybackService>,
    catalog: CommandCatalog,
    scope: RegistrationScope,
    gate: Mutex<Option<ReadinessGate>>,
    initialized: Mutex<bool>,
}

impl std::fmt::Debug for StartupSequence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StartupSequence")
            .field("commands", &self.catalog.len())
            .field("scope", &self.scope)
            .finish_non_exhaustive()
    }
}

impl StartupSequence {
    /// Sequence that opens `gate` once startup succeeds.
    pub fn new(
        playback: Arc<dyn PlaybackService>,
        catalog: CommandCatalog,
        scope: RegistrationScope,
        gate: ReadinessGate,
    ) -> Self {
        Self {
            playback,
            catalog,
            scope,
            gate: Mutex::new(Some(gate)),
            initialized: Mutex::new(false),
        }
    }

    /// Run the remaining startup steps. Returns the state afterwards.
    #[instrument(skip(self, registrar), fields(scope = ?self.scope))]
    pub async fn on_ready(
        &self,
        bot_user: UserId,
        registrar: &dyn CommandRegistrar,
    ) -> ServiceState {
        let mut gate = self.gate.lock().await;
        if gate.is_none() {
            info!("Already ready; ignoring repeated ready event");
            return ServiceState::Ready;
        }

        let mut initialized = self.initialized.lock().await;
        if !*initialized {
            match self.playback.initialize(bot_user).await {
                Ok(()) => *initialized = true,
                Err(e) => {
                    error!(error = %e, "Playback initialization failed; will retry on next ready");
                    return ServiceState::Initializing;
                }
            }
        }

        if let Err(e) = self.catalog.register(registrar, self.scope).await {
            error!(error = %e, "Command registration failed; will retry on next ready");
            return ServiceState::Initializing;
        }

        if let Some(gate) = gate.take() {
            gate.mark_ready();
        }
        ServiceState::Ready
    }
}
