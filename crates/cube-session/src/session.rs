//! The live cube: one controller, one presenter, and the deferred
//! completions in between, driven by a single event loop.
//!
//! Input and completions are handled one at a time on the loop task, so
//! the controller never sees concurrent mutation. Teardown (explicit
//! shutdown, or every [`SessionHandle`] dropped) revokes the pending
//! completion before the loop returns, and the presenter receives nothing
//! after that point.

use std::time::Duration;

use cube_core::{Face, InteractionController, Orientation, Point, Settle};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::config::CubeConfig;
use crate::deferred::{Deferred, DeferredAction};
use crate::error::{Result, SessionError};
use crate::presenter::Presenter;

const EVENT_BUFFER: usize = 64;

/// Normalized host input.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputEvent {
    Press(Point),
    Move(Point),
    Release(Point),
    /// Explicit spin trigger (the "Extract Wisdom" button).
    Spin,
}

/// What a [`SessionHandle`] sends to the loop.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SessionCommand {
    Input(InputEvent),
    /// Stop accepting input and exit once nothing is pending.
    Drain,
    /// Tear down immediately, revoking anything pending.
    Shutdown,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SessionSummary {
    pub orientation: Orientation,
    pub active_face: Option<Face>,
    pub flows_started: u32,
    pub committed: u32,
    pub revoked: u32,
}

pub struct CubeSession<P> {
    controller: InteractionController<SmallRng>,
    presenter: P,
    deferred: Deferred,
    completions: mpsc::UnboundedReceiver<u64>,
    pending: Option<DeferredAction>,
    show_initial_wisdom: bool,
    flows_started: u32,
    committed: u32,
    revoked: u32,
}

impl<P: Presenter> CubeSession<P> {
    pub fn new(config: &CubeConfig, presenter: P) -> Result<Self> {
        config.validate()?;
        let catalogue = config.load_catalogue()?;
        let rng = match config.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_os_rng(),
        };
        let (deferred, completions) = Deferred::new();
        Ok(Self {
            controller: InteractionController::new(catalogue, config.tuning(), rng),
            presenter,
            deferred,
            completions,
            pending: None,
            show_initial_wisdom: config.show_initial_wisdom,
            flows_started: 0,
            committed: 0,
            revoked: 0,
        })
    }

    /// Run the loop on its own task.
    pub fn spawn(self) -> (SessionHandle, JoinHandle<SessionSummary>) {
        let (tx, rx) = mpsc::channel(EVENT_BUFFER);
        let task = tokio::spawn(self.run(rx));
        (SessionHandle { tx }, task)
    }

    pub async fn run(mut self, mut commands: mpsc::Receiver<SessionCommand>) -> SessionSummary {
        if self.show_initial_wisdom
            && let Some(face) = self.controller.present_initial()
        {
            tracing::debug!(%face, "initial wisdom presented");
        }
        self.present();

        let mut draining = false;
        loop {
            if draining && self.pending.is_none() {
                tracing::debug!("drained, no completion pending");
                break;
            }
            tokio::select! {
                Some(ticket) = self.completions.recv() => self.on_completion(ticket),
                command = commands.recv(), if !draining => match command {
                    Some(SessionCommand::Input(event)) => self.on_input(event),
                    Some(SessionCommand::Drain) => draining = true,
                    Some(SessionCommand::Shutdown) | None => break,
                },
            }
        }

        self.teardown().await;
        self.summary()
    }

    fn on_input(&mut self, event: InputEvent) {
        match event {
            InputEvent::Press(at) => {
                if self.controller.press_start(at) {
                    self.present();
                } else {
                    tracing::trace!("press ignored while spinning");
                }
            }
            InputEvent::Move(at) => {
                if self.controller.press_move(at) {
                    self.present();
                }
            }
            InputEvent::Release(at) => {
                if !self.controller.is_dragging() {
                    return;
                }
                match self.controller.press_end(at) {
                    Some(settle) => self.launch(settle),
                    None => self.present(),
                }
            }
            InputEvent::Spin => match self.controller.request_spin() {
                Some(settle) => self.launch(settle),
                None => tracing::trace!("spin ignored while spinning"),
            },
        }
    }

    fn launch(&mut self, settle: Settle) {
        tracing::debug!(
            ticket = settle.ticket,
            kind = ?settle.kind,
            face = %settle.face,
            duration_secs = settle.duration_secs,
            "flow started"
        );
        self.flows_started += 1;
        let delay = Duration::try_from_secs_f64(settle.duration_secs).unwrap_or_default();
        self.pending = Some(self.deferred.schedule(settle.ticket, delay));
        self.present();
    }

    fn on_completion(&mut self, ticket: u64) {
        match self.controller.complete(ticket) {
            Some(face) => {
                self.pending = None;
                self.committed += 1;
                tracing::info!(ticket, %face, "wisdom settled");
                self.present();
            }
            None => tracing::debug!(ticket, "stale completion ignored"),
        }
    }

    async fn teardown(&mut self) {
        if let Some(settle) = self.controller.teardown() {
            self.revoked += 1;
            tracing::debug!(ticket = settle.ticket, "pending completion revoked at teardown");
        }
        self.pending = None;
        self.deferred.shutdown().await;
        // Anything that fired between the last select and the revoke is dropped.
        while self.completions.try_recv().is_ok() {}
    }

    fn present(&mut self) {
        let frame = self.controller.frame();
        self.presenter.render(&frame);
        self.presenter
            .show_active_wisdom(self.controller.active_wisdom(), frame.panel_dimmed());
    }

    fn summary(&self) -> SessionSummary {
        SessionSummary {
            orientation: self.controller.orientation(),
            active_face: self.controller.state().active_face(),
            flows_started: self.flows_started,
            committed: self.committed,
            revoked: self.revoked,
        }
    }
}

/// Sending side of a spawned session. Dropping every clone tears it down.
#[derive(Clone)]
pub struct SessionHandle {
    tx: mpsc::Sender<SessionCommand>,
}

impl SessionHandle {
    async fn command(&self, command: SessionCommand) -> Result<()> {
        self.tx.send(command).await.map_err(|_| SessionError::Closed)
    }

    pub async fn send(&self, event: InputEvent) -> Result<()> {
        self.command(SessionCommand::Input(event)).await
    }

    pub async fn press(&self, x: f64, y: f64) -> Result<()> {
        self.send(InputEvent::Press(Point::new(x, y))).await
    }

    pub async fn motion(&self, x: f64, y: f64) -> Result<()> {
        self.send(InputEvent::Move(Point::new(x, y))).await
    }

    pub async fn release(&self, x: f64, y: f64) -> Result<()> {
        self.send(InputEvent::Release(Point::new(x, y))).await
    }

    pub async fn spin(&self) -> Result<()> {
        self.send(InputEvent::Spin).await
    }

    pub async fn drain(&self) -> Result<()> {
        self.command(SessionCommand::Drain).await
    }

    pub async fn shutdown(&self) -> Result<()> {
        self.command(SessionCommand::Shutdown).await
    }
}
