//! Command orchestration from dispatched events to the backend command queue.

use crossbeam_channel::{Receiver, Sender, TrySendError};

use crate::{
    commands::BackendCommand,
    events::{AppEvent, UiEvent},
    state::ViewState,
    store::Store,
};

/// Queues one command. A command that cannot be queued comes back as an event
/// so the reducer can undo whatever it marked as in flight.
pub fn dispatch_backend_command(
    cmd_tx: &Sender<BackendCommand>,
    cmd: BackendCommand,
) -> Option<UiEvent> {
    let cmd_name = cmd.name();
    match cmd_tx.try_send(cmd) {
        Ok(()) => {
            tracing::debug!(command = cmd_name, "queued ui->backend command");
            None
        }
        Err(TrySendError::Full(command)) => {
            tracing::warn!(command = cmd_name, "ui command queue is full");
            Some(UiEvent::CommandNotQueued {
                command,
                reason: "UI command queue is full; please retry".to_string(),
            })
        }
        Err(TrySendError::Disconnected(command)) => {
            tracing::error!(command = cmd_name, "backend command processor disconnected");
            Some(UiEvent::CommandNotQueued {
                command,
                reason: concat!(
                    "Backend command processor disconnected ",
                    "(possible startup/runtime failure); restart the application"
                )
                .to_string(),
            })
        }
    }
}

/// Owns the store plus both queue ends the render surface talks through.
pub struct Controller {
    store: Store,
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
}

impl Controller {
    pub fn new(store: Store, cmd_tx: Sender<BackendCommand>, ui_rx: Receiver<UiEvent>) -> Self {
        Self {
            store,
            cmd_tx,
            ui_rx,
        }
    }

    pub fn state(&self) -> &ViewState {
        self.store.state()
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    /// Reduces the event and queues the resulting commands. Queue failures
    /// are fed back through the reducer before returning.
    pub fn dispatch(&mut self, event: impl Into<AppEvent>) {
        let mut pending = vec![event.into()];
        while let Some(event) = pending.pop() {
            for cmd in self.store.dispatch(event) {
                if let Some(rejected) = dispatch_backend_command(&self.cmd_tx, cmd) {
                    pending.push(rejected.into());
                }
            }
        }
    }

    /// Applies every backend event that has arrived so far. Returns how many
    /// were applied.
    pub fn drain_backend_events(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(event) = self.ui_rx.try_recv() {
            self.dispatch(event);
            applied += 1;
        }
        applied
    }
}
