//! Runtime bridge between the UI command queue and backend event intake.

use std::{
    sync::Arc,
    thread::{self, JoinHandle},
};

use crossbeam_channel::{Receiver, Sender, TrySendError};

use crate::{
    commands::BackendCommand,
    effects::EffectHandler,
    events::{UiError, UiErrorContext, UiEvent},
};

type Waker = Arc<dyn Fn() + Send + Sync>;

/// Backend side of the event queue. Waking lets the render loop redraw as soon
/// as a result lands instead of on its next poll.
#[derive(Clone)]
pub struct EventSink {
    ui_tx: Sender<UiEvent>,
    waker: Option<Waker>,
}

impl EventSink {
    pub fn new(ui_tx: Sender<UiEvent>) -> Self {
        Self { ui_tx, waker: None }
    }

    pub fn with_waker(mut self, waker: impl Fn() + Send + Sync + 'static) -> Self {
        self.waker = Some(Arc::new(waker));
        self
    }

    pub fn send(&self, event: UiEvent) {
        match self.ui_tx.try_send(event) {
            Ok(()) => {}
            Err(TrySendError::Full(_)) => {
                tracing::warn!("ui event queue is full; dropping backend event");
            }
            Err(TrySendError::Disconnected(_)) => {
                tracing::debug!("ui event queue closed; dropping backend event");
                return;
            }
        }
        if let Some(wake) = &self.waker {
            wake();
        }
    }
}

/// Starts the backend worker thread. Each command runs as its own task so a
/// slow request never holds up the ones queued behind it. The worker exits
/// once every command sender is dropped.
pub fn launch(
    cmd_rx: Receiver<BackendCommand>,
    sink: EventSink,
    handler: EffectHandler,
) -> JoinHandle<()> {
    thread::spawn(move || {
        sink.send(UiEvent::Info("Backend worker starting...".to_string()));
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                sink.send(UiEvent::Error(UiError::from_message(
                    UiErrorContext::BackendStartup,
                    format!("backend worker startup failure: failed to build runtime: {err}"),
                )));
                tracing::error!("failed to build backend runtime: {err}");
                return;
            }
        };

        sink.send(UiEvent::Info("Backend worker ready".to_string()));
        while let Ok(cmd) = cmd_rx.recv() {
            let handler = handler.clone();
            let sink = sink.clone();
            runtime.spawn(async move {
                if let Some(event) = handler.execute(cmd).await {
                    sink.send(event);
                }
            });
        }
        tracing::info!("backend command queue closed; stopping worker");
    })
}

#[cfg(test)]
#[path = "tests/runtime_tests.rs"]
mod tests;
