use std::sync::Arc;

use crate::{
    commands::BackendCommand,
    events::AppEvent,
    reducer::{reduce, Transition},
    state::ViewState,
};

type RenderHook = Box<dyn Fn(u64) + Send>;

/// Single owner of the current snapshot. Every dispatch swaps in a whole new
/// snapshot and advances the revision by exactly one.
pub struct Store {
    state: Arc<ViewState>,
    revision: u64,
    render_hook: Option<RenderHook>,
}

impl Store {
    pub fn new(initial: ViewState) -> Self {
        Self {
            state: Arc::new(initial),
            revision: 0,
            render_hook: None,
        }
    }

    /// Called once per dispatch with the new revision.
    pub fn set_render_hook(&mut self, hook: impl Fn(u64) + Send + 'static) {
        self.render_hook = Some(Box::new(hook));
    }

    pub fn dispatch(&mut self, event: impl Into<AppEvent>) -> Vec<BackendCommand> {
        let Transition { state, commands } = reduce(ViewState::clone(&self.state), event.into());
        self.state = Arc::new(state);
        self.revision += 1;
        if let Some(hook) = &self.render_hook {
            hook(self.revision);
        }
        commands
    }

    pub fn snapshot(&self) -> Arc<ViewState> {
        Arc::clone(&self.state)
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }
}
