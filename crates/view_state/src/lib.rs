//! Controller for the catalog client: immutable view snapshots, a pure reducer,
//! and the backend worker that executes the commands it emits.

pub mod commands;
pub mod effects;
pub mod events;
pub mod forms;
pub mod navigation;
pub mod orchestration;
pub mod reducer;
pub mod runtime;
pub mod state;
pub mod store;
pub mod view;

#[cfg(test)]
#[path = "tests/support.rs"]
mod test_support;

pub use commands::BackendCommand;
pub use effects::EffectHandler;
pub use events::{
    AppEvent, CreateOrigin, UiError, UiErrorCategory, UiErrorContext, UiEvent, UserAction,
};
pub use navigation::{Modal, Navigation, Tab};
pub use orchestration::{dispatch_backend_command, Controller};
pub use state::{Notice, NoticeLevel, ViewState};
pub use store::Store;
