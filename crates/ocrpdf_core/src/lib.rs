//! OCR batch core: pure state machine and view-model helpers.
mod effect;
mod msg;
mod state;
mod update;
mod validate;
mod view_model;

pub use effect::{Effect, RunRequest};
pub use msg::{FileResultKind, Msg, RunEndKind};
pub use state::{AppState, SessionState, DEFAULT_MAX_MEGAPIXELS};
pub use update::update;
pub use validate::{validate, ValidationError};
pub use view_model::{AppViewModel, RunTally};
