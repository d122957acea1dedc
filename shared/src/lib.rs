mod markup;
mod outcome;
mod request;

pub use markup::*;
pub use outcome::{is_success, resolve, ActionError, DomPatch, ToggleResponse, WatchState};
pub use request::{ActionKind, ActionRequest, ButtonData};
