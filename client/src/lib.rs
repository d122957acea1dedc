mod actions;
mod app;
mod dom;
mod net;
mod util;

pub use actions::{bind_all, perform};
pub use app::run;
pub use dom::{apply_patch, button_data, csrf_token};
pub use net::{fetch_request, read_outcome, send};
