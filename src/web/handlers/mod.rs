//! Handlers for the OAuth login flow.

mod callback;
mod login;

pub use callback::{CallbackParams, callback_handler};
pub use login::login_handler;
