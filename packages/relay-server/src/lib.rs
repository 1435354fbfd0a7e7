// Claude relay - a stateless pass-through for the Anthropic Messages API
//
// Browser clients cannot call the upstream directly, so this server takes
// the caller's key and body, forwards them, and relays the reply verbatim.

pub mod app;
pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;

pub use app::{build_app, AppState};
pub use config::Config;
pub use error::RelayError;
