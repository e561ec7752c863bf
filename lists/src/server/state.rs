//! Application state for the todo lists HTTP server.

use crate::config::Config;
use crate::session::ListSession;
use axum::extract::FromRef;
use std::sync::Arc;
use todo_lists_core::environment::{Clock, SystemClock};
use todo_lists_web::SessionRegistry;

/// Application state shared across all HTTP handlers.
///
/// Cloning is cheap; all clones share the same sessions.
#[derive(Clone, Debug)]
pub struct AppState {
    /// Live sessions, each with its own lists
    pub sessions: SessionRegistry<ListSession>,
}

impl AppState {
    /// Create state for `config` using the system clock.
    #[must_use]
    pub fn new(config: &Config) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    /// Create state with an explicit clock for session expiry.
    #[must_use]
    pub fn with_clock(config: &Config, clock: Arc<dyn Clock>) -> Self {
        let env = config.list_environment();
        Self {
            sessions: SessionRegistry::new(clock, config.session_ttl(), move || {
                ListSession::new(env)
            }),
        }
    }
}

impl FromRef<AppState> for SessionRegistry<ListSession> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.sessions.clone()
    }
}
