//! Server-side sessions on top of `tower-sessions`.
//!
//! [`session_layer`] installs a `tower-sessions` manager that owns the session
//! cookie and its inactivity expiry. The session record only carries an opaque
//! [`SessionId`]; the data behind it lives in the [`SessionRegistry`] as a
//! shared value, so every request of one session reaches the same state.
//!
//! # Example
//!
//! ```ignore
//! use todo_lists_web::session::{SessionRegistry, session_layer};
//!
//! let ttl = Duration::hours(24);
//! let registry = SessionRegistry::new(Arc::new(SystemClock), ttl, MySession::default);
//! let app = Router::new()
//!     .route("/lists", get(index))
//!     .layer(session_layer(ttl))
//!     .with_state(registry);
//! ```

use crate::error::AppError;
use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use todo_lists_core::environment::Clock;
use tokio::sync::Mutex;
use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer, cookie::SameSite};
use uuid::Uuid;

/// Name of the cookie carrying the session.
pub const SESSION_COOKIE: &str = "todo_lists_session";

/// Key of the [`SessionId`] inside the cookie session's record.
const SESSION_ID_KEY: &str = "session_id";

/// Create the layer that hands out and reads session cookies.
///
/// Cookies are `HttpOnly`, `SameSite=Lax` and scoped to `/`. A session expires
/// after `ttl` without requests; every request refreshes it.
#[must_use]
pub fn session_layer(ttl: Duration) -> SessionManagerLayer<MemoryStore> {
    SessionManagerLayer::new(MemoryStore::default())
        .with_name(SESSION_COOKIE)
        .with_same_site(SameSite::Lax)
        .with_http_only(true)
        .with_secure(false)
        .with_always_save(true)
        .with_expiry(Expiry::OnInactivity(time::Duration::seconds(
            ttl.num_seconds(),
        )))
}

/// Opaque session identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(Uuid);

impl SessionId {
    /// Creates a new random `SessionId`
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the inner UUID
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

struct Entry<T> {
    data: Arc<T>,
    last_seen: DateTime<Utc>,
}

/// Outcome of [`SessionRegistry::resolve`].
pub struct ResolvedSession<T> {
    /// ID the data lives under (new when `created`)
    pub id: SessionId,
    /// Shared session data
    pub data: Arc<T>,
    /// Whether the session was created by this call
    pub created: bool,
}

/// In-memory session data.
///
/// Each session's data is created by the registry's factory on first use and
/// shared behind an `Arc`, so handlers for the same session see the same
/// value. Clones of the registry share the same map.
pub struct SessionRegistry<T> {
    sessions: Arc<Mutex<HashMap<SessionId, Entry<T>>>>,
    clock: Arc<dyn Clock>,
    ttl: Duration,
    factory: Arc<dyn Fn() -> T + Send + Sync>,
}

impl<T> Clone for SessionRegistry<T> {
    fn clone(&self) -> Self {
        Self {
            sessions: Arc::clone(&self.sessions),
            clock: Arc::clone(&self.clock),
            ttl: self.ttl,
            factory: Arc::clone(&self.factory),
        }
    }
}

impl<T> fmt::Debug for SessionRegistry<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionRegistry")
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

impl<T> SessionRegistry<T>
where
    T: Send + Sync + 'static,
{
    /// Create a registry
    ///
    /// # Arguments
    ///
    /// * `clock` - Time source for expiry
    /// * `ttl` - Idle time after which a session expires
    /// * `factory` - Builds the data of a new session
    pub fn new<F>(clock: Arc<dyn Clock>, ttl: Duration, factory: F) -> Self
    where
        F: Fn() -> T + Send + Sync + 'static,
    {
        Self {
            sessions: Arc::new(Mutex::new(HashMap::new())),
            clock,
            ttl,
            factory: Arc::new(factory),
        }
    }

    /// Idle time after which a session expires
    #[must_use]
    pub const fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Look up the requested session, creating a fresh one when it is missing
    /// or expired.
    pub async fn resolve(&self, requested: Option<SessionId>) -> ResolvedSession<T> {
        let now = self.clock.now();
        let mut sessions = self.sessions.lock().await;

        if let Some(id) = requested {
            match sessions.get_mut(&id) {
                Some(entry) if now - entry.last_seen <= self.ttl => {
                    entry.last_seen = now;
                    return ResolvedSession {
                        id,
                        data: Arc::clone(&entry.data),
                        created: false,
                    };
                }
                Some(_) => {
                    sessions.remove(&id);
                    tracing::debug!(session_id = %id, "Session expired");
                }
                None => tracing::debug!(session_id = %id, "Unknown session"),
            }
        }

        let id = SessionId::new();
        let data = Arc::new((self.factory)());
        sessions.insert(
            id,
            Entry {
                data: Arc::clone(&data),
                last_seen: now,
            },
        );
        tracing::info!(session_id = %id, active = sessions.len(), "Session created");

        ResolvedSession {
            id,
            data,
            created: true,
        }
    }

    /// Remove every session idle for longer than the TTL
    ///
    /// Returns how many sessions were removed.
    pub async fn purge_expired(&self) -> usize {
        let now = self.clock.now();
        let mut sessions = self.sessions.lock().await;
        let before = sessions.len();
        sessions.retain(|_, entry| now - entry.last_seen <= self.ttl);
        let purged = before - sessions.len();
        if purged > 0 {
            tracing::info!(purged, remaining = sessions.len(), "Purged expired sessions");
        }
        purged
    }

    /// Number of live sessions (expired ones not yet purged included)
    pub async fn len(&self) -> usize {
        self.sessions.lock().await.len()
    }

    /// Whether no session exists
    pub async fn is_empty(&self) -> bool {
        self.sessions.lock().await.is_empty()
    }

    /// Run [`purge_expired`](Self::purge_expired) every `every` on the Tokio runtime
    pub fn spawn_purger(&self, every: std::time::Duration) -> tokio::task::JoinHandle<()> {
        let registry = self.clone();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(every);
            // The first tick completes immediately
            ticker.tick().await;
            loop {
                ticker.tick().await;
                registry.purge_expired().await;
            }
        })
    }
}

/// The current request's session.
///
/// Resolved from the cookie session installed by [`session_layer`] against the
/// [`SessionRegistry`] found in the router state. A request without a usable
/// session gets a new one, and the layer sends its cookie with the response.
///
/// # Example
///
/// ```ignore
/// async fn handler(session: Session<ListSession>) -> String {
///     format!("session {}", session.id)
/// }
/// ```
pub struct Session<T> {
    /// Session ID
    pub id: SessionId,
    /// Shared session data
    pub data: Arc<T>,
}

impl<T> Clone for Session<T> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            data: Arc::clone(&self.data),
        }
    }
}

impl<T> std::ops::Deref for Session<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.data
    }
}

fn store_error(error: tower_sessions::session::Error) -> AppError {
    AppError::internal("Session store unavailable").with_source(anyhow::Error::from(error))
}

#[async_trait]
impl<S, T> FromRequestParts<S> for Session<T>
where
    S: Send + Sync,
    T: Send + Sync + 'static,
    SessionRegistry<T>: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        if let Some(session) = parts.extensions.get::<Self>() {
            return Ok(session.clone());
        }

        let cookie_session = tower_sessions::Session::from_request_parts(parts, state)
            .await
            .map_err(|(_, message)| AppError::internal(message))?;
        let registry = SessionRegistry::<T>::from_ref(state);

        let requested = cookie_session
            .get::<SessionId>(SESSION_ID_KEY)
            .await
            .map_err(store_error)?;
        let resolved = registry.resolve(requested).await;
        if resolved.created {
            cookie_session
                .insert(SESSION_ID_KEY, resolved.id)
                .await
                .map_err(store_error)?;
        }

        let session = Self {
            id: resolved.id,
            data: resolved.data,
        };
        parts.extensions.insert(session.clone());
        Ok(session)
    }
}
