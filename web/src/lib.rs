//! Axum integration for the todo lists service.
//!
//! This crate holds the imperative shell that sits between HTTP and the
//! reducer-driven core:
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │         Imperative Shell (Axum)         │  ← HTTP, forms, cookies
//! │  - Session resolution                   │  ← Correlation IDs, logging
//! │  - Response negotiation                 │
//! ├─────────────────────────────────────────┤
//! │         Functional Core                 │
//! │  - Validation and state transitions     │  ← Testable at memory speed
//! │  - No I/O                               │
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Request Flow
//!
//! 1. **HTTP Request** arrives; the session cookie layer loads its session
//! 2. **Extract data** from request (session, form, path, negotiated [`ResponseFormat`])
//! 3. **Build Action** from extracted data
//! 4. **Dispatch** action through the session's `Store`
//! 5. **Map result** to a redirect, a view or an [`AppError`]

#![forbid(unsafe_code)]
#![warn(missing_docs, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod session;

// Re-export key types for convenience
pub use error::AppError;
pub use extractors::{CorrelationId, ResponseFormat};
pub use middleware::{CORRELATION_ID_HEADER, correlation_id_layer};
pub use session::{SESSION_COOKIE, Session, SessionId, SessionRegistry, session_layer};

/// Result type alias for web handlers.
pub type WebResult<T> = Result<T, AppError>;
