//! Custom Axum extractors.
//!
//! - `CorrelationId`: Extract or generate request correlation IDs
//! - `ResponseFormat`: Decide once per request whether the client navigates
//!   pages or consumes JSON
//!
//! # Examples
//!
//! ```ignore
//! use todo_lists_web::extractors::{CorrelationId, ResponseFormat};
//!
//! async fn handler(
//!     correlation_id: CorrelationId,
//!     format: ResponseFormat,
//! ) -> Response {
//!     tracing::info!(correlation_id = %correlation_id.0, ?format, "Processing request");
//!     match format {
//!         ResponseFormat::Json => StatusCode::NO_CONTENT.into_response(),
//!         ResponseFormat::Page => Redirect::to("/lists").into_response(),
//!     }
//! }
//! ```

use crate::middleware::CORRELATION_ID_HEADER;
use axum::{
    async_trait,
    extract::{FromRequestParts, Query},
    http::{HeaderMap, Uri, header, request::Parts},
};
use std::collections::HashMap;
use uuid::Uuid;

/// Correlation ID for request tracing.
///
/// Uses the ID stored by [`correlation_id_layer`](crate::middleware::correlation_id_layer)
/// when the layer is installed, otherwise reads `X-Correlation-ID` or
/// generates a new UUID v4.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CorrelationId(pub Uuid);

impl CorrelationId {
    /// Read the correlation ID from headers, or generate one
    #[must_use]
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let id = headers
            .get(CORRELATION_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| Uuid::parse_str(s).ok())
            .unwrap_or_else(Uuid::new_v4);
        Self(id)
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for CorrelationId
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        if let Some(existing) = parts.extensions.get::<Self>() {
            return Ok(*existing);
        }
        Ok(Self::from_headers(&parts.headers))
    }
}

/// How a handler should answer the current request.
///
/// This is the only place the service looks at request headers to choose a
/// response style:
///
/// - `Json` when `Accept` includes `application/json`, or the query string
///   carries `format=json`
/// - `Page` otherwise: mutations answer with redirects and flash messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResponseFormat {
    /// Full-page navigation (redirect after POST)
    #[default]
    Page,
    /// Script clients that want status codes and JSON bodies
    Json,
}

impl ResponseFormat {
    /// Negotiate the format from the request headers and URI
    ///
    /// The query string is decoded as a form, so `format=%6Ason` counts.
    /// An undecodable query string is ignored.
    #[must_use]
    pub fn negotiate(headers: &HeaderMap, uri: &Uri) -> Self {
        let accepts_json = headers
            .get_all(header::ACCEPT)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .flat_map(|v| v.split(','))
            .any(|media| {
                media
                    .split(';')
                    .next()
                    .is_some_and(|m| m.trim().eq_ignore_ascii_case("application/json"))
            });

        let asks_json = Query::<HashMap<String, String>>::try_from_uri(uri)
            .is_ok_and(|Query(params)| {
                params
                    .get("format")
                    .is_some_and(|value| value.eq_ignore_ascii_case("json"))
            });

        if accepts_json || asks_json {
            Self::Json
        } else {
            Self::Page
        }
    }

    /// Whether the client wants JSON
    #[must_use]
    pub const fn is_json(self) -> bool {
        matches!(self, Self::Json)
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for ResponseFormat
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self::negotiate(&parts.headers, &parts.uri))
    }
}
