//! HTTP request handlers shared by applications.

pub mod health;

pub use health::{health_check, readiness_check};
