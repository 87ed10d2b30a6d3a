#![forbid(unsafe_code)]

//! Core of MateMago: the learner query model, form validation, service configuration, the
//! explanation client and the query session.
//!
//! The explanation service is treated as an opaque endpoint:
//! `POST {base}/explain` with `{concept, age}` answers
//! `{explanation, visual_type, visual_code}` on success and `{detail}` on failure.

pub mod client;
pub mod config;
pub mod error;
pub mod model;
pub mod session;
pub mod validate;

pub use client::{ExplanationClient, UNKNOWN_ERROR};
pub use config::{API_BASE_ENV, ClientConfig, DEFAULT_API_BASE};
pub use error::{ClientError, ConfigError, Error, FormError, Result};
pub use model::{ExplanationRequest, ExplanationResponse, VisualKind};
pub use session::{QueryPhase, QuerySession, QueryTicket};
pub use validate::{MAX_AGE, MIN_AGE, validate_form};

#[cfg(test)]
mod tests;
