//! REST backend for the cascading filter engine.
//!
//! [`HttpBackend`] implements [`facet_engine::FilterBackend`] against:
//!
//! - `GET {base}/filters/modules?unitIds=..&locationIds=..`
//! - `GET {base}/filters/units?moduleIds=..&locationIds=..`
//! - `GET {base}/filters/locations?moduleIds=..&unitIds=..`
//! - `POST {base}/filters/validate`
//!
//! Identifier lists are sent comma-separated; a facet with no selection is
//! left out of the query string. A non-success validation response carrying
//! `{ "errors": [...] }` is an invalid outcome; every other failure is
//! reported as a [`facet_model::FilterError`].

pub mod config;
pub mod error;
pub mod http;
mod wire;

pub use config::{ClientConfig, DEFAULT_BASE_URL};
pub use error::{ConfigError, Result};
pub use http::HttpBackend;
