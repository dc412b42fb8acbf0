//! vessel-script: launch script loading for vessel
//!
//! A launch script is a YAML document, optionally starting with a `#!`
//! interpreter line, describing the container to run.

pub mod document;
pub mod loader;

pub use document::{Document, Field, Value};
pub use loader::{load, parse};
