//! vessel-core: shared types and errors for vessel
//!
//! This crate provides the foundational types used by all vessel sub-crates:
//! - Error types and Result alias
//! - The launch data model (bindings, repository location, partial and merged specs)
//! - Path expansion helpers

pub mod error;
pub mod spec;
pub mod util;

pub use error::{EnginePhase, Result, VesselError};
pub use spec::{Binding, GIT_MARKER, LaunchSpec, PartialSpec, RepositoryLocation};
