//! vessel-mount: bind mount resolution for vessel
//!
//! Turns `SOURCE:TARGET[:ro]` expressions into checked bindings and derives
//! the default bindings for the working directory and enclosing repository.

pub mod volumes;

pub use volumes::{BindingResolver, VolumeExpr};
