//! vessel-git: repository discovery for vessel
//!
//! Walks up from a directory to the enclosing repository and resolves
//! worktree pointer files to the primary metadata store.

pub mod discovery;

pub use discovery::{find_root, locate, resolve_metadata_dir};
