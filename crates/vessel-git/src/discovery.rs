//! Repository discovery

use log::debug;
use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

use vessel_core::{GIT_MARKER, RepositoryLocation, Result, VesselError};

const GITDIR_PREFIX: &str = "gitdir:";
const WORKTREES_DIR: &str = "worktrees";

/// Locate the repository enclosing `start`.
///
/// Returns `Ok(None)` when the filesystem root is reached without finding a
/// marker. Probe failures other than "not found" are returned as errors.
pub fn locate(start: &Path) -> Result<Option<RepositoryLocation>> {
    let Some(root) = find_root(start)? else {
        debug!("No repository above {}", start.display());
        return Ok(None);
    };
    let metadata_dir = resolve_metadata_dir(&root)?;
    debug!(
        "Repository root {} uses metadata at {}",
        root.display(),
        metadata_dir.display()
    );
    Ok(Some(RepositoryLocation { root, metadata_dir }))
}

/// Walk up from `start` until a directory containing the marker is found
pub fn find_root(start: &Path) -> Result<Option<PathBuf>> {
    let mut dir = start.to_path_buf();
    loop {
        let marker = dir.join(GIT_MARKER);
        match fs::metadata(&marker) {
            Ok(_) => return Ok(Some(dir)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(source) => {
                return Err(VesselError::Discovery {
                    path: marker,
                    source,
                });
            }
        }

        match dir.parent() {
            Some(parent) if parent != dir => dir = parent.to_path_buf(),
            _ => return Ok(None),
        }
    }
}

/// Resolve the metadata store for the working tree at `root`.
///
/// A marker directory is its own store. A marker file is read for a
/// `gitdir:` line; worktree pointers (`<store>/worktrees/<name>`) resolve to
/// the primary `<store>`. A marker file without such a line resolves to itself.
pub fn resolve_metadata_dir(root: &Path) -> Result<PathBuf> {
    let marker = root.join(GIT_MARKER);
    let info = fs::metadata(&marker).map_err(|source| VesselError::Discovery {
        path: marker.clone(),
        source,
    })?;

    if info.is_dir() {
        return Ok(marker);
    }

    let content = fs::read_to_string(&marker).map_err(|source| VesselError::Discovery {
        path: marker.clone(),
        source,
    })?;

    match gitdir_pointer(&content) {
        Some(pointer) => {
            let pointer = root.join(pointer);
            debug!("Marker {} points at {}", marker.display(), pointer.display());
            Ok(primary_store(&pointer))
        }
        None => Ok(marker),
    }
}

fn gitdir_pointer(content: &str) -> Option<&str> {
    content
        .lines()
        .find_map(|line| line.strip_prefix(GITDIR_PREFIX))
        .map(str::trim)
        .filter(|p| !p.is_empty())
}

/// Strip a trailing `worktrees/...` from a worktree-local metadata path
fn primary_store(gitdir: &Path) -> PathBuf {
    let components: Vec<Component<'_>> = gitdir.components().collect();
    let split = components
        .iter()
        .position(|c| c.as_os_str() == WORKTREES_DIR);
    // components() drops a trailing separator; `worktrees/` still counts as a segment
    let trailing_separator = gitdir.to_string_lossy().ends_with(std::path::is_separator);

    match split {
        Some(idx) if idx > 0 && (idx + 1 < components.len() || trailing_separator) => {
            components[..idx].iter().collect()
        }
        _ => gitdir.to_path_buf(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primary_store_strips_worktree_suffix() {
        assert_eq!(
            primary_store(Path::new("/store/worktrees/feature-x")),
            PathBuf::from("/store")
        );
    }

    #[test]
    fn test_primary_store_leaves_plain_store() {
        assert_eq!(primary_store(Path::new("/store")), PathBuf::from("/store"));
    }

    #[test]
    fn test_primary_store_needs_worktree_name() {
        assert_eq!(
            primary_store(Path::new("/store/worktrees")),
            PathBuf::from("/store/worktrees")
        );
    }

    #[test]
    fn test_primary_store_strips_trailing_worktrees_dir() {
        assert_eq!(
            primary_store(Path::new("/store/worktrees/")),
            PathBuf::from("/store")
        );
    }

    #[test]
    fn test_primary_store_uses_first_worktrees_segment() {
        assert_eq!(
            primary_store(Path::new("/a/.git/worktrees/b/worktrees/c")),
            PathBuf::from("/a/.git")
        );
    }

    #[test]
    fn test_gitdir_pointer_parsing() {
        assert_eq!(gitdir_pointer("gitdir: /x/y\n"), Some("/x/y"));
        assert_eq!(gitdir_pointer("junk\ngitdir:/x/y  \n"), Some("/x/y"));
        assert_eq!(gitdir_pointer("gitdir:   \n"), None);
        assert_eq!(gitdir_pointer("nothing here"), None);
    }
}
