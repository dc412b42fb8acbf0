//! Path helpers

use std::path::{Path, PathBuf};

/// Home directory of the invoking user
pub fn home_dir() -> Option<PathBuf> {
    dirs::home_dir()
}

/// Expand a leading `~/` against `home`, then anchor relative paths at `cwd`.
///
/// When `home` is unknown the `~/` prefix is left in place and the path is
/// treated like any other relative path.
pub fn expand_path(path: &str, home: Option<&Path>, cwd: &Path) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/")
        && let Some(home) = home
    {
        return home.join(rest);
    }

    let candidate = Path::new(path);
    if candidate.is_absolute() {
        candidate.to_path_buf()
    } else {
        cwd.join(candidate)
    }
}
