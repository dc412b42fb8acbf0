//! Volume expression parsing and default bindings

use log::{debug, warn};
use std::path::{Path, PathBuf};

use vessel_core::util::{expand_path, home_dir};
use vessel_core::{Binding, RepositoryLocation};

const READ_ONLY_FLAG: &str = "ro";

/// A syntactically valid `SOURCE:TARGET[:ro]` expression
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VolumeExpr<'a> {
    pub source: &'a str,
    pub target: &'a str,
    pub read_only: bool,
}

impl<'a> VolumeExpr<'a> {
    /// Split an expression into its parts.
    ///
    /// Returns `None` for fewer than two parts, empty parts, a third part other
    /// than `ro`, or more than three parts.
    pub fn parse(expr: &'a str) -> Option<Self> {
        let parts: Vec<&str> = expr.split(':').collect();
        let (source, target, read_only) = match parts.as_slice() {
            [source, target] => (*source, *target, false),
            [source, target, flag] if *flag == READ_ONLY_FLAG => (*source, *target, true),
            _ => return None,
        };
        if source.is_empty() || target.is_empty() {
            return None;
        }
        Some(Self {
            source,
            target,
            read_only,
        })
    }
}

/// Resolves bindings relative to an invocation's working and home directories
#[derive(Debug, Clone)]
pub struct BindingResolver {
    cwd: PathBuf,
    home: Option<PathBuf>,
}

impl BindingResolver {
    pub fn new(cwd: impl AsRef<Path>, home: Option<PathBuf>) -> Self {
        Self {
            cwd: cwd.as_ref().to_path_buf(),
            home,
        }
    }

    /// Resolver using the invoking user's home directory
    pub fn for_user(cwd: impl AsRef<Path>) -> Self {
        Self::new(cwd, home_dir())
    }

    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    /// Resolve one volume expression.
    ///
    /// Malformed expressions and missing sources yield `None`; callers skip them.
    pub fn resolve_volume_expr(&self, expr: &str) -> Option<Binding> {
        let Some(parsed) = VolumeExpr::parse(expr) else {
            warn!("Ignoring malformed volume '{}'", expr);
            return None;
        };

        let source = expand_path(parsed.source, self.home.as_deref(), &self.cwd);
        if !source.exists() {
            warn!(
                "Ignoring volume '{}': {} does not exist",
                expr,
                source.display()
            );
            return None;
        }

        debug!(
            "Volume {} -> {}{}",
            source.display(),
            parsed.target,
            if parsed.read_only { " (ro)" } else { "" }
        );
        Some(Binding::new(source, parsed.target, parsed.read_only))
    }

    /// Resolve every expression, keeping the valid ones in order
    pub fn resolve_all<S: AsRef<str>>(&self, exprs: &[S]) -> Vec<Binding> {
        exprs
            .iter()
            .filter_map(|e| self.resolve_volume_expr(e.as_ref()))
            .collect()
    }

    /// Bindings every launch gets.
    ///
    /// The working directory is always bound to itself. A repository rooted
    /// elsewhere adds a self-binding of its root, plus a binding of its real
    /// metadata store onto `<root>/.git` when the two differ.
    pub fn default_bindings(&self, repository: Option<&RepositoryLocation>) -> Vec<Binding> {
        let mut bindings = vec![Binding::identity(&self.cwd)];

        let Some(repo) = repository else {
            return bindings;
        };
        if repo.root == self.cwd {
            return bindings;
        }

        bindings.push(Binding::identity(&repo.root));

        let conventional = repo.conventional_metadata_dir();
        if repo.metadata_dir != conventional {
            debug!(
                "Binding metadata store {} onto {}",
                repo.metadata_dir.display(),
                conventional.display()
            );
            bindings.push(Binding::new(&repo.metadata_dir, conventional, false));
        }

        bindings
    }
}
