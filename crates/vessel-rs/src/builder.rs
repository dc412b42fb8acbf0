//! Merge a launch source with computed bindings into a launch specification

use log::{debug, info};
use vessel_core::{LaunchSpec, PartialSpec, RepositoryLocation, Result};
use vessel_mount::BindingResolver;

use crate::source::LaunchSource;

/// Builder pattern for launch specifications
#[derive(Debug, Clone)]
pub struct LaunchSpecBuilder {
    resolver: BindingResolver,
    repository: Option<RepositoryLocation>,
}

impl LaunchSpecBuilder {
    /// Create new builder; the resolver's directory is the invocation's working directory
    pub fn new(resolver: BindingResolver) -> Self {
        Self {
            resolver,
            repository: None,
        }
    }

    /// Set the repository discovered for this launch
    pub fn repository(mut self, repository: Option<RepositoryLocation>) -> Self {
        self.repository = repository;
        self
    }

    /// Build and validate the specification
    pub fn build(self, source: LaunchSource) -> Result<LaunchSpec> {
        let (partial, args, script) = match source {
            LaunchSource::Script { path, spec, args } => {
                info!("Running from script {}", path.display());
                (spec, args, Some(path))
            }
            LaunchSource::Flags { spec, args } => (spec, args, None),
        };

        let PartialSpec {
            image,
            mut command,
            entrypoint,
            working_dir,
            environment,
            volumes,
            user,
            network_mode,
            interactive,
            privileged,
        } = partial;

        command.extend(args);

        let mut bindings = self.resolver.default_bindings(self.repository.as_ref());
        bindings.extend(self.resolver.resolve_all(&volumes));

        let working_dir = working_dir.unwrap_or_else(|| self.resolver.cwd().to_path_buf());

        let spec = LaunchSpec {
            image: image.unwrap_or_default(),
            command,
            entrypoint,
            working_dir,
            environment,
            bindings,
            user: non_empty(user),
            network_mode: non_empty(network_mode),
            interactive,
            privileged,
            repository: self.repository,
            script,
        };
        spec.validate()?;

        debug!(
            "Launch spec: image={} working_dir={} user={:?} privileged={} network_mode={:?}",
            spec.image,
            spec.working_dir.display(),
            spec.user,
            spec.privileged,
            spec.network_mode
        );
        for binding in &spec.bindings {
            debug!(
                "  bind {} -> {}{}",
                binding.source.display(),
                binding.target.display(),
                if binding.read_only { " (ro)" } else { "" }
            );
        }

        Ok(spec)
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
