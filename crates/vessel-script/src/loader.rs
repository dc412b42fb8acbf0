//! Launch script loading

use log::debug;
use std::fs;
use std::path::{Path, PathBuf};

use vessel_core::{PartialSpec, Result, VesselError};

use crate::document::{Document, Field, Value};

const SHEBANG: &str = "#!";

/// Read and parse the launch script at `path`
pub fn load(path: &Path) -> Result<PartialSpec> {
    let content = fs::read_to_string(path).map_err(|e| VesselError::Script {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    parse(&content, path)
}

/// Parse launch script text; `path` is only used in errors
pub fn parse(content: &str, path: &Path) -> Result<PartialSpec> {
    let body = strip_shebang(content);
    let document: Document =
        serde_yaml_bw::from_str(body).map_err(|e| VesselError::Script {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

    let mut spec = PartialSpec::default();
    for (field, value) in document.entries {
        apply(&mut spec, field, value);
    }

    if spec.image.as_deref().is_none_or(str::is_empty) {
        return Err(VesselError::MissingImage {
            path: path.to_path_buf(),
        });
    }

    debug!(
        "Loaded script {} (image {})",
        path.display(),
        spec.image.as_deref().unwrap_or_default()
    );
    Ok(spec)
}

fn apply(spec: &mut PartialSpec, field: Field, value: Value) {
    match field {
        Field::Image => spec.image = value.into_scalar().or(spec.image.take()),
        Field::Command => spec.command.extend(value.into_list()),
        Field::Entrypoint => spec.entrypoint.extend(value.into_list()),
        Field::WorkingDir => {
            if let Some(dir) = value.into_scalar() {
                spec.working_dir = Some(PathBuf::from(dir));
            }
        }
        Field::Environment => spec.environment.extend(value.into_list()),
        Field::Volumes => spec.volumes.extend(value.into_list()),
        Field::User => spec.user = value.into_scalar().or(spec.user.take()),
        Field::Interactive => spec.interactive = value.flag(),
        Field::Privileged => spec.privileged = value.flag(),
        Field::NetworkMode => spec.network_mode = value.into_scalar().or(spec.network_mode.take()),
    }
}

fn strip_shebang(content: &str) -> &str {
    if !content.starts_with(SHEBANG) {
        return content;
    }
    match content.find('\n') {
        Some(end) => &content[end + 1..],
        None => "",
    }
}
