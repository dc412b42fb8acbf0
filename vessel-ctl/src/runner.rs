use console::style;
use log::{debug, info, warn};
use std::fs;
use std::path::{Path, PathBuf};

use vessel_rs::{
    BindingResolver, DockerEngine, LaunchReport, LaunchSource, LaunchSpec, LaunchSpecBuilder,
    Launcher, PartialSpec, Result, VesselError,
};

/// Configuration for one invocation, fixed before any work starts
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub flags: PartialSpec,
    pub positional: Vec<String>,
    pub script: Option<PathBuf>,
    pub no_git: bool,
    pub output: Option<PathBuf>,
}

/// Resolve repository, launch source and bindings into a launch spec
pub fn prepare(config: RunConfig, cwd: &Path) -> Result<LaunchSpec> {
    let repository = if config.no_git {
        debug!("Repository discovery disabled");
        None
    } else {
        let found = vessel_rs::git::locate(cwd)?;
        if let Some(repo) = &found {
            info!("Found repository at {}", repo.root.display());
        }
        found
    };

    let source = match config.script {
        Some(path) => LaunchSource::explicit(path, config.positional)?,
        None => LaunchSource::sniff(config.flags, config.positional),
    };

    LaunchSpecBuilder::new(BindingResolver::for_user(cwd))
        .repository(repository)
        .build(source)
}

/// Run the container and return its exit status
pub async fn run_container(config: RunConfig) -> Result<i32> {
    let output = config.output.clone();
    let cwd = std::env::current_dir()?;
    let spec = prepare(config, &cwd)?;

    info!(
        "Starting container run: image={} interactive={}",
        spec.image, spec.interactive
    );

    let launcher = Launcher::new(DockerEngine::connect()?);
    let report = launcher.launch(spec, interrupted()).await?;

    write_report(&report, output.as_deref())?;
    print_summary(&report);

    Ok(i32::try_from(report.exit_code).unwrap_or(1))
}

/// Completes on the first interrupt; never completes if the handler cannot be installed
async fn interrupted() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Cannot listen for interrupts: {}", e);
        std::future::pending::<()>().await;
    }
}

fn write_report(report: &LaunchReport, output: Option<&Path>) -> Result<()> {
    let json =
        serde_json::to_string_pretty(report).map_err(|e| VesselError::Output(e.to_string()))?;

    match output {
        Some(path) => {
            debug!("Writing result to {}", path.display());
            fs::write(path, format!("{json}\n")).map_err(|e| {
                VesselError::Output(format!("cannot write {}: {}", path.display(), e))
            })
        }
        None => {
            println!("{json}");
            Ok(())
        }
    }
}

fn print_summary(report: &LaunchReport) {
    let exit_code_styled = if report.success {
        style(report.exit_code).green().bold()
    } else {
        style(report.exit_code).red().bold()
    };

    eprintln!(
        "{}={} | {}={} | {}={}",
        style("exit_code").dim(),
        exit_code_styled,
        style("container").dim(),
        style(&report.container_id).bold(),
        style("mounts").dim(),
        style(report.mounts.len()).bold(),
    );
}
