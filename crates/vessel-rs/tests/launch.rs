//! Launch tests against an in-memory engine
//!
//! No Docker daemon is needed; the recording engine captures every call.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tempfile::tempdir;
use vessel_rs::{
    Binding, BindingResolver, ContainerEngine, EnginePhase, LaunchSource, LaunchSpec,
    LaunchSpecBuilder, Launcher, PartialSpec, Result, VesselError,
};

#[derive(Default)]
struct RecordingEngine {
    created: Mutex<Vec<LaunchSpec>>,
    started: Mutex<Vec<String>>,
    exit_code: i64,
    fail_create: bool,
    fail_start: bool,
    fail_wait: bool,
    hang: bool,
}

impl ContainerEngine for RecordingEngine {
    async fn create(&self, spec: &LaunchSpec) -> Result<String> {
        if self.fail_create {
            return Err(VesselError::engine(EnginePhase::Create, "no such image"));
        }
        let mut created = self.created.lock().unwrap();
        created.push(spec.clone());
        Ok(format!("container-{}", created.len()))
    }

    async fn start(&self, id: &str) -> Result<()> {
        if self.fail_start {
            return Err(VesselError::engine(EnginePhase::Start, "port is already allocated"));
        }
        self.started.lock().unwrap().push(id.to_string());
        Ok(())
    }

    async fn wait(&self, _id: &str) -> Result<i64> {
        if self.hang {
            std::future::pending::<()>().await;
        }
        if self.fail_wait {
            return Err(VesselError::engine(EnginePhase::Wait, "connection reset"));
        }
        Ok(self.exit_code)
    }
}

fn build(cwd: &Path, flags: PartialSpec, positional: Vec<String>) -> Result<LaunchSpec> {
    let repository = vessel_rs::git::locate(cwd)?;
    LaunchSpecBuilder::new(BindingResolver::new(cwd, None))
        .repository(repository)
        .build(LaunchSource::sniff(flags, positional))
}

fn image(name: &str) -> PartialSpec {
    PartialSpec {
        image: Some(name.to_string()),
        ..Default::default()
    }
}

#[test]
fn plain_repository_at_cwd_binds_only_cwd() {
    let tmp = tempdir().unwrap();
    let proj = tmp.path().join("home/u/proj");
    fs::create_dir_all(proj.join(".git")).unwrap();

    let spec = build(&proj, image("alpine"), vec![]).unwrap();
    assert_eq!(spec.bindings, vec![Binding::identity(&proj)]);
    assert!(spec.command.is_empty());
    assert_eq!(spec.image, "alpine");
    assert_eq!(spec.working_dir, proj);
}

#[test]
fn worktree_subdirectory_binds_root_and_primary_store() {
    let tmp = tempdir().unwrap();
    let store = tmp.path().join("main/.git");
    fs::create_dir_all(store.join("worktrees/feature")).unwrap();
    let worktree = tmp.path().join("feature");
    let sub = worktree.join("src");
    fs::create_dir_all(&sub).unwrap();
    fs::write(
        worktree.join(".git"),
        format!("gitdir: {}\n", store.join("worktrees/feature").display()),
    )
    .unwrap();

    let spec = build(&sub, image("alpine"), vec![]).unwrap();
    assert_eq!(
        spec.bindings,
        vec![
            Binding::identity(&sub),
            Binding::identity(&worktree),
            Binding::new(&store, worktree.join(".git"), false),
        ]
    );
    assert_eq!(spec.repository.unwrap().root, worktree);
}

#[test]
fn script_mode_ignores_flags_and_appends_arguments() {
    let tmp = tempdir().unwrap();
    fs::create_dir(tmp.path().join("cache")).unwrap();
    let script = tmp.path().join("lint.vsl");
    fs::write(
        &script,
        "#!/usr/bin/env vessel\nimage: python:3.12\ncommand: [ruff, check]\nvolumes: ['cache:/cache:ro', 'missing:/m']\n",
    )
    .unwrap();

    let flags = PartialSpec {
        image: Some("alpine".into()),
        environment: vec!["FROM_FLAGS=1".into()],
        privileged: true,
        ..Default::default()
    };
    let positional = vec![script.display().to_string(), "src/".into(), "--fix".into()];
    let spec = build(tmp.path(), flags, positional).unwrap();

    assert_eq!(spec.image, "python:3.12");
    assert_eq!(spec.command, vec!["ruff", "check", "src/", "--fix"]);
    assert!(spec.environment.is_empty());
    assert!(!spec.privileged);
    assert_eq!(spec.script.as_deref(), Some(script.as_path()));
    assert_eq!(
        spec.bindings.last(),
        Some(&Binding::new(tmp.path().join("cache"), "/cache", true))
    );
}

#[test]
fn missing_image_is_rejected_before_launch() {
    let tmp = tempdir().unwrap();
    let flags = PartialSpec {
        command: vec!["true".into()],
        volumes: vec![format!("{}:/data", tmp.path().display())],
        ..Default::default()
    };

    let err = build(tmp.path(), flags, vec!["echo".into()]).unwrap_err();
    assert!(matches!(err, VesselError::InvalidConfig(_)));
}

fn ready_spec() -> LaunchSpec {
    LaunchSpecBuilder::new(BindingResolver::new("/work", None))
        .build(LaunchSource::Flags {
            spec: image("alpine"),
            args: vec!["true".into()],
        })
        .unwrap()
}

#[tokio::test]
async fn launch_reports_container_identity() {
    let launcher = Launcher::new(RecordingEngine::default());

    let report = launcher
        .launch(ready_spec(), std::future::pending())
        .await
        .unwrap();

    assert!(report.success);
    assert_eq!(report.container_id, "container-1");
    assert_eq!(report.image, "alpine");
    assert_eq!(report.working_dir, PathBuf::from("/work"));
    assert_eq!(report.mounts, vec![Binding::identity("/work")]);
    assert!(report.git_root.is_none());
    assert_eq!(launcher.engine().started.lock().unwrap().as_slice(), ["container-1"]);
}

#[tokio::test]
async fn non_zero_exit_is_reported_not_raised() {
    let launcher = Launcher::new(RecordingEngine {
        exit_code: 3,
        ..Default::default()
    });

    let report = launcher
        .launch(ready_spec(), std::future::pending())
        .await
        .unwrap();
    assert!(!report.success);
    assert_eq!(report.exit_code, 3);
    assert!(report.message.contains('3'));
}

#[tokio::test]
async fn start_failure_surfaces_phase() {
    let launcher = Launcher::new(RecordingEngine {
        fail_start: true,
        ..Default::default()
    });

    let err = launcher
        .launch(ready_spec(), std::future::pending())
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        VesselError::Engine {
            phase: EnginePhase::Start,
            ..
        }
    ));
    assert_eq!(launcher.engine().created.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn create_failure_surfaces_phase_and_skips_start() {
    let launcher = Launcher::new(RecordingEngine {
        fail_create: true,
        ..Default::default()
    });

    let err = launcher
        .launch(ready_spec(), std::future::pending())
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        VesselError::Engine {
            phase: EnginePhase::Create,
            ..
        }
    ));
    assert!(launcher.engine().started.lock().unwrap().is_empty());
}

#[tokio::test]
async fn wait_failure_surfaces_phase() {
    let launcher = Launcher::new(RecordingEngine {
        fail_wait: true,
        ..Default::default()
    });

    let err = launcher
        .launch(ready_spec(), std::future::pending())
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        VesselError::Engine {
            phase: EnginePhase::Wait,
            ..
        }
    ));
    assert_eq!(launcher.engine().started.lock().unwrap().as_slice(), ["container-1"]);
}

#[tokio::test]
async fn cancellation_abandons_wait() {
    let launcher = Launcher::new(RecordingEngine {
        hang: true,
        ..Default::default()
    });

    let err = launcher.launch(ready_spec(), async {}).await.unwrap_err();
    assert!(matches!(err, VesselError::Cancelled));
}

#[tokio::test]
async fn invalid_spec_never_reaches_engine() {
    let launcher = Launcher::new(RecordingEngine::default());
    let mut spec = ready_spec();
    spec.image.clear();

    assert!(launcher.launch(spec, async {}).await.is_err());
    assert!(launcher.engine().created.lock().unwrap().is_empty());
}

#[test]
fn report_serializes_without_absent_fields() {
    let report = vessel_rs::LaunchReport {
        success: true,
        container_id: "abc".into(),
        image: "alpine".into(),
        working_dir: PathBuf::from("/w"),
        mounts: vec![Binding::identity("/w")],
        git_root: None,
        script_path: None,
        exit_code: 0,
        message: "ok".into(),
    };
    let json = serde_json::to_value(&report).unwrap();
    assert!(json.get("git_root").is_none());
    assert!(json.get("script_path").is_none());
    assert_eq!(json["mounts"][0]["target"], "/w");
}
