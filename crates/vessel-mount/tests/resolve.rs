//! Volume resolution against a real filesystem

use std::fs;
use std::path::PathBuf;

use tempfile::tempdir;
use vessel_core::Binding;
use vessel_mount::BindingResolver;

#[test]
fn missing_relative_source_is_skipped() {
    let tmp = tempdir().unwrap();
    let resolver = BindingResolver::new(tmp.path(), None);

    assert!(resolver.resolve_volume_expr("relsrc:tgt").is_none());
}

#[test]
fn existing_absolute_source_read_only() {
    let tmp = tempdir().unwrap();
    let data = tmp.path().join("data");
    fs::create_dir(&data).unwrap();
    let resolver = BindingResolver::new("/", None);

    let binding = resolver
        .resolve_volume_expr(&format!("{}:/mnt/data:ro", data.display()))
        .unwrap();
    assert_eq!(binding, Binding::new(&data, "/mnt/data", true));
}

#[test]
fn relative_source_resolves_against_cwd() {
    let tmp = tempdir().unwrap();
    fs::create_dir(tmp.path().join("cache")).unwrap();
    let resolver = BindingResolver::new(tmp.path(), None);

    let binding = resolver.resolve_volume_expr("cache:/cache").unwrap();
    assert_eq!(binding.source, tmp.path().join("cache"));
    assert!(!binding.read_only);
}

#[test]
fn tilde_source_expands_to_home() {
    let home = tempdir().unwrap();
    fs::create_dir(home.path().join(".ssh")).unwrap();
    let resolver = BindingResolver::new("/", Some(home.path().to_path_buf()));

    let binding = resolver.resolve_volume_expr("~/.ssh:/root/.ssh:ro").unwrap();
    assert_eq!(binding.source, home.path().join(".ssh"));
    assert_eq!(binding.target, PathBuf::from("/root/.ssh"));
}

#[test]
fn tilde_without_home_is_left_unexpanded() {
    let cwd = tempdir().unwrap();
    fs::create_dir_all(cwd.path().join("~/stuff")).unwrap();
    let resolver = BindingResolver::new(cwd.path(), None);

    let binding = resolver.resolve_volume_expr("~/stuff:/stuff").unwrap();
    assert_eq!(binding.source, cwd.path().join("~/stuff"));
}

#[test]
fn resolve_all_keeps_valid_entries_in_order() {
    let tmp = tempdir().unwrap();
    for name in ["a", "b"] {
        fs::create_dir(tmp.path().join(name)).unwrap();
    }
    let resolver = BindingResolver::new(tmp.path(), None);

    let bindings = resolver.resolve_all(&["b:/b", "nope:/x", "bad", "a:/a:ro", "a:/a:rw"]);
    let targets: Vec<_> = bindings.iter().map(|b| b.target.clone()).collect();
    assert_eq!(targets, vec![PathBuf::from("/b"), PathBuf::from("/a")]);
}
