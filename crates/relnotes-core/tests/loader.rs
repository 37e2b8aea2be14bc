use std::fs;
use std::path::Path;

use relnotes_core::{DirectorySource, FeatureError, LoadError, ReleaseSource, ReleaseStore};
use tempfile::TempDir;

fn release_json(version: &str) -> String {
    format!(
        r#"{{
  "version": "{version}",
  "release_date": "2024-02-06T00:00:00Z",
  "summary": "Release {version}",
  "changes": [
    {{ "category": "language", "description": "feature of {version}", "impact": "new" }}
  ],
  "packages": {{
    "net/http": [
      {{ "type": "ServeMux", "description": "routing in {version}", "impact": "enhancement" }},
      {{ "description": "package-wide tweak", "impact": "performance", "example": "" }}
    ]
  }}
}}"#
    )
}

fn write(dir: &Path, name: &str, contents: &str) {
    fs::write(dir.join(name), contents).expect("write fixture");
}

#[test]
fn directory_source_loads_every_json_file() {
    let dir = TempDir::new().expect("tempdir");
    write(dir.path(), "a.json", &release_json("1.22"));
    write(dir.path(), "b.json", &release_json("1.9"));
    write(dir.path(), "c.json", &release_json("1.10"));

    let store = ReleaseStore::load(&DirectorySource::new(dir.path())).expect("store");
    assert_eq!(store.versions(), vec!["1.22", "1.10", "1.9"]);

    let release = store.get("1.22").expect("1.22");
    let http = &release.library_changes["net/http"];
    assert_eq!(http[0].symbol.as_deref(), Some("ServeMux"));
    assert_eq!(http[1].symbol, None);
    assert_eq!(http[1].example, None);
}

#[test]
fn non_json_files_and_subdirectories_are_ignored() {
    let dir = TempDir::new().expect("tempdir");
    write(dir.path(), "go1.21.json", &release_json("1.21"));
    write(dir.path(), "README.md", "# not a release");
    write(dir.path(), "notes.txt", "{}");
    fs::create_dir(dir.path().join("nested.json")).expect("mkdir");

    let releases = DirectorySource::new(dir.path()).load().expect("load");
    assert_eq!(releases.len(), 1);
    assert_eq!(releases[0].version, "1.21");
}

#[test]
fn empty_directory_is_an_error() {
    let dir = TempDir::new().expect("tempdir");
    write(dir.path(), "README.md", "nothing here");

    let err = DirectorySource::new(dir.path()).load().expect_err("empty");
    assert!(matches!(err, LoadError::Empty { .. }));
}

#[test]
fn missing_directory_is_an_io_error() {
    let dir = TempDir::new().expect("tempdir");
    let missing = dir.path().join("does-not-exist");

    let err = DirectorySource::new(&missing).load().expect_err("missing");
    assert!(matches!(err, LoadError::Io { .. }));
}

#[test]
fn one_malformed_file_fails_the_whole_load() {
    let dir = TempDir::new().expect("tempdir");
    write(dir.path(), "go1.21.json", &release_json("1.21"));
    write(dir.path(), "go1.22.json", "{ \"version\": ");

    let err = DirectorySource::new(dir.path()).load().expect_err("malformed");
    match err {
        LoadError::Parse { name, .. } => assert!(name.ends_with("go1.22.json")),
        other => panic!("expected parse error, got {other:?}"),
    }
}

#[test]
fn bad_version_string_is_rejected() {
    let dir = TempDir::new().expect("tempdir");
    write(dir.path(), "bad.json", &release_json("v1.22"));

    let err = DirectorySource::new(dir.path()).load().expect_err("bad version");
    assert!(matches!(err, LoadError::InvalidRecord { .. }));
}

#[test]
fn duplicate_versions_across_files_fail_store_construction() {
    let dir = TempDir::new().expect("tempdir");
    write(dir.path(), "first.json", &release_json("1.22"));
    write(dir.path(), "second.json", &release_json("1.22"));

    let err = ReleaseStore::load(&DirectorySource::new(dir.path())).expect_err("duplicate");
    assert!(matches!(
        err,
        FeatureError::Load(LoadError::DuplicateVersion { ref version }) if version == "1.22"
    ));
}

#[test]
fn describe_names_the_directory() {
    let dir = TempDir::new().expect("tempdir");
    let source = DirectorySource::new(dir.path());
    assert!(source.describe().contains(&dir.path().display().to_string()));
}
