//! Ensures all workspace crates use `version.workspace = true` and that
//! the workspace version is consistent across all Cargo.toml files.

use std::path::{Path, PathBuf};

fn workspace_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .ancestors()
        .nth(2)
        .expect("workspace root")
        .to_path_buf()
}

fn read_manifest(dir: &Path) -> toml::Value {
    let text = std::fs::read_to_string(dir.join("Cargo.toml")).expect("read Cargo.toml");
    text.parse().expect("parse Cargo.toml")
}

#[test]
fn all_crates_use_workspace_version() {
    let root = workspace_root();

    for krate in ["crates/relnotes-core", "crates/relnotes-cli", "crates/relnotesd"] {
        let doc = read_manifest(&root.join(krate));
        let inherits = doc["package"]["version"]
            .get("workspace")
            .and_then(|v| v.as_bool());
        assert_eq!(
            inherits,
            Some(true),
            "{krate} should use version.workspace = true"
        );
    }
}

#[test]
fn workspace_version_matches_cargo_pkg() {
    let doc = read_manifest(&workspace_root());
    let ws_version = doc["workspace"]["package"]["version"]
        .as_str()
        .expect("workspace version");
    assert_eq!(ws_version, env!("CARGO_PKG_VERSION"));
}

#[test]
fn internal_dependency_pins_workspace_version() {
    let doc = read_manifest(&workspace_root());
    let ws_version = doc["workspace"]["package"]["version"]
        .as_str()
        .expect("workspace version");
    let pinned = doc["workspace"]["dependencies"]["relnotes-core"]["version"]
        .as_str()
        .expect("relnotes-core version pin");
    assert_eq!(pinned, ws_version);
}
