//! Layering guardrails for the workspace crates.
//!
//! - `brisk_core` is the vocabulary/numeric layer and must stay dependency-free.
//! - `brisk_syntax` is a library: driver concerns (`clap`, `tracing-subscriber`) belong to the root crate only.
//!
//! - The `brisk` driver reaches the vocabulary only through `brisk_syntax`; `brisk_core` is a test-only dependency.
//!
//! These tests scan the manifests' dependency tables.

/// Dependency names listed in the `[dependencies]` table of a manifest.
fn dependency_names(manifest: &str) -> Vec<String> {
    table_names(manifest, "[dependencies]")
}

/// Names listed under `table` (for example `[dev-dependencies]`).
fn table_names(manifest: &str, table: &str) -> Vec<String> {
    let mut in_dependencies = false;
    let mut names = Vec::new();

    for raw_line in manifest.lines() {
        let line = raw_line.trim();
        // Track when we enter/exit the table.
        if line.starts_with('[') {
            in_dependencies = line == table;
            continue;
        }
        if !in_dependencies || line.is_empty() || line.starts_with('#') {
            continue;
        }

        // Strip inline comments for robustness.
        let line_no_comment = line.split('#').next().unwrap_or("").trim();
        if let Some((name, _)) = line_no_comment.split_once('=') {
            names.push(name.trim().to_string());
        }
    }
    names
}

#[test]
fn core_has_no_dependencies() {
    let names = dependency_names(include_str!("../crates/brisk_core/Cargo.toml"));
    assert!(names.is_empty(), "`brisk_core` must not depend on anything, found {names:?}");
}

#[test]
fn syntax_does_not_pull_in_driver_crates() {
    let names = dependency_names(include_str!("../crates/brisk_syntax/Cargo.toml"));
    assert!(names.iter().any(|n| n == "brisk_core"));
    for forbidden in ["clap", "tracing-subscriber", "brisk"] {
        assert!(
            !names.iter().any(|n| n == forbidden),
            "`{forbidden}` must not appear in brisk_syntax [dependencies]"
        );
    }
}

#[test]
fn scanner_reads_only_the_dependencies_table() {
    let manifest = "[package]\nname = \"x\"\n\n[dependencies]\na = \"1\" # note\n# b = \"2\"\n\n[dev-dependencies]\nc = \"3\"\n";
    assert_eq!(dependency_names(manifest), vec!["a".to_string()]);
}

#[test]
fn driver_depends_on_core_only_for_tests() {
    let manifest = include_str!("../Cargo.toml");
    let names = dependency_names(manifest);
    assert!(!names.iter().any(|n| n == "brisk_core"), "found {names:?}");
    assert!(names.iter().any(|n| n == "brisk_syntax"));
    assert!(table_names(manifest, "[dev-dependencies]").iter().any(|n| n == "brisk_core"));
}
