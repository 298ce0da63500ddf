//! Layering guardrails for the workspace crates.
//!
//! `infragen_core` is shared vocabulary and must stay dependency-free. `infragen_model` may use `infragen_core` but
//! never the generator crate itself. These tests scan the manifests and fail on a violation.

/// Dependency names listed in the `[dependencies]` table of a manifest.
fn dependency_names(manifest: &str) -> Vec<String> {
    let mut in_dependencies = false;
    let mut names = Vec::new();

    for raw_line in manifest.lines() {
        let line = raw_line.trim();
        // Track when we enter/exit the `[dependencies]` table.
        if line.starts_with('[') {
            in_dependencies = line == "[dependencies]";
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
fn core_crate_has_no_dependencies() {
    let manifest = include_str!("../crates/infragen_core/Cargo.toml");
    let deps = dependency_names(manifest);
    assert!(deps.is_empty(), "`infragen_core` must not depend on anything, found {deps:?}");
}

#[test]
fn model_crate_does_not_depend_on_generator() {
    let manifest = include_str!("../crates/infragen_model/Cargo.toml");
    let deps = dependency_names(manifest);
    assert!(deps.iter().any(|d| d == "infragen_core"));
    assert!(
        !deps.iter().any(|d| d == "infragen"),
        "`infragen_model` must not depend on the generator crate"
    );
}

#[test]
fn generator_depends_on_both_workspace_crates() {
    let deps = dependency_names(include_str!("../Cargo.toml"));
    assert!(deps.iter().any(|d| d == "infragen_core"));
    assert!(deps.iter().any(|d| d == "infragen_model"));
}
