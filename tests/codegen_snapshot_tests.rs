//! Golden snapshot tests for codegen
//!
//! These tests generate Go code from bound programs in `tests/fixtures/*.json` and compare
//! the output against stored snapshots. This ensures codegen changes are
//! reviewed and intentional.
//!
//! Run with: `cargo test --test codegen_snapshot_tests`
//! Review changes: `cargo insta review`

use infragen::backend::{GenerateOptions, generate_program};
use infragen::model::Program;
use std::fs;

/// Generate the entry file for a bound program
fn generate_go(source: &str) -> String {
    let program = Program::from_json(source).expect("program failed to load");
    let generated = generate_program(&program, &GenerateOptions::default()).expect("generation failed");
    assert!(
        generated.diagnostics.is_empty(),
        "unexpected diagnostics: {:?}",
        generated.diagnostics
    );
    generated.source("main.go").expect("no main.go").to_string()
}

/// Load a program from the fixtures directory
fn load_fixture(name: &str) -> String {
    let path = format!("tests/fixtures/{}.json", name);
    fs::read_to_string(&path).unwrap_or_else(|_| panic!("Failed to read fixture: {}", path))
}

#[test]
fn test_zero_input_resource_codegen() {
    let go_code = generate_go(&load_fixture("zero_input_resource"));
    insta::assert_snapshot!("zero_input_resource", go_code);
}

#[test]
fn test_conditional_output_codegen() {
    let go_code = generate_go(&load_fixture("conditional_output"));
    insta::assert_snapshot!("conditional_output", go_code);
}

#[test]
fn test_json_policy_codegen() {
    let go_code = generate_go(&load_fixture("json_policy"));
    insta::assert_snapshot!("json_policy", go_code);
}

#[test]
fn test_website_bucket_codegen() {
    let go_code = generate_go(&load_fixture("website_bucket"));
    insta::assert_snapshot!("website_bucket", go_code);
}

#[test]
fn test_invoke_lookup_codegen() {
    let go_code = generate_go(&load_fixture("invoke_lookup"));
    insta::assert_snapshot!("invoke_lookup", go_code);
}

/// Every fixture, formatted or not, must come out byte-identical on a second run.
#[test]
fn test_all_fixtures_are_deterministic() {
    insta::glob!("fixtures/*.json", |path| {
        let source = fs::read_to_string(path).unwrap();
        assert_eq!(generate_go(&source), generate_go(&source), "{}", path.display());
    });
}
