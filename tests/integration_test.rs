use std::path::PathBuf;
use std::process::Command;

fn fixture_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("julia")
}

fn run_jlblock(args: &[&str]) -> (String, String, i32) {
    let bin = env!("CARGO_BIN_EXE_jlblock");
    let output = Command::new(bin)
        .args(args)
        .output()
        .unwrap_or_else(|e| panic!("Failed to run {:?}: {}", bin, e));
    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);
    (stdout, stderr, code)
}

fn run_in_fixture(args: &[&str]) -> (String, String, i32) {
    let dir = fixture_dir().to_string_lossy().into_owned();
    let mut full_args = vec!["-d", dir.as_str()];
    full_args.extend_from_slice(args);
    run_jlblock(&full_args)
}

// ── Help and Version ──

#[test]
fn help_flag() {
    let (stdout, _, code) = run_jlblock(&["--help"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("Usage:"));
    assert!(stdout.contains("Modes (exactly one):"));
    assert!(stdout.contains("Options:"));
}

#[test]
fn version_flag() {
    let (stdout, _, code) = run_jlblock(&["--version"]);
    assert_eq!(code, 0);
    assert!(stdout.trim().starts_with("0.1."));
}

#[test]
fn no_mode_is_an_error() {
    let (_, stderr, code) = run_jlblock(&["--json"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("Nothing to do"));
}

#[test]
fn conflicting_modes() {
    let (_, stderr, code) = run_in_fixture(&["--at", "geometry.jl:1", "--fmt", "geometry.jl"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("--at and --fmt are mutually exclusive"));
}

#[test]
fn unknown_option() {
    let (_, stderr, code) = run_jlblock(&["--bogus"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("Unknown option: --bogus"));
}

#[test]
fn missing_root_directory() {
    let (stdout, _, code) = run_jlblock(&["-d", "/no/such/dir/anywhere", "--check", "a.jl"]);
    assert_eq!(code, 1);
    assert!(stdout.contains("Directory not found"));
}

// ── Blocks ──

#[test]
fn block_inside_nested_if() {
    let (stdout, _, code) = run_in_fixture(&["--at", "geometry.jl:16"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("blocks:"));
    assert!(stdout.contains("kind: if"));
    assert!(stdout.contains("startLine: 15"));
    assert!(stdout.contains("endLine: 17"));
}

#[test]
fn block_around_function_body() {
    let (stdout, _, code) = run_in_fixture(&["--at", "geometry.jl:13"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("kind: function"));
    assert!(stdout.contains("startLine: 12"));
    assert!(stdout.contains("endLine: 19"));
}

#[test]
fn block_mutable_struct_kind() {
    let (stdout, _, _) = run_in_fixture(&["--at", "geometry.jl:9"]);
    assert!(stdout.contains("kind: mutable_struct"));
    assert!(stdout.contains("startLine: 8"));
    assert!(stdout.contains("endLine: 10"));
}

#[test]
fn module_line_spans_whole_file() {
    let (stdout, _, _) = run_in_fixture(&["--at", "geometry.jl:1"]);
    assert!(stdout.contains("kind: module"));
    assert!(stdout.contains("startLine: 1"));
    assert!(stdout.contains("endLine: 28"));
}

#[test]
fn block_with_content() {
    let (stdout, _, code) = run_in_fixture(&["--at", "geometry.jl:23", "--content"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("content: |2"));
    assert!(stdout.contains("for i in 1:3"));
    assert!(stdout.contains("c.n += i"));
    assert!(!stdout.contains("function bump!"));
}

#[test]
fn cursor_past_end_is_not_found() {
    let (stdout, _, code) = run_in_fixture(&["--at", "geometry.jl:500"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("found: false"));
    assert!(!stdout.contains("startLine"));
}

#[test]
fn unterminated_block_collapses() {
    let (stdout, _, _) = run_in_fixture(&["--at", "unbalanced.jl:2", "--json"]);
    assert!(stdout.contains("\"kind\":\"function\",\"startLine\":1,\"endLine\":1"));
}

#[test]
fn several_cursors_sorted() {
    let (stdout, _, code) = run_in_fixture(&["--at", "unbalanced.jl:4 geometry.jl:3", "--json"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("\"filesRead\":2"));
    let geo = stdout.find("geometry.jl").unwrap();
    let unb = stdout.find("unbalanced.jl").unwrap();
    assert!(geo < unb);
}

#[test]
fn missing_file_reports_error() {
    let (stdout, _, code) = run_in_fixture(&["--at", "nope.jl:1"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("found: false"));
    assert!(stdout.contains("error:"));
    assert!(!stdout.contains("filesRead"));
}

#[test]
fn invalid_cursor_spec() {
    let (stdout, _, code) = run_in_fixture(&["--at", "geometry.jl:zero"]);
    assert_eq!(code, 1);
    assert!(stdout.contains("Invalid cursor spec"));
}

// ── Count ──

#[test]
fn count_assignments_in_file() {
    let (stdout, _, code) = run_in_fixture(&["--count", "geometry.jl", "--vars"]);
    assert_eq!(code, 0);
    // `c.n += i` counts too: only `=`, `!`, `<` and `>` are excluded on the left.
    assert!(stdout.contains("assignments: 3"));
    assert!(stdout.contains("totalAssignments: 3"));
    assert!(stdout.contains("- name: dx"));
    assert!(stdout.contains("- name: dy"));
}

#[test]
fn count_json() {
    let (stdout, _, code) = run_in_fixture(&["--count", "unbalanced.jl", "--json"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("\"assignments\":2"));
    assert!(!stdout.contains("\"variables\""));
}

// ── Check ──

#[test]
fn check_balanced_file() {
    let (stdout, _, code) = run_in_fixture(&["--check", "geometry.jl"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("valid: true"));
}

#[test]
fn check_unbalanced_file() {
    let (stdout, _, code) = run_in_fixture(&["--check", "unbalanced.jl"]);
    assert_eq!(code, 1);
    assert!(stdout.contains("valid: false"));
    assert!(stdout.contains("unclosed function block"));
}

// ── Format ──

#[test]
fn format_reindents() {
    let (stdout, _, code) = run_in_fixture(&["--fmt", "geometry.jl", "--indent", "2"]);
    assert_eq!(code, 0);
    assert!(stdout.starts_with("module Geometry\n"));
    assert!(stdout.contains("\n  struct Point\n    x::Float64\n"));
    assert!(stdout.contains("\n    if dx == 0 && dy == 0\n      return 0.0\n    end\n"));
    assert!(stdout.ends_with("\nend\n"));
}

#[test]
fn format_bad_indent() {
    let (_, stderr, code) = run_in_fixture(&["--fmt", "geometry.jl", "--indent", "40"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("indent size must be between 1 and 16"));
}
