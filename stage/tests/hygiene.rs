//! Hygiene — enforces coding standards at test time
//!
//! Scans the production sources of both workspace members — the stage
//! engine and the stagegrid binary — for antipatterns that violate project
//! standards. Each has a budget (ideally zero). If you must add one, you
//! have to fix an existing one first — the budget never grows.
#![allow(clippy::absurd_extreme_comparisons)]

use std::fs;
use std::path::Path;

// Panics — these crash the process (or trap the wasm instance).
const MAX_UNWRAP: usize = 0;
const MAX_EXPECT: usize = 0;
const MAX_PANIC: usize = 0;
const MAX_UNREACHABLE: usize = 0;
const MAX_TODO: usize = 0;
const MAX_UNIMPLEMENTED: usize = 0;

// Silent loss — discards errors without inspecting.
const MAX_SILENT_DISCARD: usize = 0;
const MAX_DOT_OK: usize = 0;

// Style / structure.
const MAX_ALLOW_DEAD_CODE: usize = 0;

// Engine-only: the library has no console. The cli prints by design and
// is exempt.
const MAX_ENGINE_PRINT: usize = 0;

struct SourceFile {
    path: String,
    content: String,
}

/// Production `.rs` files across the workspace, excluding the sibling
/// `*_test.rs` files. Paths are relative to the stage package root, where
/// integration tests run.
fn workspace_sources() -> Vec<SourceFile> {
    let mut files = engine_sources();
    collect_rs_files(Path::new("../cli/src"), &mut files);
    files
}

/// Production `.rs` files of the stage member only.
fn engine_sources() -> Vec<SourceFile> {
    let mut files = Vec::new();
    collect_rs_files(Path::new("src"), &mut files);
    files
}

fn collect_rs_files(dir: &Path, out: &mut Vec<SourceFile>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            collect_rs_files(&path, out);
        } else if path.extension().is_some_and(|e| e == "rs") {
            let path_str = path.to_string_lossy().to_string();
            // Skip test files
            if path_str.ends_with("_test.rs") {
                continue;
            }
            if let Ok(content) = fs::read_to_string(&path) {
                out.push(SourceFile { path: path_str, content });
            }
        }
    }
}

/// Count lines containing `pattern` and fail if the total exceeds `max`,
/// listing the offending files.
fn assert_budget(files: &[SourceFile], pattern: &str, max: usize) {
    let hits: Vec<(&str, usize)> = files
        .iter()
        .filter_map(|file| {
            let count = file
                .content
                .lines()
                .filter(|line| line.contains(pattern))
                .count();
            (count > 0).then_some((file.path.as_str(), count))
        })
        .collect();
    let count: usize = hits.iter().map(|(_, c)| c).sum();
    let listing = hits
        .iter()
        .map(|(path, count)| format!("  {path}: {count}"))
        .collect::<Vec<_>>()
        .join("\n");
    assert!(
        count <= max,
        "{pattern} budget exceeded: found {count}, max {max}.\n{listing}"
    );
}

#[test]
fn unwrap_budget() {
    assert_budget(&workspace_sources(), ".unwrap()", MAX_UNWRAP);
}

#[test]
fn expect_budget() {
    assert_budget(&workspace_sources(), ".expect(", MAX_EXPECT);
}

#[test]
fn panic_budget() {
    assert_budget(&workspace_sources(), "panic!(", MAX_PANIC);
}

#[test]
fn unreachable_budget() {
    assert_budget(&workspace_sources(), "unreachable!(", MAX_UNREACHABLE);
}

#[test]
fn todo_budget() {
    assert_budget(&workspace_sources(), "todo!(", MAX_TODO);
}

#[test]
fn unimplemented_budget() {
    assert_budget(&workspace_sources(), "unimplemented!(", MAX_UNIMPLEMENTED);
}

#[test]
fn silent_discard_budget() {
    assert_budget(&workspace_sources(), "let _ =", MAX_SILENT_DISCARD);
}

#[test]
fn dot_ok_budget() {
    assert_budget(&workspace_sources(), ".ok()", MAX_DOT_OK);
}

#[test]
fn allow_dead_code_budget() {
    assert_budget(&workspace_sources(), "#[allow(dead_code)]", MAX_ALLOW_DEAD_CODE);
}

#[test]
fn engine_print_budget() {
    let files = engine_sources();
    assert_budget(&files, "println!(", MAX_ENGINE_PRINT);
    assert_budget(&files, "eprintln!(", MAX_ENGINE_PRINT);
}
