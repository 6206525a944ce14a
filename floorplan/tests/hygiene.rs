//! Hygiene: enforces coding standards at test time.
//!
//! Scans the production sources under `floorplan/src/` (sibling `_test.rs`
//! files excluded) for patterns the crate does not allow. Each pattern has a
//! budget. Budgets only ever go down.

use std::fs;
use std::path::Path;

struct Budget {
    pattern: &'static str,
    max: usize,
    why: &'static str,
}

// Panics crash the host page.
const UNWRAP: Budget = Budget { pattern: ".unwrap()", max: 0, why: "propagate or handle the None/Err" };
const EXPECT: Budget = Budget { pattern: ".expect(", max: 0, why: "propagate or handle the None/Err" };
const PANIC: Budget = Budget { pattern: "panic!(", max: 0, why: "return an error instead" };
const UNREACHABLE: Budget = Budget { pattern: "unreachable!(", max: 0, why: "encode the case in the types" };
const TODO: Budget = Budget { pattern: "todo!(", max: 0, why: "no stubs in shipped code" };
const UNIMPLEMENTED: Budget = Budget { pattern: "unimplemented!(", max: 0, why: "no stubs in shipped code" };

// Silent loss discards errors without inspecting them.
const SILENT_DISCARD: Budget = Budget { pattern: "let _ =", max: 0, why: "inspect or log the result" };
const DOT_OK: Budget = Budget { pattern: ".ok()", max: 0, why: "match on the error or log it" };

// Output goes through `tracing`.
const PRINTLN: Budget = Budget { pattern: "println!(", max: 0, why: "use tracing" };
const DBG: Budget = Budget { pattern: "dbg!(", max: 0, why: "use tracing" };

const ALLOW_DEAD_CODE: Budget = Budget { pattern: "#[allow(dead_code)]", max: 0, why: "delete unused code" };

struct SourceFile {
    path: String,
    content: String,
}

fn source_files() -> Vec<SourceFile> {
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
            continue;
        }
        let path_str = path.to_string_lossy().to_string();
        if !path_str.ends_with(".rs") || path_str.ends_with("_test.rs") {
            continue;
        }
        if let Ok(content) = fs::read_to_string(&path) {
            out.push(SourceFile { path: path_str, content });
        }
    }
}

fn check(budget: &Budget) {
    let files = source_files();
    assert!(!files.is_empty(), "no sources found; run from the crate root");
    let hits: Vec<(String, usize)> = files
        .iter()
        .map(|f| (f.path.clone(), f.content.lines().filter(|l| l.contains(budget.pattern)).count()))
        .filter(|(_, n)| *n > 0)
        .collect();
    let count: usize = hits.iter().map(|(_, n)| n).sum();
    let listing = hits
        .iter()
        .map(|(path, n)| format!("  {path}: {n}"))
        .collect::<Vec<_>>()
        .join("\n");
    assert!(
        count <= budget.max,
        "`{}` budget exceeded: found {count}, max {} ({}).\n{listing}",
        budget.pattern,
        budget.max,
        budget.why
    );
}

#[test]
fn unwrap_budget() {
    check(&UNWRAP);
}

#[test]
fn expect_budget() {
    check(&EXPECT);
}

#[test]
fn panic_budget() {
    check(&PANIC);
}

#[test]
fn unreachable_budget() {
    check(&UNREACHABLE);
}

#[test]
fn todo_budget() {
    check(&TODO);
}

#[test]
fn unimplemented_budget() {
    check(&UNIMPLEMENTED);
}

#[test]
fn silent_discard_budget() {
    check(&SILENT_DISCARD);
}

#[test]
fn dot_ok_budget() {
    check(&DOT_OK);
}

#[test]
fn println_budget() {
    check(&PRINTLN);
}

#[test]
fn dbg_budget() {
    check(&DBG);
}

#[test]
fn allow_dead_code_budget() {
    check(&ALLOW_DEAD_CODE);
}
