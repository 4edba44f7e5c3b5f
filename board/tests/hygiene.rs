//! Hygiene — enforces coding standards at test time
//!
//! Scans the board crate's production sources for antipatterns. Geometry and
//! capture paths must degrade to no-ops rather than crash (a panic in the
//! input pipeline takes the whole drawing surface down with it), so the
//! panic-family budgets are zero. Budgets never grow: to add an occurrence
//! you must first remove one.

use std::fs;
use std::path::Path;

/// (needle, budget) pairs checked against every production line.
const LINE_BUDGETS: &[(&str, usize)] = &[
    // Panics — these crash the wasm instance mid-gesture.
    (".unwrap()", 0),
    (".expect(", 0),
    ("panic!(", 0),
    ("unreachable!(", 0),
    ("todo!(", 0),
    ("unimplemented!(", 0),
    // Silent loss — errors dropped without inspection.
    ("let _ =", 0),
    (".ok()", 0),
    // Structure.
    ("#[allow(dead_code)]", 0),
];

/// Modules allowed to touch the browser bindings. Everything else stays pure
/// so the pipeline unit-tests natively.
const BROWSER_BOUNDARY: &[&str] = &["render.rs", "engine.rs"];

fn production_sources() -> Vec<(String, String)> {
    let mut files = Vec::new();
    walk(Path::new("src"), &mut files);
    files
}

fn walk(dir: &Path, out: &mut Vec<(String, String)>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            walk(&path, out);
            continue;
        }
        let name = path.to_string_lossy().to_string();
        if !name.ends_with(".rs") || name.ends_with("_test.rs") {
            continue;
        }
        if let Ok(content) = fs::read_to_string(&path) {
            out.push((name, content));
        }
    }
}

fn occurrences(files: &[(String, String)], needle: &str) -> Vec<String> {
    let mut hits = Vec::new();
    for (path, content) in files {
        for (idx, line) in content.lines().enumerate() {
            if line.contains(needle) {
                hits.push(format!("  {path}:{}: {}", idx + 1, line.trim()));
            }
        }
    }
    hits
}

#[test]
fn line_budgets_hold() {
    let files = production_sources();
    let mut violations = Vec::new();
    for &(needle, budget) in LINE_BUDGETS {
        let hits = occurrences(&files, needle);
        if hits.len() > budget {
            violations.push(format!(
                "`{needle}` over budget ({} found, max {budget}):\n{}",
                hits.len(),
                hits.join("\n")
            ));
        }
    }
    assert!(violations.is_empty(), "{}", violations.join("\n\n"));
}

#[test]
fn browser_bindings_stay_behind_the_render_boundary() {
    let files = production_sources();
    let mut leaks = Vec::new();
    for (path, content) in &files {
        if BROWSER_BOUNDARY.iter().any(|allowed| path.ends_with(allowed)) {
            continue;
        }
        for (idx, line) in content.lines().enumerate() {
            if line.contains("web_sys") || line.contains("wasm_bindgen") {
                leaks.push(format!("  {path}:{}: {}", idx + 1, line.trim()));
            }
        }
    }
    assert!(
        leaks.is_empty(),
        "web_sys/wasm_bindgen referenced outside {BROWSER_BOUNDARY:?}:\n{}",
        leaks.join("\n")
    );
}
