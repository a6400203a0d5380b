//! Process termination stays in two places: the lifecycle abort path and the
//! facade's `start!` exit.

use std::{
    fs,
    path::{Path, PathBuf},
};

///
/// ExitRule
///

struct ExitRule {
    needles: &'static [&'static str],
    home: &'static str,
}

const RULES: &[ExitRule] = &[
    ExitRule {
        needles: &["process::abort", "libc::abort"],
        home: "crates/boothost-core/src/lifecycle",
    },
    ExitRule {
        needles: &["process::exit"],
        home: "crates/boothost/src/macros/start.rs",
    },
];

#[test]
fn process_termination_is_centralized() {
    let root = workspace_root();
    let mut sources = Vec::new();
    collect_sources(&root.join("crates"), &mut sources);
    assert!(!sources.is_empty(), "no sources under {}", root.display());

    let mut strays = Vec::new();
    for path in &sources {
        let rel = path.strip_prefix(&root).unwrap_or(path);
        let text = fs::read_to_string(path).unwrap();

        for rule in RULES {
            if rel.starts_with(rule.home) {
                continue;
            }
            for (n, line) in text.lines().enumerate() {
                if let Some(needle) = rule.needles.iter().find(|needle| line.contains(**needle)) {
                    strays.push(format!("{}:{}: {needle}", rel.display(), n + 1));
                }
            }
        }
    }

    assert!(
        strays.is_empty(),
        "process termination outside its home:\n{}",
        strays.join("\n")
    );
}

#[test]
fn termination_homes_exist() {
    let root = workspace_root();
    for rule in RULES {
        assert!(root.join(rule.home).exists(), "missing {}", rule.home);
    }
}

// non-test rust sources; integration test dirs are skipped
fn collect_sources(dir: &Path, out: &mut Vec<PathBuf>) {
    for entry in fs::read_dir(dir).unwrap() {
        let path = entry.unwrap().path();
        let name = path.file_name().and_then(|n| n.to_str()).unwrap_or_default();

        if path.is_dir() {
            if !matches!(name, "target" | "tests" | ".git") {
                collect_sources(&path, out);
            }
        } else if path.extension().is_some_and(|ext| ext == "rs") {
            out.push(path);
        }
    }
}

fn workspace_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .ancestors()
        .nth(2)
        .map(Path::to_path_buf)
        .unwrap()
}
