//! Command-line runner for the layer-boundary lint.
//!
//! With no argument it lints `wealthdesk/` under the workspace root. A single
//! argument names another crate directory to lint instead.

use std::env;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use architecture_lint::{ArchitectureLintError, lint_crate_sources};

/// Directory of the linted crate, relative to the workspace root.
const DEFAULT_CRATE: &str = "wealthdesk";

#[derive(Debug, thiserror::Error)]
#[error("no workspace Cargo.toml found above {}", .0.display())]
struct MissingWorkspace(PathBuf);

fn main() -> ExitCode {
    let mut stderr = io::stderr().lock();
    let crate_dir = match env::args_os().nth(1) {
        Some(dir) => PathBuf::from(dir),
        None => match default_crate_dir() {
            Ok(dir) => dir,
            Err(err) => {
                let _ = writeln!(stderr, "{err}");
                return ExitCode::FAILURE;
            }
        },
    };

    match lint_crate_sources(&crate_dir) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err @ ArchitectureLintError::Violations(_)) => {
            let _ = write!(stderr, "{err}");
            let _ = writeln!(stderr, "{} violation(s) in {}", err.violation_count(), crate_dir.display());
            ExitCode::FAILURE
        }
        Err(err) => {
            let _ = writeln!(stderr, "{err}");
            ExitCode::FAILURE
        }
    }
}

fn default_crate_dir() -> Result<PathBuf, MissingWorkspace> {
    let start = env::var_os("CARGO_WORKSPACE_DIR")
        .map(PathBuf::from)
        .or_else(|| env::current_dir().ok())
        .unwrap_or_else(|| PathBuf::from(env!("CARGO_MANIFEST_DIR")));
    start
        .ancestors()
        .find(|dir| declares_workspace(dir))
        .map(|root| root.join(DEFAULT_CRATE))
        .ok_or(MissingWorkspace(start.clone()))
}

fn declares_workspace(dir: &Path) -> bool {
    std::fs::read_to_string(dir.join("Cargo.toml"))
        .is_ok_and(|manifest| manifest.lines().any(|line| line.trim() == "[workspace]"))
}
