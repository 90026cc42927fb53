//! Repo-local architectural lint for the console's layer boundaries.
//!
//! The `wealthdesk` crate is a hexagon with a presentation core stacked on
//! top of the ports. This crate parses each layer's sources and reports any
//! `use` or path that reaches across a boundary:
//!
//! - `domain` depends on nothing else in the crate and on no HTTP framework,
//!   HTTP client, or filesystem crate
//! - `view` depends only on `domain`
//! - `session` and `pages` never name an adapter (`inbound`, `outbound`) or
//!   the composition root
//! - `inbound` and `middleware` never reach into `outbound`, and `outbound`
//!   never reaches into `inbound`
//!
//! Code compiled only under `cfg(test)` is exempt: test modules may wire
//! real adapters. `composition`, `server`, and the binaries are the places
//! where layers meet and are not linted.

use std::collections::BTreeSet;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use syn::visit::Visit;

/// A single boundary violation discovered by the linter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// File path relative to the crate's `src` directory.
    pub file: PathBuf,
    /// Human-readable description of the violated rule.
    pub message: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.file.display(), self.message)
    }
}

/// Failure modes returned by the architecture lint.
#[derive(Debug, thiserror::Error)]
pub enum ArchitectureLintError {
    /// Filesystem traversal or reading failed.
    #[error("could not read crate sources: {0}")]
    Io(#[from] io::Error),
    /// A source file could not be parsed or placed in a layer.
    #[error("cannot lint {}: {message}", file.display())]
    Parse { file: PathBuf, message: String },
    /// One or more boundary violations were found.
    #[error("{}", ViolationList(.0))]
    Violations(Vec<Violation>),
}

impl ArchitectureLintError {
    /// Number of boundary violations carried, zero for other failures.
    #[must_use]
    pub fn violation_count(&self) -> usize {
        match self {
            Self::Violations(violations) => violations.len(),
            _ => 0,
        }
    }
}

struct ViolationList<'a>(&'a [Violation]);

impl fmt::Display for ViolationList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "layer boundary violations:")?;
        for violation in self.0 {
            writeln!(f, "  {violation}")?;
        }
        Ok(())
    }
}

/// Crate name that may prefix absolute paths in integration-style code.
const CRATE_NAME: &str = "wealthdesk";

/// Files that only exist under `cfg(test)`.
const TEST_ONLY_FILES: [&str; 2] = ["test_utils.rs", "tests.rs"];

/// Lint the console crate sources on disk.
///
/// `crate_dir` must be the `wealthdesk/` directory at the repository root.
pub fn lint_crate_sources(crate_dir: &Path) -> Result<(), ArchitectureLintError> {
    let src_dir = crate_dir.join("src");
    let sources = collect_lint_sources(&src_dir)?;
    lint_sources(&sources)
}

/// Lint the provided Rust sources. Intended for unit and behaviour tests.
pub fn lint_sources(sources: &[LintSource]) -> Result<(), ArchitectureLintError> {
    let mut violations = Vec::new();

    for source in sources {
        let layer = ModuleLayer::infer_from_path(&source.file).ok_or_else(|| {
            ArchitectureLintError::Parse {
                file: source.file.clone(),
                message: "unable to infer module layer from file path".to_owned(),
            }
        })?;
        let parsed =
            syn::parse_file(&source.contents).map_err(|err| ArchitectureLintError::Parse {
                file: source.file.clone(),
                message: err.to_string(),
            })?;
        violations.extend(lint_parsed_source(&source.file, layer, &parsed));
    }

    if violations.is_empty() {
        Ok(())
    } else {
        Err(ArchitectureLintError::Violations(violations))
    }
}

/// A Rust source file to be linted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LintSource {
    /// Path relative to the crate's `src` directory.
    pub file: PathBuf,
    pub contents: String,
}

/// The layer inferred from the first directory of a source path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ModuleLayer {
    Domain,
    View,
    Session,
    Pages,
    Inbound,
    Middleware,
    Outbound,
}

impl ModuleLayer {
    const ALL: [Self; 7] = [
        Self::Domain,
        Self::View,
        Self::Session,
        Self::Pages,
        Self::Inbound,
        Self::Middleware,
        Self::Outbound,
    ];

    fn infer_from_path(relative_path: &Path) -> Option<Self> {
        let first = relative_path
            .components()
            .next()?
            .as_os_str()
            .to_string_lossy();
        Self::ALL
            .into_iter()
            .find(|layer| layer.name() == first.as_ref())
    }

    const fn name(self) -> &'static str {
        match self {
            Self::Domain => "domain",
            Self::View => "view",
            Self::Session => "session",
            Self::Pages => "pages",
            Self::Inbound => "inbound",
            Self::Middleware => "middleware",
            Self::Outbound => "outbound",
        }
    }

    fn forbidden_module_roots(self) -> BTreeSet<&'static str> {
        match self {
            Self::Domain => BTreeSet::from([
                "composition",
                "inbound",
                "middleware",
                "outbound",
                "pages",
                "server",
                "session",
                "view",
            ]),
            Self::View => BTreeSet::from([
                "composition",
                "inbound",
                "middleware",
                "outbound",
                "pages",
                "server",
                "session",
            ]),
            Self::Session | Self::Pages => BTreeSet::from([
                "composition",
                "inbound",
                "middleware",
                "outbound",
                "server",
            ]),
            Self::Inbound | Self::Middleware => {
                BTreeSet::from(["composition", "outbound", "pages", "session", "view"])
            }
            Self::Outbound => BTreeSet::from([
                "composition",
                "inbound",
                "middleware",
                "pages",
                "server",
                "session",
                "view",
            ]),
        }
    }

    fn forbidden_crate_roots(self) -> BTreeSet<&'static str> {
        match self {
            Self::Domain => BTreeSet::from([
                "actix_http",
                "actix_web",
                "camino",
                "cap_std",
                "example_data",
                "reqwest",
            ]),
            Self::View | Self::Session | Self::Pages => {
                BTreeSet::from(["actix_http", "actix_web", "cap_std", "reqwest"])
            }
            Self::Inbound | Self::Middleware => BTreeSet::from(["cap_std", "reqwest"]),
            Self::Outbound => BTreeSet::from(["actix_http", "actix_web"]),
        }
    }
}

fn lint_parsed_source(file: &Path, layer: ModuleLayer, parsed: &syn::File) -> Vec<Violation> {
    let forbidden_modules = layer.forbidden_module_roots();
    let forbidden_crates = layer.forbidden_crate_roots();
    let layer_name = layer.name();

    let mut collector = PathCollector::default();
    collector.visit_file(parsed);

    let mut messages = BTreeSet::new();
    for segments in &collector.paths {
        if let Some(root) = forbidden_internal_module_root(segments, &forbidden_modules) {
            messages.insert(format!(
                "{layer_name} module must not depend on crate::{root}"
            ));
        }

        if let Some(root) = forbidden_external_crate_root(segments, &forbidden_crates) {
            messages.insert(format!(
                "{layer_name} module must not depend on external crate `{root}`"
            ));
        }
    }

    messages
        .into_iter()
        .map(|message| Violation {
            file: file.to_path_buf(),
            message,
        })
        .collect()
}

fn forbidden_internal_module_root(
    segments: &[String],
    forbidden_roots: &BTreeSet<&'static str>,
) -> Option<&'static str> {
    let root = internal_module_root(segments)?;
    forbidden_roots.get(root).copied()
}

fn forbidden_external_crate_root(
    segments: &[String],
    forbidden_roots: &BTreeSet<&'static str>,
) -> Option<&'static str> {
    let root = external_crate_root(segments)?;
    forbidden_roots.get(root).copied()
}

fn is_relative_module_segment(segment: &str) -> bool {
    matches!(segment, "crate" | "self" | "super")
}

fn internal_module_root(segments: &[String]) -> Option<&str> {
    let first = segments.first()?.as_str();
    // A lone `view` or `session` is a local binding, not a module path.
    let names_layer = ModuleLayer::infer_from_path(Path::new(first)).is_some()
        || matches!(first, "composition" | "server");
    if names_layer && segments.len() > 1 {
        return Some(first);
    }
    let start_index = match first {
        "crate" | "self" | "super" => segments
            .iter()
            .position(|segment| !is_relative_module_segment(segment.as_str()))?,
        CRATE_NAME => 1,
        _ => return None,
    };
    segments.get(start_index).map(String::as_str)
}

fn external_crate_root(segments: &[String]) -> Option<&str> {
    let root = segments.first()?.as_str();
    if is_relative_module_segment(root) || root == CRATE_NAME {
        return None;
    }
    Some(root)
}

/// Whether `attrs` carry `#[cfg(test)]` or `#[test]`.
fn is_test_only(attrs: &[syn::Attribute]) -> bool {
    attrs.iter().any(|attr| {
        attr.path().is_ident("test")
            || (attr.path().is_ident("cfg")
                && attr
                    .parse_args::<syn::Ident>()
                    .is_ok_and(|ident| ident == "test"))
    })
}

#[derive(Default)]
struct PathCollector {
    paths: BTreeSet<Vec<String>>,
}

impl PathCollector {
    fn record_path(&mut self, path: &syn::Path) {
        let segments = path
            .segments
            .iter()
            .map(|segment| segment.ident.to_string())
            .collect::<Vec<_>>();
        if segments.is_empty() {
            return;
        }
        self.paths.insert(segments);
    }

    fn record_use_tree(&mut self, tree: &syn::UseTree, prefix: Vec<String>) {
        match tree {
            syn::UseTree::Path(path) => {
                let mut next = prefix;
                next.push(path.ident.to_string());
                self.record_use_tree(&path.tree, next);
            }
            syn::UseTree::Name(name) => {
                let mut segments = prefix;
                segments.push(name.ident.to_string());
                self.paths.insert(segments);
            }
            syn::UseTree::Rename(rename) => {
                let mut segments = prefix;
                segments.push(rename.ident.to_string());
                self.paths.insert(segments);
            }
            syn::UseTree::Glob(_) => {
                let mut segments = prefix;
                segments.push("*".to_owned());
                self.paths.insert(segments);
            }
            syn::UseTree::Group(group) => {
                for item in &group.items {
                    self.record_use_tree(item, prefix.clone());
                }
            }
        }
    }
}

impl<'ast> Visit<'ast> for PathCollector {
    fn visit_path(&mut self, node: &'ast syn::Path) {
        self.record_path(node);
        syn::visit::visit_path(self, node);
    }

    fn visit_item_use(&mut self, node: &'ast syn::ItemUse) {
        if is_test_only(&node.attrs) {
            return;
        }
        self.record_use_tree(&node.tree, Vec::new());
    }

    fn visit_item_mod(&mut self, node: &'ast syn::ItemMod) {
        if is_test_only(&node.attrs) {
            return;
        }
        syn::visit::visit_item_mod(self, node);
    }

    fn visit_item_fn(&mut self, node: &'ast syn::ItemFn) {
        if is_test_only(&node.attrs) {
            return;
        }
        syn::visit::visit_item_fn(self, node);
    }
}

fn collect_lint_sources(src_dir: &Path) -> Result<Vec<LintSource>, ArchitectureLintError> {
    let mut sources = Vec::new();
    for layer in ModuleLayer::ALL {
        let dir = src_dir.join(layer.name());
        if !dir.exists() {
            continue;
        }
        collect_sources_under(src_dir, &dir, &mut sources)?;
    }
    Ok(sources)
}

fn collect_sources_under(
    src_root: &Path,
    current: &Path,
    sources: &mut Vec<LintSource>,
) -> Result<(), ArchitectureLintError> {
    for entry in fs::read_dir(current)? {
        let entry = entry?;
        let path = entry.path();
        if path.is_dir() {
            collect_sources_under(src_root, &path, sources)?;
            continue;
        }

        if path.extension().and_then(|ext| ext.to_str()) != Some("rs") {
            continue;
        }
        let test_only = path
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| TEST_ONLY_FILES.contains(&name));
        if test_only {
            continue;
        }

        let relative = path
            .strip_prefix(src_root)
            .map_err(|err| ArchitectureLintError::Parse {
                file: path.clone(),
                message: err.to_string(),
            })?
            .to_path_buf();
        let contents = fs::read_to_string(&path)?;
        sources.push(LintSource {
            file: relative,
            contents,
        });
    }
    Ok(())
}
