//! File and directory operations around the XML reorderer.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use chrono::Local;
use rayon::prelude::*;
use sba_map::MappingRegistry;
use sba_model::{ContractError, DocumentKind, ElementNode, UnknownChildPolicy};
use sba_xml::{FixStats, OrderViolation, order_violations, read_document, reorder, write_document_file};
use serde::Serialize;
use tracing::{debug, info, info_span, warn};

/// Suffix pattern used when none is given.
pub const DEFAULT_PATTERN: &str = "*.xml";

#[derive(Debug, Clone)]
pub struct FixOptions {
    pub policy: UnknownChildPolicy,
    /// Copy the original aside before overwriting it in place.
    pub backup: bool,
    pub recursive: bool,
    /// File name suffix, with or without a leading `*`.
    pub pattern: String,
    /// Forces the document kind instead of detecting it from the root.
    pub kind: Option<DocumentKind>,
}

impl Default for FixOptions {
    fn default() -> Self {
        Self {
            policy: UnknownChildPolicy::default(),
            backup: true,
            recursive: false,
            pattern: DEFAULT_PATTERN.to_string(),
            kind: None,
        }
    }
}

impl FixOptions {
    fn suffix(&self) -> String {
        self.pattern.trim_start_matches('*').to_ascii_lowercase()
    }
}

/// Outcome of fixing one document.
#[derive(Debug, Clone, Serialize)]
pub struct FileFix {
    pub input: PathBuf,
    pub output: PathBuf,
    pub kind: DocumentKind,
    pub stats: FixStats,
    pub backup: Option<PathBuf>,
    /// False when the document was already in order and fixed in place.
    pub written: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct FixFailure {
    pub path: PathBuf,
    pub error: String,
}

/// Per-file results of a directory run, in path order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DirectoryFix {
    pub fixed: Vec<FileFix>,
    pub failed: Vec<FixFailure>,
}

impl DirectoryFix {
    pub fn files(&self) -> usize {
        self.fixed.len() + self.failed.len()
    }

    pub fn changed(&self) -> usize {
        self.fixed.iter().filter(|fix| fix.stats.changed()).count()
    }
}

/// Read-only order check of one document.
#[derive(Debug, Clone, Serialize)]
pub struct FileCheck {
    pub path: PathBuf,
    pub kind: DocumentKind,
    pub records: usize,
    pub violations: Vec<OrderViolation>,
}

impl FileCheck {
    pub fn is_ordered(&self) -> bool {
        self.violations.is_empty()
    }
}

/// Finds the document kind whose root element matches `root`.
pub fn detect_kind(root: &ElementNode) -> Option<DocumentKind> {
    [DocumentKind::Counseling, DocumentKind::Training]
        .into_iter()
        .find(|kind| sba_map::definition(*kind).document_root == root.name)
}

/// Builds a timestamped backup path next to `path`.
pub fn backup_path(path: &Path) -> PathBuf {
    let stamp = Local::now().format("%Y%m%d_%H%M%S");
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(format!(".{stamp}.bak"));
    path.with_file_name(name)
}

/// Reorders documents of either kind against their registry's contract.
#[derive(Debug, Clone)]
pub struct DocumentFixer {
    options: FixOptions,
    counseling: MappingRegistry,
    training: MappingRegistry,
}

impl DocumentFixer {
    pub fn new(options: FixOptions) -> Result<Self, ContractError> {
        Ok(Self {
            options,
            counseling: sba_map::registry(DocumentKind::Counseling)?,
            training: sba_map::registry(DocumentKind::Training)?,
        })
    }

    pub fn options(&self) -> &FixOptions {
        &self.options
    }

    fn registry(&self, kind: DocumentKind) -> &MappingRegistry {
        match kind {
            DocumentKind::Counseling => &self.counseling,
            DocumentKind::Training => &self.training,
        }
    }

    fn resolve_kind(&self, root: &ElementNode, path: &Path) -> Result<DocumentKind> {
        if let Some(kind) = self.options.kind {
            return Ok(kind);
        }
        detect_kind(root).ok_or_else(|| {
            anyhow!(
                "{}: cannot tell the document kind from root <{}>; pass --kind",
                path.display(),
                root.name
            )
        })
    }

    /// Fixes one file, writing to `output` or back over `input`.
    ///
    /// In-place fixes skip documents that are already in order.
    pub fn fix_file(&self, input: &Path, output: Option<&Path>) -> Result<FileFix> {
        let root = read_document(input).with_context(|| format!("read {}", input.display()))?;
        let kind = self.resolve_kind(&root, input)?;
        let (fixed, stats) = reorder(&root, self.registry(kind).contract(), self.options.policy)
            .with_context(|| format!("reorder {}", input.display()))?;

        let target = output.unwrap_or(input);
        let in_place = output.is_none() || target == input;
        let mut fix = FileFix {
            input: input.to_path_buf(),
            output: target.to_path_buf(),
            kind,
            stats,
            backup: None,
            written: false,
        };
        if in_place && !stats.changed() {
            debug!(path = %input.display(), "already in schema order");
            return Ok(fix);
        }

        if in_place && self.options.backup {
            let backup = backup_path(input);
            fs::copy(input, &backup)
                .with_context(|| format!("back up {} to {}", input.display(), backup.display()))?;
            fix.backup = Some(backup);
        }
        write_document_file(&fixed, target)
            .with_context(|| format!("write {}", target.display()))?;
        fix.written = true;
        info!(
            path = %target.display(),
            records = stats.records,
            records_reordered = stats.records_reordered,
            "document fixed"
        );
        Ok(fix)
    }

    /// Fixes every matching file under `dir`.
    ///
    /// With `output` the directory layout is mirrored there; otherwise files
    /// are fixed in place. A failing file is recorded and the rest continue.
    pub fn fix_directory(&self, dir: &Path, output: Option<&Path>) -> Result<DirectoryFix> {
        let span = info_span!("fix_directory", dir = %dir.display());
        let _guard = span.enter();

        let files = self.collect_files(dir)?;
        info!(files = files.len(), pattern = %self.options.pattern, "fixing directory");

        let outcomes: Vec<(PathBuf, Result<FileFix>)> = files
            .into_par_iter()
            .map(|path| {
                let target = output.map(|root| mirror_path(dir, root, &path));
                let outcome = self.fix_file(&path, target.as_deref());
                (path, outcome)
            })
            .collect();

        let mut result = DirectoryFix::default();
        for (path, outcome) in outcomes {
            match outcome {
                Ok(fix) => result.fixed.push(fix),
                Err(err) => {
                    warn!(path = %path.display(), error = %format!("{err:#}"), "file not fixed");
                    result.failed.push(FixFailure {
                        path,
                        error: format!("{err:#}"),
                    });
                }
            }
        }
        Ok(result)
    }

    /// Lists order violations without writing anything.
    pub fn check_file(&self, path: &Path) -> Result<FileCheck> {
        let root = read_document(path).with_context(|| format!("read {}", path.display()))?;
        let kind = self.resolve_kind(&root, path)?;
        let violations = order_violations(&root, self.registry(kind).contract());
        Ok(FileCheck {
            path: path.to_path_buf(),
            kind,
            records: root.children.len(),
            violations,
        })
    }

    fn collect_files(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        let suffix = self.options.suffix();
        let mut files = Vec::new();
        let mut pending = vec![dir.to_path_buf()];
        while let Some(current) = pending.pop() {
            let entries =
                fs::read_dir(&current).with_context(|| format!("list {}", current.display()))?;
            for entry in entries {
                let path = entry
                    .with_context(|| format!("list {}", current.display()))?
                    .path();
                if path.is_dir() {
                    if self.options.recursive {
                        pending.push(path);
                    }
                } else if matches_suffix(&path, &suffix) {
                    files.push(path);
                }
            }
        }
        files.sort();
        Ok(files)
    }
}

fn matches_suffix(path: &Path, suffix: &str) -> bool {
    path.file_name()
        .is_some_and(|name| name.to_string_lossy().to_ascii_lowercase().ends_with(suffix))
}

fn mirror_path(input_root: &Path, output_root: &Path, file: &Path) -> PathBuf {
    match file.strip_prefix(input_root) {
        Ok(relative) => output_root.join(relative),
        Err(_) => output_root.join(file.file_name().unwrap_or_default()),
    }
}
