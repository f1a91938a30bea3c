//! Migration orchestrator walking a header tree and applying the guard transform
//!
//! Architecture: Domain Services - Migrator coordinates naming, rewriting, and persistence
//! - Traversal is sequential and sorted so runs are deterministic
//! - Persistence goes through an injectable store so the transform is testable off disk
//! - Per-file failures are recorded and never abort the traversal

use crate::config::MigratorConfig;
use crate::domain::{
    FileOutcome, GuardDecision, MigrateError, MigrateResult, MigrationReport,
};
use crate::namer::GuardNamer;
use crate::rewrite::{GuardRewriter, RewriteOutcome};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Instant;
use walkdir::WalkDir;

/// Read/write abstraction decoupling the migration transaction from the filesystem
pub trait FileStore: Send + Sync {
    /// Read a file's content as UTF-8 text
    fn read(&self, path: &Path) -> io::Result<String>;

    /// Overwrite a file in place with new content
    fn write(&self, path: &Path, content: &str) -> io::Result<()>;
}

/// Default store backed by the real filesystem
#[derive(Debug, Default)]
pub struct DiskStore;

impl FileStore for DiskStore {
    fn read(&self, path: &Path) -> io::Result<String> {
        fs::read_to_string(path)
    }

    fn write(&self, path: &Path, content: &str) -> io::Result<()> {
        fs::write(path, content)
    }
}

/// Options for customizing a migration run
#[derive(Debug, Clone, Default)]
pub struct MigrateOptions {
    /// Compute decisions without writing anything back
    pub dry_run: bool,
}

/// Walks a header tree and rewrites legacy directives into guard pairs
pub struct Migrator {
    config: MigratorConfig,
    namer: GuardNamer,
    rewriter: GuardRewriter,
    store: Box<dyn FileStore>,
    exclude: Vec<glob::Pattern>,
}

impl Migrator {
    /// Create a migrator from the given configuration, persisting to disk
    pub fn new(config: MigratorConfig) -> MigrateResult<Self> {
        Self::with_store(config, Box::new(DiskStore))
    }

    /// Create a migrator with a custom persistence store
    pub fn with_store(config: MigratorConfig, store: Box<dyn FileStore>) -> MigrateResult<Self> {
        config.validate()?;

        let namer =
            GuardNamer::with_segment(config.naming.prefix.as_str(), config.naming.anchor.as_str());
        let rewriter = GuardRewriter::new()?;

        let mut exclude = Vec::new();
        for pattern in &config.files.exclude {
            let compiled = glob::Pattern::new(pattern).map_err(|e| {
                MigrateError::config(format!("Invalid exclude pattern '{pattern}': {e}"))
            })?;
            exclude.push(compiled);
        }

        Ok(Self { config, namer, rewriter, store, exclude })
    }

    /// Create a migrator with default configuration
    pub fn with_defaults() -> MigrateResult<Self> {
        Self::new(MigratorConfig::default())
    }

    /// Derive the guard name for a path without touching the file
    pub fn guard_name(&self, path: &Path) -> String {
        self.namer.derive_guard_name(path)
    }

    /// Get the configuration fingerprint for report provenance
    pub fn config_fingerprint(&self) -> String {
        self.config.fingerprint()
    }

    /// Migrate every matching header under `root` and return the full report.
    ///
    /// An inaccessible root aborts before any file is processed; everything
    /// after that is a per-file concern recorded in the report.
    pub fn migrate_tree(&self, root: &Path, options: &MigrateOptions) -> MigrateResult<MigrationReport> {
        let start_time = Instant::now();

        let metadata = fs::metadata(root)
            .map_err(|e| MigrateError::root(root.display().to_string(), e.to_string()))?;
        if !metadata.is_dir() {
            return Err(MigrateError::root(
                root.display().to_string(),
                "not a directory".to_string(),
            ));
        }

        let mut report = MigrationReport::new();
        report.set_dry_run(options.dry_run);

        for path in self.find_headers(root) {
            let decision = match self.migrate_file(&path, options) {
                Ok(decision) => decision,
                Err(e) => {
                    tracing::warn!("Failed to migrate {}: {}", path.display(), e);
                    GuardDecision::Failed { reason: e.to_string() }
                }
            };
            report.add_outcome(FileOutcome::new(path, decision));
        }

        report.set_execution_time(start_time.elapsed().as_millis() as u64);
        report.set_config_fingerprint(self.config.fingerprint());
        report.sort_outcomes();

        Ok(report)
    }

    /// Evaluate and, unless dry-running, rewrite a single header file
    pub fn migrate_file(&self, path: &Path, options: &MigrateOptions) -> MigrateResult<GuardDecision> {
        let content = self
            .store
            .read(path)
            .map_err(|e| MigrateError::read(path.display().to_string(), e.to_string()))?;

        let guard_name = self.namer.derive_guard_name(path);

        match self.rewriter.rewrite(&content, &guard_name) {
            RewriteOutcome::Rewritten(new_content) => {
                if !options.dry_run {
                    self.store
                        .write(path, &new_content)
                        .map_err(|e| MigrateError::write(path.display().to_string(), e.to_string()))?;
                }
                tracing::debug!("Rewrote {} with guard {}", path.display(), guard_name);
                Ok(GuardDecision::Rewritten { guard_name })
            }
            RewriteOutcome::AlreadyGuarded => Ok(GuardDecision::SkippedAlreadyGuarded),
            RewriteOutcome::NoPragmaOnce => Ok(GuardDecision::SkippedNoPragmaOnce),
        }
    }

    /// Enumerate candidate headers under `root` in deterministic order
    pub fn find_headers(&self, root: &Path) -> Vec<PathBuf> {
        let mut headers = Vec::new();

        let walker = WalkDir::new(root).follow_links(false).sort_by_file_name();
        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::warn!("Traversal error under {}: {}", root.display(), e);
                    continue;
                }
            };

            let path = entry.path();
            if entry.file_type().is_file() && self.matches_extension(path) && !self.is_excluded(path)
            {
                headers.push(path.to_path_buf());
            }
        }

        headers
    }

    fn matches_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| self.config.files.extensions.iter().any(|e| e == ext))
            .unwrap_or(false)
    }

    fn is_excluded(&self, path: &Path) -> bool {
        let path_str = path.to_string_lossy();
        self.exclude.iter().any(|pattern| pattern.matches(&path_str))
    }
}
