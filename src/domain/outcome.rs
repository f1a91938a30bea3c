//! Per-file migration decisions and the aggregate migration report

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// The outcome of evaluating one header file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GuardDecision {
    /// The legacy directive was replaced with a guard pair
    Rewritten { guard_name: String },
    /// The file already contains an `#ifndef` opener; left untouched
    SkippedAlreadyGuarded,
    /// The file contains no `#pragma once`; left untouched
    SkippedNoPragmaOnce,
    /// The file could not be read or written back
    Failed { reason: String },
}

impl GuardDecision {
    /// Whether this decision changed the file on disk
    pub fn is_rewrite(&self) -> bool {
        matches!(self, Self::Rewritten { .. })
    }

    /// Whether this decision represents a per-file failure
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }

    /// Short label for display
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Rewritten { .. } => "rewritten",
            Self::SkippedAlreadyGuarded => "already guarded",
            Self::SkippedNoPragmaOnce => "no pragma once",
            Self::Failed { .. } => "failed",
        }
    }
}

/// The decision made for a single file during traversal
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileOutcome {
    /// Path of the header file that was evaluated
    pub file_path: PathBuf,
    /// What happened to it
    pub decision: GuardDecision,
    /// When the decision was made
    pub decided_at: DateTime<Utc>,
}

impl FileOutcome {
    pub fn new(file_path: PathBuf, decision: GuardDecision) -> Self {
        Self { file_path, decision, decided_at: Utc::now() }
    }

    /// Format outcome for display
    pub fn format_display(&self) -> String {
        match &self.decision {
            GuardDecision::Rewritten { guard_name } => {
                format!("{} [rewritten] {}", self.file_path.display(), guard_name)
            }
            GuardDecision::Failed { reason } => {
                format!("{} [failed] {}", self.file_path.display(), reason)
            }
            other => format!("{} [{}]", self.file_path.display(), other.as_str()),
        }
    }
}

/// Count of outcomes by decision kind
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutcomeCounts {
    pub rewritten: usize,
    pub already_guarded: usize,
    pub no_pragma_once: usize,
    pub failed: usize,
}

impl OutcomeCounts {
    /// Total number of files evaluated
    pub fn total(&self) -> usize {
        self.rewritten + self.already_guarded + self.no_pragma_once + self.failed
    }

    /// Files that were not rewritten, for any reason
    pub fn skipped(&self) -> usize {
        self.already_guarded + self.no_pragma_once + self.failed
    }

    /// Add a decision to the counts
    pub fn add(&mut self, decision: &GuardDecision) {
        match decision {
            GuardDecision::Rewritten { .. } => self.rewritten += 1,
            GuardDecision::SkippedAlreadyGuarded => self.already_guarded += 1,
            GuardDecision::SkippedNoPragmaOnce => self.no_pragma_once += 1,
            GuardDecision::Failed { .. } => self.failed += 1,
        }
    }
}

/// Summary statistics for a migration run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MigrationSummary {
    /// Total number of header files considered
    pub total_files: usize,
    /// Outcome counts by decision kind
    pub counts: OutcomeCounts,
    /// Total execution time in milliseconds
    pub execution_time_ms: u64,
    /// Timestamp when the migration was performed
    pub migrated_at: DateTime<Utc>,
}

/// Complete migration report containing all per-file outcomes and metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MigrationReport {
    /// Every file decision made during traversal
    pub outcomes: Vec<FileOutcome>,
    /// Summary statistics
    pub summary: MigrationSummary,
    /// Whether this was a dry run (no files written)
    pub dry_run: bool,
    /// Fingerprint of the configuration used for this run
    pub config_fingerprint: Option<String>,
}

impl MigrationReport {
    /// Create a new empty migration report
    pub fn new() -> Self {
        Self {
            outcomes: Vec::new(),
            summary: MigrationSummary { migrated_at: Utc::now(), ..Default::default() },
            dry_run: false,
            config_fingerprint: None,
        }
    }

    /// Record the outcome for one file
    pub fn add_outcome(&mut self, outcome: FileOutcome) {
        self.summary.counts.add(&outcome.decision);
        self.summary.total_files += 1;
        self.outcomes.push(outcome);
    }

    /// Whether any file was rewritten
    pub fn has_rewrites(&self) -> bool {
        self.summary.counts.rewritten > 0
    }

    /// Whether any per-file read/write failure occurred
    pub fn has_failures(&self) -> bool {
        self.summary.counts.failed > 0
    }

    /// Outcomes that failed, for error reporting
    pub fn failures(&self) -> impl Iterator<Item = &FileOutcome> {
        self.outcomes.iter().filter(|o| o.decision.is_failure())
    }

    /// Set the execution time
    pub fn set_execution_time(&mut self, duration_ms: u64) {
        self.summary.execution_time_ms = duration_ms;
    }

    /// Set the configuration fingerprint
    pub fn set_config_fingerprint(&mut self, fingerprint: impl Into<String>) {
        self.config_fingerprint = Some(fingerprint.into());
    }

    /// Mark this report as the result of a dry run
    pub fn set_dry_run(&mut self, dry_run: bool) {
        self.dry_run = dry_run;
    }

    /// Sort outcomes by file path for consistent output
    pub fn sort_outcomes(&mut self) {
        self.outcomes.sort_by(|a, b| a.file_path.cmp(&b.file_path));
    }
}

impl Default for MigrationReport {
    fn default() -> Self {
        Self::new()
    }
}

/// Error types that can occur during migration
#[derive(Debug, thiserror::Error)]
pub enum MigrateError {
    /// Configuration file could not be loaded or parsed
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Underlying filesystem operation failed
    #[error("IO error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    /// The traversal root could not be accessed
    #[error("Cannot access traversal root '{root}': {message}")]
    Root { root: String, message: String },

    /// A source file could not be read or decoded
    #[error("Failed to read {file}: {message}")]
    Read { file: String, message: String },

    /// Rewritten content could not be persisted back
    #[error("Failed to write {file}: {message}")]
    Write { file: String, message: String },
}

impl MigrateError {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Configuration { message: message.into() }
    }

    /// Create a traversal-root error
    pub fn root(root: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Root { root: root.into(), message: message.into() }
    }

    /// Create a per-file read error
    pub fn read(file: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Read { file: file.into(), message: message.into() }
    }

    /// Create a per-file write error
    pub fn write(file: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Write { file: file.into(), message: message.into() }
    }
}

/// Result type for migration operations
pub type MigrateResult<T> = Result<T, MigrateError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_decision_classification() {
        let rewrite = GuardDecision::Rewritten { guard_name: "SERIKA_FOO_H".to_string() };
        assert!(rewrite.is_rewrite());
        assert!(!rewrite.is_failure());

        let failed = GuardDecision::Failed { reason: "permission denied".to_string() };
        assert!(failed.is_failure());
        assert!(!failed.is_rewrite());

        assert!(!GuardDecision::SkippedAlreadyGuarded.is_rewrite());
        assert!(!GuardDecision::SkippedNoPragmaOnce.is_failure());
    }

    #[test]
    fn test_outcome_display() {
        let outcome = FileOutcome::new(
            PathBuf::from("mods/gfx/shader.hpp"),
            GuardDecision::Rewritten { guard_name: "SERIKA_GFX_SHADER_HPP".to_string() },
        );

        assert_eq!(outcome.file_path, Path::new("mods/gfx/shader.hpp"));
        let display = outcome.format_display();
        assert!(display.contains("rewritten"));
        assert!(display.contains("SERIKA_GFX_SHADER_HPP"));
    }

    #[test]
    fn test_report_counts() {
        let mut report = MigrationReport::new();

        report.add_outcome(FileOutcome::new(
            PathBuf::from("a.h"),
            GuardDecision::Rewritten { guard_name: "SERIKA_A_H".to_string() },
        ));
        report.add_outcome(FileOutcome::new(
            PathBuf::from("b.h"),
            GuardDecision::SkippedAlreadyGuarded,
        ));
        report.add_outcome(FileOutcome::new(
            PathBuf::from("c.h"),
            GuardDecision::Failed { reason: "read error".to_string() },
        ));

        assert!(report.has_rewrites());
        assert!(report.has_failures());
        assert_eq!(report.summary.total_files, 3);
        assert_eq!(report.summary.counts.rewritten, 1);
        assert_eq!(report.summary.counts.skipped(), 2);
        assert_eq!(report.failures().count(), 1);
    }

    #[test]
    fn test_report_sorting() {
        let mut report = MigrationReport::new();
        report.add_outcome(FileOutcome::new(
            PathBuf::from("z.h"),
            GuardDecision::SkippedNoPragmaOnce,
        ));
        report.add_outcome(FileOutcome::new(
            PathBuf::from("a.h"),
            GuardDecision::SkippedNoPragmaOnce,
        ));

        report.sort_outcomes();
        assert_eq!(report.outcomes[0].file_path, PathBuf::from("a.h"));
    }
}
