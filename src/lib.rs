//! Include Guardian - migration of `#pragma once` headers to portable include guards
//!
//! Architecture: Clean Architecture - Library interface serves as the application layer
//! - Pure transform logic separated from filesystem concerns
//! - Guard naming and content rewriting are independently testable components
//! - The migrator composes them per file: read, name, rewrite, write

pub mod config;
pub mod domain;
pub mod migrate;
pub mod namer;
pub mod report;
pub mod rewrite;

// Re-export main types for convenient access
pub use domain::{
    FileOutcome, GuardDecision, MigrateError, MigrateResult, MigrationReport, MigrationSummary,
    OutcomeCounts,
};

pub use config::{ConfigBuilder, FileConfig, MigratorConfig, NamingConfig};

pub use migrate::{DiskStore, FileStore, MigrateOptions, Migrator};

pub use namer::{AnchorResolver, GuardNamer, SegmentAnchor};

pub use report::{OutputFormat, ReportFormatter, ReportOptions};

pub use rewrite::{GuardRewriter, RewriteOutcome};

use std::path::Path;

/// High-level facade for running migrations and formatting their results
pub struct GuardMigrator {
    migrator: Migrator,
    report_formatter: ReportFormatter,
}

impl GuardMigrator {
    /// Create a new migrator with the given configuration
    pub fn new_with_config(config: MigratorConfig) -> MigrateResult<Self> {
        let migrator = Migrator::new(config)?;
        Ok(Self { migrator, report_formatter: ReportFormatter::default() })
    }

    /// Create a migrator with default configuration
    pub fn new() -> MigrateResult<Self> {
        Self::new_with_config(MigratorConfig::default())
    }

    /// Create a migrator loading configuration from file
    pub fn from_config_file<P: AsRef<Path>>(path: P) -> MigrateResult<Self> {
        let config = MigratorConfig::load_from_file(path)?;
        Self::new_with_config(config)
    }

    /// Set custom report formatter
    pub fn with_report_formatter(mut self, formatter: ReportFormatter) -> Self {
        self.report_formatter = formatter;
        self
    }

    /// Migrate every matching header under `root`
    pub fn migrate_tree<P: AsRef<Path>>(
        &self,
        root: P,
        options: &MigrateOptions,
    ) -> MigrateResult<MigrationReport> {
        self.migrator.migrate_tree(root.as_ref(), options)
    }

    /// Migrate a single header file
    pub fn migrate_file<P: AsRef<Path>>(
        &self,
        path: P,
        options: &MigrateOptions,
    ) -> MigrateResult<GuardDecision> {
        self.migrator.migrate_file(path.as_ref(), options)
    }

    /// Derive the guard name a path would receive, without touching the file
    pub fn derive_guard_name<P: AsRef<Path>>(&self, path: P) -> String {
        self.migrator.guard_name(path.as_ref())
    }

    /// Format a migration report for output
    pub fn format_report(
        &self,
        report: &MigrationReport,
        format: OutputFormat,
    ) -> MigrateResult<String> {
        self.report_formatter.format_report(report, format)
    }
}

/// Convenience function to migrate a directory with default settings
pub fn migrate_directory<P: AsRef<Path>>(root: P) -> MigrateResult<MigrationReport> {
    let migrator = GuardMigrator::new()?;
    migrator.migrate_tree(root, &MigrateOptions::default())
}

/// Convenience function to preview a migration without writing anything
pub fn preview_directory<P: AsRef<Path>>(root: P) -> MigrateResult<MigrationReport> {
    let migrator = GuardMigrator::new()?;
    migrator.migrate_tree(root, &MigrateOptions { dry_run: true })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_migrator_creation() {
        let migrator = GuardMigrator::new().unwrap();
        assert_eq!(
            migrator.derive_guard_name("/tree/mods/gfx/shader.hpp"),
            "SERIKA_GFX_SHADER_HPP"
        );
    }

    #[test]
    fn test_end_to_end_migration() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::create_dir_all(root.join("mods/Renderer")).unwrap();
        fs::write(root.join("mods/Renderer/Pass.hpp"), "#pragma once\nclass Pass {};\n").unwrap();

        let report = migrate_directory(root).unwrap();
        assert_eq!(report.summary.counts.rewritten, 1);

        let content = fs::read_to_string(root.join("mods/Renderer/Pass.hpp")).unwrap();
        assert!(content.starts_with("#ifndef SERIKA_RENDERER_PASS_HPP\n#define SERIKA_RENDERER_PASS_HPP\n"));
        assert!(content.ends_with("\n#endif // SERIKA_RENDERER_PASS_HPP\n"));
    }

    #[test]
    fn test_preview_does_not_write() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::create_dir_all(root.join("mods")).unwrap();
        fs::write(root.join("mods/a.h"), "#pragma once\nint a;\n").unwrap();

        let report = preview_directory(root).unwrap();
        assert!(report.dry_run);
        assert_eq!(report.summary.counts.rewritten, 1);
        assert_eq!(fs::read_to_string(root.join("mods/a.h")).unwrap(), "#pragma once\nint a;\n");
    }

    #[test]
    fn test_from_config_file() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("guardian.yaml");
        fs::write(
            &config_path,
            "version: \"1.0\"\nnaming: { anchor: include, prefix: APP_ }\nfiles: { extensions: [h] }\n",
        )
        .unwrap();

        let migrator = GuardMigrator::from_config_file(&config_path).unwrap();
        assert_eq!(migrator.derive_guard_name("/repo/include/io/file.h"), "APP_IO_FILE_H");
    }

    #[test]
    fn test_report_formatting() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::create_dir_all(root.join("mods")).unwrap();
        fs::write(root.join("mods/a.h"), "#pragma once\nint a;\n").unwrap();

        let migrator = GuardMigrator::new().unwrap();
        let report = migrator.migrate_tree(root, &MigrateOptions::default()).unwrap();

        let human = migrator.format_report(&report, OutputFormat::Human).unwrap();
        assert!(human.contains("Summary:"));

        let json = migrator.format_report(&report, OutputFormat::Json).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert!(parsed["outcomes"].is_array());
        assert_eq!(parsed["summary"]["rewritten"], 1);
    }
}
