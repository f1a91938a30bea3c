//! Report generation with multiple output formats
//!
//! Architecture: Anti-Corruption Layer - Formatters translate domain objects to external formats
//! - MigrationReport (domain) is converted to external representations
//! - Each formatter encapsulates the rules for its specific output format

use crate::domain::{GuardDecision, MigrateResult, MigrationReport};
use serde_json::Value as JsonValue;
use std::io::Write;

/// Supported output formats for migration reports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable format with colors and per-file detail
    Human,
    /// JSON format for programmatic consumption
    Json,
}

impl OutputFormat {
    /// Parse format from string
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "human" => Some(Self::Human),
            "json" => Some(Self::Json),
            _ => None,
        }
    }

    /// Get all available format names
    pub fn all_formats() -> &'static [&'static str] {
        &["human", "json"]
    }
}

/// Options for customizing report output
#[derive(Debug, Clone)]
pub struct ReportOptions {
    /// Whether to use colored output (for human format)
    pub use_colors: bool,
    /// Whether to list skipped files individually
    pub show_skipped: bool,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self { use_colors: true, show_skipped: false }
    }
}

/// Main report formatter that dispatches to specific formatters
pub struct ReportFormatter {
    options: ReportOptions,
}

impl ReportFormatter {
    /// Create a new report formatter with options
    pub fn new(options: ReportOptions) -> Self {
        Self { options }
    }

    /// Format a migration report in the specified format
    pub fn format_report(&self, report: &MigrationReport, format: OutputFormat) -> MigrateResult<String> {
        match format {
            OutputFormat::Human => self.format_human(report),
            OutputFormat::Json => self.format_json(report),
        }
    }

    /// Write a formatted report to a writer
    pub fn write_report<W: Write>(
        &self,
        report: &MigrationReport,
        format: OutputFormat,
        mut writer: W,
    ) -> MigrateResult<()> {
        let formatted = self.format_report(report, format)?;
        writer
            .write_all(formatted.as_bytes())
            .map_err(|e| crate::domain::MigrateError::Io { source: e })?;
        Ok(())
    }

    /// Format report in human-readable format
    fn format_human(&self, report: &MigrationReport) -> MigrateResult<String> {
        let mut output = String::new();

        if report.dry_run {
            output.push_str("(dry run - no files were written)\n\n");
        }

        for outcome in &report.outcomes {
            let include = match outcome.decision {
                GuardDecision::Rewritten { .. } | GuardDecision::Failed { .. } => true,
                _ => self.options.show_skipped,
            };
            if !include {
                continue;
            }

            if self.options.use_colors {
                let color = match outcome.decision {
                    GuardDecision::Rewritten { .. } => "32",
                    GuardDecision::Failed { .. } => "31",
                    _ => "2",
                };
                output.push_str(&format!("\x1b[{}m{}\x1b[0m\n", color, outcome.format_display()));
            } else {
                output.push_str(&outcome.format_display());
                output.push('\n');
            }
        }

        if !output.is_empty() && !output.ends_with("\n\n") {
            output.push('\n');
        }

        output.push_str(&self.format_summary(report));
        Ok(output)
    }

    /// Format report in JSON format
    fn format_json(&self, report: &MigrationReport) -> MigrateResult<String> {
        let json_outcomes: Vec<JsonValue> = report
            .outcomes
            .iter()
            .map(|o| {
                let guard_name = match &o.decision {
                    GuardDecision::Rewritten { guard_name } => Some(guard_name.as_str()),
                    _ => None,
                };
                let reason = match &o.decision {
                    GuardDecision::Failed { reason } => Some(reason.as_str()),
                    _ => None,
                };

                serde_json::json!({
                    "file_path": o.file_path.display().to_string(),
                    "decision": o.decision.as_str(),
                    "guard_name": guard_name,
                    "reason": reason,
                    "decided_at": o.decided_at.to_rfc3339(),
                })
            })
            .collect();

        let json_report = serde_json::json!({
            "outcomes": json_outcomes,
            "summary": {
                "total_files": report.summary.total_files,
                "rewritten": report.summary.counts.rewritten,
                "already_guarded": report.summary.counts.already_guarded,
                "no_pragma_once": report.summary.counts.no_pragma_once,
                "failed": report.summary.counts.failed,
                "execution_time_ms": report.summary.execution_time_ms,
                "migrated_at": report.summary.migrated_at.to_rfc3339(),
            },
            "dry_run": report.dry_run,
            "config_fingerprint": report.config_fingerprint,
        });

        serde_json::to_string_pretty(&json_report).map_err(|e| {
            crate::domain::MigrateError::config(format!("JSON serialization failed: {e}"))
        })
    }

    /// Format the summary section
    fn format_summary(&self, report: &MigrationReport) -> String {
        let counts = &report.summary.counts;
        let execution_time = (report.summary.execution_time_ms as f64) / 1000.0;

        let mut parts = Vec::new();

        let rewritten = format!(
            "{} file{} rewritten",
            counts.rewritten,
            if counts.rewritten == 1 { "" } else { "s" }
        );
        if self.options.use_colors && counts.rewritten > 0 {
            parts.push(format!("\x1b[32m{rewritten}\x1b[0m"));
        } else {
            parts.push(rewritten);
        }

        parts.push(format!(
            "{} skipped ({} already guarded, {} without pragma once)",
            counts.skipped(),
            counts.already_guarded,
            counts.no_pragma_once
        ));

        if counts.failed > 0 {
            let failed =
                format!("{} failure{}", counts.failed, if counts.failed == 1 { "" } else { "s" });
            if self.options.use_colors {
                parts.push(format!("\x1b[31m{failed}\x1b[0m"));
            } else {
                parts.push(failed);
            }
        }

        format!(
            "Summary: {} in {} files ({:.1}s)\n",
            parts.join(", "),
            report.summary.total_files,
            execution_time
        )
    }
}

impl Default for ReportFormatter {
    fn default() -> Self {
        Self::new(ReportOptions::default())
    }
}
