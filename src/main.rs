//! Include Guardian CLI - Command-line interface for guard migration
//!
//! Architecture: Application Layer - CLI coordinates user interactions with domain services
//! - Translates user commands to domain operations
//! - Handles external concerns like process exit codes and terminal output
//! - Provides clean separation between user interface and migration logic

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use include_guardian::{
    ConfigBuilder, GuardMigrator, MigrateOptions, MigrateResult, MigratorConfig, OutputFormat,
    ReportFormatter, ReportOptions,
};
use std::path::{Path, PathBuf};
use std::process;

/// Include Guardian - migrate `#pragma once` headers to portable include guards
#[derive(Parser)]
#[command(name = "include-guardian")]
#[command(version = "0.1.0")]
#[command(about = "Rewrites #pragma once directives into #ifndef/#define/#endif guards")]
#[command(
    long_about = "Include Guardian walks a header tree, derives a deterministic guard name from each file's path, and rewrites the legacy #pragma once directive into a portable include guard. Re-running on a migrated tree is a no-op."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Rewrite legacy directives under a root directory
    Migrate {
        /// Root directory to traverse (defaults to current directory)
        root: Option<PathBuf>,

        /// Compute decisions without writing any file
        #[arg(long)]
        dry_run: bool,

        /// Output format
        #[arg(short, long, value_enum, default_value = "human")]
        format: OutputFormatArg,

        /// List skipped files individually in human output
        #[arg(long)]
        show_skipped: bool,

        /// Override the anchor directory segment
        #[arg(long)]
        anchor: Option<String>,

        /// Override the guard-name prefix
        #[arg(long)]
        prefix: Option<String>,

        /// Header extensions to migrate (repeatable, no leading dot)
        #[arg(long = "extension", action = clap::ArgAction::Append)]
        extensions: Vec<String>,

        /// Additional exclude glob patterns
        #[arg(long, action = clap::ArgAction::Append)]
        exclude: Vec<String>,
    },

    /// Print the guard name each path would receive
    Name {
        /// Paths to derive names for
        paths: Vec<PathBuf>,

        /// Override the anchor directory segment
        #[arg(long)]
        anchor: Option<String>,

        /// Override the guard-name prefix
        #[arg(long)]
        prefix: Option<String>,
    },

    /// Validate configuration file
    ValidateConfig {
        /// Configuration file to validate
        config_file: Option<PathBuf>,
    },
}

#[derive(Copy, Clone, ValueEnum, PartialEq)]
enum OutputFormatArg {
    Human,
    Json,
}

impl From<OutputFormatArg> for OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Human => OutputFormat::Human,
            OutputFormatArg::Json => OutputFormat::Json,
        }
    }
}

fn main() {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    match run_command(cli) {
        Ok(exit_code) => process::exit(exit_code),
        Err(e) => {
            eprintln!("Error: {e:#}");
            process::exit(1);
        }
    }
}

fn run_command(cli: Cli) -> Result<i32> {
    match cli.command {
        Commands::Migrate {
            root,
            dry_run,
            format,
            show_skipped,
            anchor,
            prefix,
            extensions,
            exclude,
        } => run_migrate(
            cli.config,
            root,
            dry_run,
            format,
            show_skipped,
            anchor,
            prefix,
            extensions,
            exclude,
            !cli.no_color,
        ),
        Commands::Name { paths, anchor, prefix } => {
            run_name(cli.config, paths, anchor, prefix)
        }
        Commands::ValidateConfig { config_file } => {
            run_validate_config(config_file.or(cli.config))
        }
    }
}

/// Load config from an explicit path, a conventional file name, or defaults
fn load_config(config_path: Option<PathBuf>) -> MigrateResult<MigratorConfig> {
    if let Some(config_path) = config_path {
        return MigratorConfig::load_from_file(config_path);
    }

    let default_configs =
        ["include_guardian.yaml", "include_guardian.yml", ".include_guardian.yaml"];
    for config_name in &default_configs {
        if Path::new(config_name).exists() {
            return MigratorConfig::load_from_file(config_name);
        }
    }

    Ok(MigratorConfig::default())
}

/// Fold CLI overrides into a loaded configuration
fn apply_overrides(
    config: MigratorConfig,
    anchor: Option<String>,
    prefix: Option<String>,
    extensions: Vec<String>,
    exclude: Vec<String>,
) -> MigrateResult<MigratorConfig> {
    let mut builder = ConfigBuilder::from_config(config);

    if let Some(anchor) = anchor {
        builder = builder.anchor(anchor);
    }
    if let Some(prefix) = prefix {
        builder = builder.prefix(prefix);
    }
    if !extensions.is_empty() {
        builder = builder.extensions(extensions);
    }
    for pattern in exclude {
        builder = builder.add_exclude(pattern);
    }

    builder.build()
}

#[allow(clippy::too_many_arguments)]
fn run_migrate(
    config_path: Option<PathBuf>,
    root: Option<PathBuf>,
    dry_run: bool,
    format: OutputFormatArg,
    show_skipped: bool,
    anchor: Option<String>,
    prefix: Option<String>,
    extensions: Vec<String>,
    exclude: Vec<String>,
    use_colors: bool,
) -> Result<i32> {
    let config = load_config(config_path)?;
    let config = apply_overrides(config, anchor, prefix, extensions, exclude)?;

    let formatter = ReportFormatter::new(ReportOptions { use_colors, show_skipped });
    let migrator = GuardMigrator::new_with_config(config)?.with_report_formatter(formatter);

    let root = root.unwrap_or_else(|| PathBuf::from("."));
    let report = migrator.migrate_tree(&root, &MigrateOptions { dry_run })?;

    let formatted = migrator.format_report(&report, format.into())?;
    println!("{formatted}");

    // Per-file failures do not abort the run, but they do fail it.
    if report.has_failures() {
        Ok(1)
    } else {
        Ok(0)
    }
}

fn run_name(
    config_path: Option<PathBuf>,
    paths: Vec<PathBuf>,
    anchor: Option<String>,
    prefix: Option<String>,
) -> Result<i32> {
    let config = load_config(config_path)?;
    let config = apply_overrides(config, anchor, prefix, Vec::new(), Vec::new())?;
    let migrator = GuardMigrator::new_with_config(config)?;

    for path in &paths {
        println!("{}\t{}", path.display(), migrator.derive_guard_name(path));
    }

    Ok(0)
}

fn run_validate_config(config_path: Option<PathBuf>) -> Result<i32> {
    let config_path = config_path.unwrap_or_else(|| PathBuf::from("include_guardian.yaml"));

    println!("Validating configuration: {}", config_path.display());

    match MigratorConfig::load_from_file(&config_path) {
        Ok(config) => {
            println!("Configuration is valid");
            println!("  Anchor: {}", config.naming.anchor);
            println!("  Prefix: {}", config.naming.prefix);
            println!("  Extensions: {}", config.files.extensions.join(", "));
            println!("  Exclude patterns: {}", config.files.exclude.len());
            Ok(0)
        }
        Err(e) => {
            eprintln!("Configuration validation failed: {e}");
            Ok(1)
        }
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose { tracing::Level::DEBUG } else { tracing::Level::WARN };

    tracing_subscriber::fmt().with_max_level(level).with_target(false).init();
}
