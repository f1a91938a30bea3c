//! Core domain models for guard migration
//!
//! Architecture: Rich Domain Models - Outcomes are entities with behavior, not just data
//! - Decisions classify themselves and know whether they mutated anything
//! - MigrationReport acts as an aggregate root managing per-file outcomes

pub mod outcome;

pub use outcome::{
    FileOutcome, GuardDecision, MigrateError, MigrateResult, MigrationReport, MigrationSummary,
    OutcomeCounts,
};
