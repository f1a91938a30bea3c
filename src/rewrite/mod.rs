//! The pragma-once to include-guard content transform
//!
//! Architecture: Pure Domain Logic - the rewrite is a function from content and
//! guard name to an outcome; persistence belongs to the caller
//! - The ordered decision policy is a first-class contract, not implicit control flow
//! - Output always re-triggers the opener check, making the transform idempotent

use crate::domain::{MigrateError, MigrateResult};
use regex::Regex;

/// Matches the portable two-token guard opener anywhere in a file
const OPENER_PATTERN: &str = r"#ifndef\s+\w+";

/// Matches the legacy directive plus any trailing whitespace, newline included.
/// Consuming the newline keeps the inserted guard pair from leaving a blank
/// line where the directive used to be.
const PRAGMA_PATTERN: &str = r"#pragma\s+once\s*";

/// Literal used for the presence check; detection is deliberately simple
const PRAGMA_LITERAL: &str = "#pragma once";

/// Result of evaluating one file's content against the decision policy
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RewriteOutcome {
    /// The transform applied; carries the new content
    Rewritten(String),
    /// An `#ifndef` opener already exists; no mutation
    AlreadyGuarded,
    /// No legacy directive present; no mutation
    NoPragmaOnce,
}

/// Rewrites legacy `#pragma once` directives into guard pairs
pub struct GuardRewriter {
    opener: Regex,
    pragma: Regex,
}

impl GuardRewriter {
    /// Create a rewriter with compiled directive patterns
    pub fn new() -> MigrateResult<Self> {
        let opener = Regex::new(OPENER_PATTERN)
            .map_err(|e| MigrateError::config(format!("Invalid opener pattern: {e}")))?;
        let pragma = Regex::new(PRAGMA_PATTERN)
            .map_err(|e| MigrateError::config(format!("Invalid pragma pattern: {e}")))?;

        Ok(Self { opener, pragma })
    }

    /// Evaluate content against the ordered decision policy and, when it
    /// applies, perform the transform.
    ///
    /// Policy, first match wins:
    /// 1. An `#ifndef` opener anywhere means the file is already migrated or
    ///    hand-guarded - skip before looking at anything else.
    /// 2. No `#pragma once` means there is nothing to convert.
    /// 3. Otherwise replace the first directive occurrence with the guard
    ///    pair, normalize the tail, and append the `#endif` terminator.
    ///
    /// Only the first directive occurrence is converted; duplicates are a
    /// malformed input the transform leaves untouched.
    pub fn rewrite(&self, content: &str, guard_name: &str) -> RewriteOutcome {
        if self.opener.is_match(content) {
            return RewriteOutcome::AlreadyGuarded;
        }

        if !content.contains(PRAGMA_LITERAL) {
            return RewriteOutcome::NoPragmaOnce;
        }

        let opener_pair = format!("#ifndef {guard_name}\n#define {guard_name}\n");
        let mut rewritten =
            self.pragma.replace(content, regex::NoExpand(&opener_pair)).trim_end().to_string();

        // Exactly one newline at the end of the body, then the terminator.
        rewritten.push('\n');
        rewritten.push_str(&format!("\n#endif // {guard_name}\n"));

        RewriteOutcome::Rewritten(rewritten)
    }
}
