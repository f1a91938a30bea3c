//! Deterministic guard-name derivation from header file paths
//!
//! Architecture: Domain Services - GuardNamer encapsulates the naming scheme
//! - Anchor resolution is an injectable capability, not a hardcoded path split
//! - Derivation is a pure function of the path; identical inputs yield identical names

use std::path::Path;

/// Resolves the portion of a path used as the key for guard naming.
///
/// Implementations decide how much of the path participates in the name.
/// Returning `None` makes the namer fall back to the file's base name.
pub trait AnchorResolver: Send + Sync {
    /// Extract the relative key for a path, if this resolver applies to it
    fn relative_key(&self, path: &Path) -> Option<String>;
}

/// Anchors naming at the first occurrence of a fixed directory segment.
///
/// For a path like `.../mods/gfx/shader.hpp` with segment `mods`, the
/// relative key is `gfx/shader.hpp`, so files keep their subtree-relative
/// identity in the guard name.
#[derive(Debug, Clone)]
pub struct SegmentAnchor {
    segment: String,
}

impl SegmentAnchor {
    pub fn new(segment: impl Into<String>) -> Self {
        Self { segment: segment.into() }
    }
}

impl AnchorResolver for SegmentAnchor {
    fn relative_key(&self, path: &Path) -> Option<String> {
        let normalized = path.to_string_lossy().replace('\\', "/");
        let marker = format!("/{}/", self.segment);

        normalized
            .find(&marker)
            .map(|idx| normalized[idx + marker.len()..].to_string())
            .filter(|key| !key.is_empty())
    }
}

/// Derives preprocessor-identifier-safe guard names from file paths
pub struct GuardNamer {
    prefix: String,
    anchor: Box<dyn AnchorResolver>,
}

impl GuardNamer {
    /// Create a namer with the given namespace prefix and anchor resolver
    pub fn new(prefix: impl Into<String>, anchor: Box<dyn AnchorResolver>) -> Self {
        Self { prefix: prefix.into(), anchor }
    }

    /// Create a namer anchored at a fixed directory segment
    pub fn with_segment(prefix: impl Into<String>, segment: impl Into<String>) -> Self {
        Self::new(prefix, Box::new(SegmentAnchor::new(segment)))
    }

    /// Derive the guard name for a header file path.
    ///
    /// The relative key comes from the anchor resolver when it applies;
    /// otherwise the base name is used. Files sharing a base name outside the
    /// anchored subtree therefore collide - a known limitation of the scheme.
    pub fn derive_guard_name(&self, path: &Path) -> String {
        let key = self.anchor.relative_key(path).unwrap_or_else(|| {
            path.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default()
        });

        format!("{}{}", self.prefix, identifier_from_key(&key))
    }
}

/// Map a relative key to an uppercase identifier containing only `[A-Z0-9_]`.
///
/// Path separators and dots become underscores, as does any other byte that
/// is not ASCII alphanumeric.
fn identifier_from_key(key: &str) -> String {
    key.chars()
        .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_uppercase() } else { '_' })
        .collect()
}
