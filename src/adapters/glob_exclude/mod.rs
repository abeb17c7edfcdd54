// Glob exclude adapter - Directory pruning patterns

use std::path::Path;

use globset::{Glob, GlobBuilder, GlobSet, GlobSetBuilder};
use tracing::debug;

use crate::domain::errors::DomainError;
use crate::ports::ExcludePort;

/// Matches candidate paths against `--exclude` glob patterns
///
/// Patterns follow shell `fnmatch` rules without `FNM_PATHNAME`: `*` and
/// `?` also match `/`, and a backslash escapes the next character.
#[derive(Debug, Clone)]
pub struct GlobExcludeAdapter {
    patterns: Vec<String>,
    set: GlobSet,
}

impl GlobExcludeAdapter {
    /// Compile user patterns; empty or malformed patterns are rejected
    pub fn new<I, S>(patterns: I) -> Result<Self, DomainError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let patterns: Vec<String> = patterns.into_iter().map(Into::into).collect();

        let mut builder = GlobSetBuilder::new();
        for pattern in &patterns {
            builder.add(Self::compile(pattern)?);
        }
        let set = builder.build().map_err(|e| DomainError::InvalidPattern {
            pattern: patterns.join(" "),
            reason: e.kind().to_string(),
        })?;

        Ok(Self { patterns, set })
    }

    fn compile(pattern: &str) -> Result<Glob, DomainError> {
        if pattern.is_empty() {
            return Err(DomainError::InvalidPattern {
                pattern: String::new(),
                reason: "empty pattern".to_string(),
            });
        }

        GlobBuilder::new(pattern)
            .literal_separator(false)
            .backslash_escape(true)
            .build()
            .map_err(|e| DomainError::InvalidPattern {
                pattern: pattern.to_string(),
                reason: e.kind().to_string(),
            })
    }
}

impl ExcludePort for GlobExcludeAdapter {
    fn is_excluded(&self, path: &Path) -> bool {
        match self.set.matches(path).first() {
            Some(&index) => {
                debug!("Excluding {} (matches {:?})", path.display(), self.patterns[index]);
                true
            }
            None => false,
        }
    }
}
