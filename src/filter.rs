//! Include/exclude filter evaluation
//!
//! Each mapping may declare comma-separated include and exclude pattern
//! lists. Patterns are case-insensitive regular expressions searched against
//! the full path string (not anchored). Exclude rules win over include rules;
//! a non-empty include list accepts only matching files; with no rules at all
//! every file is accepted.

use std::path::Path;

use regex::{Regex, RegexBuilder};

use crate::error::{SitepushError, SitepushResult};

/// Compiled filter rules for one mapping.
#[derive(Debug, Clone)]
pub struct SyncFilter {
    include: Vec<Regex>,
    exclude: Vec<Regex>,
}

impl SyncFilter {
    /// Compile a filter from comma-separated pattern lists.
    ///
    /// Empty entries are dropped; an invalid pattern is an error naming the
    /// offending pattern.
    pub fn new(include: Option<&str>, exclude: Option<&str>) -> SitepushResult<Self> {
        Ok(Self {
            include: compile_list(include)?,
            exclude: compile_list(exclude)?,
        })
    }

    /// A filter with no rules (accepts everything).
    pub fn empty() -> Self {
        Self {
            include: Vec::new(),
            exclude: Vec::new(),
        }
    }

    /// Decide whether `path` participates in sync.
    pub fn should_sync(&self, path: &Path) -> bool {
        let candidate = path.to_string_lossy();

        if self.exclude.iter().any(|re| re.is_match(&candidate)) {
            return false;
        }
        if !self.include.is_empty() {
            return self.include.iter().any(|re| re.is_match(&candidate));
        }
        true
    }
}

fn compile_list(patterns: Option<&str>) -> SitepushResult<Vec<Regex>> {
    let Some(patterns) = patterns else {
        return Ok(Vec::new());
    };

    patterns
        .split(',')
        .filter(|p| !p.is_empty())
        .map(|p| {
            RegexBuilder::new(p)
                .case_insensitive(true)
                .build()
                .map_err(|e| SitepushError::Pattern {
                    pattern: p.to_string(),
                    message: e.to_string(),
                })
        })
        .collect()
}
