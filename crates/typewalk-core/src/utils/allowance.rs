//! Comment-based allowance directives.
//!
//! Supports directives like:
//! ```text
//! // typewalk: allow(typedef) reason="generated bindings"
//! ```
//!
//! Only comments the host recorded on the [`SourceFile`] are read, so
//! directive-shaped text inside a string literal has no effect. A directive
//! applies to the line it is written on and to the line below.

use std::collections::{BTreeMap, HashSet};

use crate::source::SourceFile;

/// Result of checking for an allow directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AllowCheck {
    /// Rule is not allowed.
    Denied,
    /// Rule is allowed with optional reason.
    Allowed {
        /// The reason provided (if any).
        reason: Option<String>,
    },
}

impl AllowCheck {
    /// Returns true if allowed.
    #[must_use]
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allowed { .. })
    }

    /// Returns the reason if allowed.
    #[must_use]
    pub fn reason(&self) -> Option<&str> {
        match self {
            Self::Allowed { reason } => reason.as_deref(),
            Self::Denied => None,
        }
    }
}

/// Parsed allowance directive.
#[derive(Debug, Clone)]
struct AllowDirective {
    rules: HashSet<String>,
    reason: Option<String>,
}

impl AllowDirective {
    fn covers(&self, rule_name: &str) -> bool {
        self.rules.contains(rule_name) || self.rules.contains("all")
    }
}

/// Allow directives of one file, keyed by the zero-based line they are on.
#[derive(Debug, Clone, Default)]
pub struct AllowDirectives {
    by_line: BTreeMap<usize, AllowDirective>,
}

impl AllowDirectives {
    /// Collects the directives written in `file`'s comments.
    #[must_use]
    pub fn from_source(file: &SourceFile) -> Self {
        let mut by_line = BTreeMap::new();

        for range in file.comments() {
            let Some(comment) = file.text().get(range.start..range.end) else {
                continue;
            };
            if let Some(directive) = parse_allow_directive(comment) {
                by_line.insert(file.line_and_character(range.start).line, directive);
            }
        }

        Self { by_line }
    }

    /// Returns true if the file has no directives.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_line.is_empty()
    }

    /// Checks for a directive covering `rule_name` at zero-based `line`.
    ///
    /// Looks at the line itself (trailing comment) and the line before it.
    #[must_use]
    pub fn check(&self, line: usize, rule_name: &str) -> AllowCheck {
        let candidates = [line.checked_sub(1), Some(line)];
        for check_line in candidates.into_iter().flatten() {
            if let Some(directive) = self.by_line.get(&check_line) {
                if directive.covers(rule_name) {
                    return AllowCheck::Allowed {
                        reason: directive.reason.clone(),
                    };
                }
            }
        }

        AllowCheck::Denied
    }
}

/// Parses an allowance directive from the text of one `//` comment.
fn parse_allow_directive(comment: &str) -> Option<AllowDirective> {
    let comment_content = comment.strip_prefix("//")?.trim();

    let directive = comment_content.strip_prefix("typewalk:")?.trim();
    let allow_content = directive.strip_prefix("allow(")?.trim();

    let paren_end = allow_content.find(')')?;
    let rules: HashSet<String> = allow_content[..paren_end]
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();

    if rules.is_empty() {
        return None;
    }

    let rest = allow_content[paren_end + 1..].trim();
    let reason = rest
        .strip_prefix("reason=")
        .map(str::trim)
        .and_then(|r| r.strip_prefix('"'))
        .and_then(|r| r.find('"').map(|end| r[..end].to_string()));

    Some(AllowDirective { rules, reason })
}
