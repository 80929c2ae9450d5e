//! Checking literals against schema format rules.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use edm_schema::{FormatRule, ScalarKind};
use regex::Regex;
use tracing::debug;

/// Validates a literal against a [`FormatRule`].
///
/// Runs after the kind's own validation, so implementations only see
/// literals that are already well-formed for `kind`.
pub trait FormatCheck: Send + Sync {
    /// Whether `literal` satisfies `rule`.
    fn check(&self, rule: &FormatRule, kind: &ScalarKind, literal: &str) -> bool;
}

/// The default [`FormatCheck`].
///
/// Regex rules must match the whole literal. Token sets need at least one
/// space-separated token, each allowed and none repeated. Named rules are
/// looked up among the patterns registered with
/// [`named`](StandardFormats::named); unknown names never match.
#[derive(Debug, Default)]
pub struct StandardFormats {
    named: HashMap<String, String>,
    /// Compiled patterns. `None` marks a pattern that failed to compile.
    cache: Mutex<HashMap<String, Option<Regex>>>,
}

impl StandardFormats {
    /// Create a checker with no named rules.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a named rule as a regular expression.
    pub fn named(mut self, name: impl Into<String>, pattern: impl Into<String>) -> Self {
        self.named.insert(name.into(), pattern.into());
        self
    }

    fn matches(&self, pattern: &str, literal: &str) -> bool {
        let mut cache = self
            .cache
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let compiled = cache.entry(pattern.to_string()).or_insert_with(|| {
            match Regex::new(&format!("^(?:{pattern})$")) {
                Ok(regex) => Some(regex),
                Err(error) => {
                    debug!(pattern, %error, "format pattern does not compile");
                    None
                }
            }
        });
        compiled.as_ref().is_some_and(|regex| regex.is_match(literal))
    }
}

impl FormatCheck for StandardFormats {
    fn check(&self, rule: &FormatRule, _kind: &ScalarKind, literal: &str) -> bool {
        match rule {
            FormatRule::Regex(pattern) => self.matches(pattern, literal),
            FormatRule::TokenSet(allowed) => check_token_set(allowed, literal),
            FormatRule::Named(name) => match self.named.get(name) {
                Some(pattern) => self.matches(pattern, literal),
                None => {
                    debug!(rule = %name, "unknown format rule");
                    false
                }
            },
        }
    }
}

fn check_token_set(allowed: &[String], literal: &str) -> bool {
    let mut seen = HashSet::new();
    let mut tokens = literal.split(' ').peekable();
    if tokens.peek().is_none_or(|first| first.is_empty()) {
        return false;
    }
    tokens.all(|token| allowed.iter().any(|a| a == token) && seen.insert(token))
}
