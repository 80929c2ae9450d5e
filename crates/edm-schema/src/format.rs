//! Format rules attached to scalar declarations.

use std::fmt;
use std::str::FromStr;

const REGEX_PREFIX: &str = "regEx";
const TOKEN_SET_PREFIX: &str = "unordered-set-of-unique-space-separated-tokens";

/// An additional constraint on a scalar literal, beyond its kind.
///
/// Written in schema documents as `regEx('^[a-z]+$')`,
/// `unordered-set-of-unique-space-separated-tokens('basic', 'oidc')`, or a
/// bare rule name such as `uri`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FormatRule {
    /// The literal must match this regular expression.
    Regex(String),
    /// The literal is one or more space-separated tokens, each from this
    /// set, none repeated.
    TokenSet(Vec<String>),
    /// A rule known only by name; checked by whoever supplies the format
    /// capability.
    Named(String),
}

impl FormatRule {
    /// Shorthand for `FormatRule::Regex`.
    pub fn regex(pattern: impl Into<String>) -> Self {
        FormatRule::Regex(pattern.into())
    }

    /// Shorthand for `FormatRule::TokenSet`.
    pub fn token_set<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        FormatRule::TokenSet(tokens.into_iter().map(Into::into).collect())
    }
}

impl FromStr for FormatRule {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Some(args) = call_args(s, REGEX_PREFIX) {
            let pattern = unquote(args.trim())
                .ok_or_else(|| format!("regEx rule needs one quoted pattern: {s}"))?;
            return Ok(FormatRule::Regex(pattern.to_string()));
        }
        if let Some(args) = call_args(s, TOKEN_SET_PREFIX) {
            let tokens = args
                .split(',')
                .map(|token| {
                    unquote(token.trim())
                        .map(str::to_string)
                        .ok_or_else(|| format!("token set entries must be quoted: {s}"))
                })
                .collect::<Result<Vec<_>, _>>()?;
            return Ok(FormatRule::TokenSet(tokens));
        }
        if s.is_empty() || s.contains(['(', ')']) {
            return Err(format!("malformed format rule '{s}'"));
        }
        Ok(FormatRule::Named(s.to_string()))
    }
}

impl fmt::Display for FormatRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatRule::Regex(pattern) => write!(f, "{REGEX_PREFIX}('{pattern}')"),
            FormatRule::TokenSet(tokens) => {
                write!(f, "{TOKEN_SET_PREFIX}(")?;
                for (i, token) in tokens.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "'{token}'")?;
                }
                f.write_str(")")
            }
            FormatRule::Named(name) => f.write_str(name),
        }
    }
}

/// The text between `name(` and the final `)`.
fn call_args<'a>(s: &'a str, name: &str) -> Option<&'a str> {
    s.strip_prefix(name)?.strip_prefix('(')?.strip_suffix(')')
}

fn unquote(s: &str) -> Option<&str> {
    s.strip_prefix('\'')?.strip_suffix('\'')
}
