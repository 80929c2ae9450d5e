#![doc = include_str!("../README.md")]
//! Typed value tree produced by schema-driven complex object parsing.
//!
//! A parsed object is a [`Complex`] holding only the properties that were
//! present in input, each with a [`Value`] typed by its declaration. Values
//! can be read directly or by path (`address.city`, `tags[1]`).

mod value;

pub use edm_schema::{ScalarKind, ValueKind};
pub use value::{Collection, Complex, Property, Scalar, Value};

fn split_path(path: &str) -> (&str, &str) {
    if path.starts_with('[')
        && let Some(end) = path.find(']')
    {
        let segment = &path[..=end];
        let rest = &path[end + 1..];
        let rest = rest.strip_prefix('.').unwrap_or(rest);
        return (segment, rest);
    }

    let dot_pos = path.find('.');
    let bracket_pos = path.find('[');

    match (dot_pos, bracket_pos) {
        (Some(d), Some(b)) if b < d => (&path[..b], &path[b..]),
        (Some(d), _) => (&path[..d], &path[d + 1..]),
        (None, Some(b)) => (&path[..b], &path[b..]),
        (None, None) => (path, ""),
    }
}
