//! The "current instant" sentinel for `Edm.DateTime` literals.

use std::borrow::Cow;

use tracing::trace;

use crate::Clock;

/// Literal meaning "the instant this document was parsed".
pub const SENTINEL: &str = "SYSUTCDATETIME()";

/// Whether `literal` is exactly the sentinel.
pub fn is_sentinel(literal: &str) -> bool {
    literal == SENTINEL
}

/// Replace the sentinel with `/Date(<millis>)/` for the clock's current
/// instant, truncated to milliseconds. Any other literal is returned
/// unchanged.
pub fn expand<'a>(literal: &'a str, clock: &dyn Clock) -> Cow<'a, str> {
    if !is_sentinel(literal) {
        return Cow::Borrowed(literal);
    }
    let millis = clock.now().timestamp_millis();
    trace!(millis, "expanded sentinel");
    Cow::Owned(date_literal(millis))
}

/// The `/Date(<millis>)/` form of an instant.
pub fn date_literal(millis: i64) -> String {
    format!("/Date({millis})/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FixedClock;
    use chrono::{TimeZone, Utc};
    use facet_testhelpers::test;

    #[test]
    fn test_expand_sentinel() {
        let clock = FixedClock::from_millis(1_700_000_000_123).unwrap();
        assert_eq!(expand(SENTINEL, &clock), "/Date(1700000000123)/");
    }

    #[test]
    fn test_other_literals_pass_through() {
        let clock = FixedClock::from_millis(0).unwrap();
        for literal in ["/Date(5)/", "sysutcdatetime()", "SYSUTCDATETIME", ""] {
            assert!(matches!(expand(literal, &clock), Cow::Borrowed(s) if s == literal));
        }
    }

    #[test]
    fn test_sub_millisecond_instants_truncate() {
        let at = Utc.timestamp_opt(1_700_000_000, 123_999_999).unwrap();
        assert_eq!(expand(SENTINEL, &FixedClock(at)), "/Date(1700000000123)/");

        let before_epoch = Utc.timestamp_opt(-1, 999_500_000).unwrap();
        assert_eq!(expand(SENTINEL, &FixedClock(before_epoch)), "/Date(-1)/");
    }

    #[test]
    fn test_pre_epoch_instant() {
        let clock = FixedClock::from_millis(-86_400_000).unwrap();
        assert_eq!(expand(SENTINEL, &clock), "/Date(-86400000)/");
    }
}
