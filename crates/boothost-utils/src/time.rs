//!
//! Wall-clock helpers for log prefixes.
//!

use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Time since the unix epoch; zero if the clock is set before 1970.
#[must_use]
pub fn since_epoch() -> Duration {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or(Duration::ZERO)
}

/// Render a duration since the epoch as `seconds.millis`, the prefix used by
/// file log lines.
#[must_use]
pub fn format_timestamp(since_epoch: Duration) -> String {
    format!(
        "{}.{:03}",
        since_epoch.as_secs(),
        since_epoch.subsec_millis()
    )
}

/// Current wall-clock timestamp formatted by [`format_timestamp`].
#[must_use]
pub fn timestamp() -> String {
    format_timestamp(since_epoch())
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_millis_with_padding() {
        assert_eq!(format_timestamp(Duration::from_millis(12_005)), "12.005");
        assert_eq!(format_timestamp(Duration::ZERO), "0.000");
    }
}
