//! Parsing of the compact ISO-8601 durations returned in `contentDetails`.

use std::sync::LazyLock;

use regex::Regex;

static DURATION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^PT(?:(\d+)H)?(?:(\d+)M)?(?:(\d+)S)?$").expect("valid duration regex")
});

/// Converts a `PT[nH][nM][nS]` duration into whole seconds.
///
/// Returns `None` for empty or malformed input, for `"PT"` with no
/// components, and for values that overflow `u32`. There are no partial
/// results: either every present component parses or the call fails.
#[must_use]
pub fn parse_duration_seconds(raw: &str) -> Option<u32> {
    let caps = DURATION_RE.captures(raw)?;

    let component = |idx: usize| -> Option<Option<u32>> {
        match caps.get(idx) {
            Some(m) => m.as_str().parse::<u32>().ok().map(Some),
            None => Some(None),
        }
    };

    let hours = component(1)?;
    let minutes = component(2)?;
    let seconds = component(3)?;

    if hours.is_none() && minutes.is_none() && seconds.is_none() {
        return None;
    }

    hours
        .unwrap_or(0)
        .checked_mul(3600)?
        .checked_add(minutes.unwrap_or(0).checked_mul(60)?)?
        .checked_add(seconds.unwrap_or(0))
}
