//! Conversion between ISO-8601 `PT#H#M#S` duration tokens, seconds, and
//! display strings.

use regex::Regex;
use std::sync::OnceLock;

static DURATION_RE: OnceLock<Regex> = OnceLock::new();

fn duration_re() -> &'static Regex {
    DURATION_RE.get_or_init(|| {
        Regex::new(r"^PT(?:([0-9]+)H)?(?:([0-9]+)M)?(?:([0-9]+)S)?").expect("valid duration pattern")
    })
}

/// Parse a `PT[nH][nM][nS]` token into seconds.
///
/// Components are optional but ordered. Anything that does not start with
/// `PT` yields 0.
pub fn parse_duration(encoded: &str) -> u64 {
    let Some(caps) = duration_re().captures(encoded) else {
        return 0;
    };

    // Digit runs too long for u64 saturate instead of failing
    let component = |idx: usize| -> u64 {
        caps.get(idx)
            .map(|m| m.as_str().parse::<u64>().unwrap_or(u64::MAX))
            .unwrap_or(0)
    };

    component(1)
        .saturating_mul(3600)
        .saturating_add(component(2).saturating_mul(60))
        .saturating_add(component(3))
}

/// Render seconds as `H:MM:SS`, or `M:SS` under an hour
pub fn format_duration(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;

    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, minutes, secs)
    } else {
        format!("{}:{:02}", minutes, secs)
    }
}
