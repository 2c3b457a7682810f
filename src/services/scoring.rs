//! Component scoring functions.
//!
//! Each function maps one raw signal to a score in `[0, 1]`. They are pure and
//! independent of each other; weighting happens in the aggregator.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use crate::config::DurationRanges;
use crate::models::DurationPreference;

/// log10 of 10M views, the absolute scale used when a batch gives no reference
const ABSOLUTE_VIEW_LOG_SCALE: f64 = 7.0;

/// Recency score for timestamps that cannot be parsed
const UNKNOWN_RECENCY_SCORE: f64 = 0.5;

/// Views-per-like breakpoints and the score reached at each one.
/// Scores fall linearly between neighbours.
const LIKE_RATIO_CURVE: [(f64, f64); 4] = [(20.0, 1.0), (50.0, 0.8), (100.0, 0.5), (200.0, 0.2)];
const LIKE_RATIO_FLOOR: f64 = 0.1;

/// Earlier search positions score higher, reaching 0 at `total_searched`.
pub fn relevance_score(search_rank: u32, total_searched: u32) -> f64 {
    if search_rank >= total_searched {
        return 0.0;
    }
    1.0 - f64::from(search_rank) / f64::from(total_searched)
}

/// Scores engagement as views per like; fewer views per like is better.
///
/// A video without likes scores 0.
pub fn like_ratio_score(view_count: u64, like_count: u64) -> f64 {
    if like_count == 0 {
        return 0.0;
    }

    let ratio = view_count as f64 / like_count as f64;

    let (first_ratio, first_score) = LIKE_RATIO_CURVE[0];
    if ratio <= first_ratio {
        return first_score;
    }

    for window in LIKE_RATIO_CURVE.windows(2) {
        let (lo_ratio, lo_score) = window[0];
        let (hi_ratio, hi_score) = window[1];
        if ratio <= hi_ratio {
            let t = (ratio - lo_ratio) / (hi_ratio - lo_ratio);
            return lo_score - t * (lo_score - hi_score);
        }
    }

    let (last_ratio, last_score) = LIKE_RATIO_CURVE[LIKE_RATIO_CURVE.len() - 1];
    (last_score - (ratio - last_ratio) / 1000.0).max(LIKE_RATIO_FLOOR)
}

/// Log-scaled view count, normalized against the batch maximum.
///
/// `batch_max_views` is the largest view count in the current batch, `None`
/// for an empty batch. Without a usable maximum the score falls back to an
/// absolute scale where 10M views is 1.0.
pub fn view_score(view_count: u64, batch_max_views: Option<u64>) -> f64 {
    if view_count == 0 {
        return 0.0;
    }

    let log_views = (view_count as f64 + 1.0).log10();

    if let Some(max_views) = batch_max_views {
        let max_log = (max_views as f64 + 1.0).log10();
        if max_log > 0.0 {
            return (log_views / max_log).min(1.0);
        }
    }

    (log_views / ABSOLUTE_VIEW_LOG_SCALE).min(1.0)
}

/// Freshness of a video published at `published_at`, relative to now.
pub fn recency_score(published_at: &str) -> f64 {
    recency_score_at(published_at, Utc::now())
}

/// Freshness of a video relative to `now`.
///
/// Unparseable timestamps score a neutral 0.5.
pub fn recency_score_at(published_at: &str, now: DateTime<Utc>) -> f64 {
    let Some(published) = parse_timestamp(published_at) else {
        return UNKNOWN_RECENCY_SCORE;
    };

    let days = (now - published).num_days() as f64;

    if days <= 30.0 {
        1.0
    } else if days <= 90.0 {
        0.9 - (days - 30.0) / 600.0
    } else if days <= 365.0 {
        0.7 - (days - 90.0) / 1100.0
    } else if days <= 730.0 {
        0.4 - (days - 365.0) / 1825.0
    } else {
        (0.2 - (days - 730.0) / 3650.0).max(0.1)
    }
}

/// Accepts RFC 3339 timestamps; offset-less timestamps and bare dates are read as UTC.
fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// How well a video's length fits the requested duration bucket.
pub fn duration_match_score(
    duration_seconds: u64,
    preference: DurationPreference,
    ranges: &DurationRanges,
) -> f64 {
    let minutes = duration_seconds as f64 / 60.0;

    match preference {
        DurationPreference::Any => 1.0,
        DurationPreference::Short => {
            let max = ranges.short.max_minutes;
            if minutes <= max {
                1.0
            } else if minutes <= max * 2.0 {
                0.5
            } else {
                0.2
            }
        }
        DurationPreference::Medium => {
            let min = ranges.medium.min_minutes;
            let max = ranges.medium.max_minutes;
            if (min..=max).contains(&minutes) {
                1.0
            } else if minutes < min {
                0.7
            } else if minutes <= max * 1.5 {
                0.6
            } else {
                0.3
            }
        }
        DurationPreference::Long => {
            let min = ranges.long.min_minutes;
            if minutes >= min {
                1.0
            } else if minutes >= min * 0.5 {
                0.6
            } else {
                0.3
            }
        }
    }
}
