//! Relative timestamps for list subtitles

use chrono::{DateTime, Utc};

/// Formats an RFC 3339 timestamp relative to `now`, e.g. "3h ago".
/// Returns `None` when the string does not parse; callers drop the time
/// part of their subtitle in that case.
pub fn humanize_at(timestamp: &str, now: DateTime<Utc>) -> Option<String> {
    let parsed = match DateTime::parse_from_rfc3339(timestamp) {
        Ok(parsed) => parsed.with_timezone(&Utc),
        Err(err) => {
            log::debug!("unparseable timestamp {:?}: {}", timestamp, err);
            return None;
        }
    };

    let elapsed = now.signed_duration_since(parsed);
    let minutes = elapsed.num_minutes();
    let formatted = if minutes < 1 {
        // negative elapsed (clock skew) lands here too
        "just now".to_string()
    } else if minutes < 60 {
        format!("{minutes}m ago")
    } else if elapsed.num_hours() < 24 {
        format!("{}h ago", elapsed.num_hours())
    } else {
        format!("{}d ago", elapsed.num_days())
    };
    Some(formatted)
}
