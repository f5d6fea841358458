//! Field-level checks used by the submission schema.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use url::Url;

const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

// `%z` accepts offsets with or without the colon
const OFFSET_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%dT%H:%M:%S%z",
    "%Y-%m-%dT%H:%M%z",
    "%Y-%m-%d %H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M:%S%z",
    "%Y-%m-%d %H:%M%z",
];

/// Index of the first byte after `YYYY-MM-DDTHH`.
const HOUR_END: usize = 13;

/// Whether `value` is an ISO-8601 date or date-time.
///
/// A trailing `Z` is treated as `+00:00`. Naive date-times, hour-only times
/// (`2026-01-06T16`) and bare dates are accepted as well.
pub fn is_iso8601(value: &str) -> bool {
    let value = match value.strip_suffix('Z') {
        Some(rest) => format!("{}+00:00", rest),
        None => value.to_string(),
    };

    parses_as_datetime(&value)
        || with_minutes(&value).map_or(false, |v| parses_as_datetime(&v))
        || NaiveDate::parse_from_str(&value, "%Y-%m-%d").is_ok()
}

fn parses_as_datetime(value: &str) -> bool {
    DateTime::parse_from_rfc3339(value).is_ok()
        || OFFSET_DATETIME_FORMATS
            .iter()
            .any(|fmt| DateTime::parse_from_str(value, fmt).is_ok())
        || NAIVE_DATETIME_FORMATS
            .iter()
            .any(|fmt| NaiveDateTime::parse_from_str(value, fmt).is_ok())
}

/// Expand an hour-only time (`...T16`, `...T16+05:00`) to `...T16:00`.
fn with_minutes(value: &str) -> Option<String> {
    let bytes = value.as_bytes();
    let hour_only = bytes.len() >= HOUR_END
        && matches!(bytes[10], b'T' | b' ')
        && bytes[11..HOUR_END].iter().all(u8::is_ascii_digit)
        && bytes.get(HOUR_END).map_or(true, |b| matches!(b, b'+' | b'-'));
    if !hour_only {
        return None;
    }

    let mut expanded = value.to_string();
    expanded.insert_str(HOUR_END, ":00");
    Some(expanded)
}

/// Characters allowed in a dot-atom local part besides alphanumerics.
const ATEXT_SPECIALS: &str = "!#$%&'*+/=?^_`{|}~-";

const MAX_EMAIL_LEN: usize = 254;
const MAX_LOCAL_LEN: usize = 64;
const MAX_DOMAIN_LEN: usize = 253;

/// Syntactic e-mail check: a dot-atom local part, `@`, and a dotted,
/// DNS-shaped domain.
pub fn is_email(value: &str) -> bool {
    if value.chars().count() > MAX_EMAIL_LEN {
        return false;
    }

    let (local, domain) = match value.split_once('@') {
        Some(parts) => parts,
        None => return false,
    };

    let local_ok = local.chars().count() <= MAX_LOCAL_LEN
        && local.split('.').all(|atom| {
            !atom.is_empty()
                && atom
                    .chars()
                    .all(|c| c.is_alphanumeric() || ATEXT_SPECIALS.contains(c))
        });
    if !local_ok || domain.chars().count() > MAX_DOMAIN_LEN {
        return false;
    }

    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 {
        return false;
    }

    labels.iter().all(|label| {
        !label.is_empty()
            && label.len() <= 63
            && !label.starts_with('-')
            && !label.ends_with('-')
            && label.chars().all(|c| c.is_alphanumeric() || c == '-')
    })
}

/// Whether `value` is an absolute `http`/`https` URL with a host.
pub fn is_http_url(value: &str) -> bool {
    match Url::parse(value) {
        Ok(url) => {
            matches!(url.scheme(), "http" | "https")
                && url.host_str().map_or(false, |host| !host.is_empty())
        }
        Err(_) => false,
    }
}
