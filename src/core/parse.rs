//! core::parse
//!
//! Permissive parsing for version strings and build timestamps.
//!
//! # Design
//!
//! Parsing here never fails. Version strings that do not look like
//! `X.Y.Z` produce all-zero numeric fields with the raw input preserved;
//! unparseable timestamps produce `None`. The store and loaders rely on
//! this leniency: malformed input degrades silently instead of erroring.
//!
//! # Version grammar
//!
//! The accepted shape is `[v]MAJOR.MINOR.PATCH[-SUFFIX]`:
//!
//! - Exactly one leading `v` is stripped before numeric parsing (the raw
//!   string keeps it).
//! - The string is split on the *first* `-`; everything after it is the
//!   suffix, further dashes and dots included.
//! - The head must have at least three dot-separated parts for any field
//!   to be populated; extra parts beyond the third are ignored. With fewer
//!   than three parts the numeric fields stay zero and the suffix is
//!   dropped as well.
//! - Non-numeric parts parse as zero via [`int_or_zero`].

use chrono::{DateTime, NaiveDateTime, Utc};

use crate::core::types::Version;

/// Parse a string as a non-negative integer, yielding 0 on any failure.
///
/// This is the only numeric parsing used for version fields. Empty
/// strings, non-numeric text, negative numbers, and overflow all map to 0;
/// the failure is deliberately not observable.
pub fn int_or_zero(s: &str) -> u32 {
    s.parse().unwrap_or(0)
}

/// Parse a free-form version string into a [`Version`] record.
///
/// The returned record's `raw` field holds `input` verbatim, whatever the
/// parse outcome. See the module docs for the grammar.
///
/// ```
/// use buildstamp::core::parse::parse_version;
///
/// let ver = parse_version("v1.0.0-beta.1");
/// assert_eq!(ver.raw, "v1.0.0-beta.1");
/// assert_eq!((ver.major, ver.minor, ver.patch), (1, 0, 0));
/// assert_eq!(ver.prefix, "beta.1");
/// ```
pub fn parse_version(input: &str) -> Version {
    let mut ver = Version {
        raw: input.to_string(),
        ..Default::default()
    };

    // Strip one 'v' prefix for parsing only.
    let stripped = input.strip_prefix('v').unwrap_or(input);

    // Split base version from suffix on the first '-'.
    // Handles forms like 1.2.3, 1.2.3-dev, 1.2.3-dev.100, 1.2.3-rc-1.
    let (base, suffix) = match stripped.split_once('-') {
        Some((base, suffix)) => (base, Some(suffix)),
        None => (stripped, None),
    };

    let parts: Vec<&str> = base.split('.').collect();
    if parts.len() >= 3 {
        ver.major = int_or_zero(parts[0]);
        ver.minor = int_or_zero(parts[1]);
        ver.patch = int_or_zero(parts[2]);
        if let Some(suffix) = suffix {
            ver.prefix = suffix.to_string();
        }
    }

    ver
}

/// Parse a timestamp in the textual format of `date(1)` output, e.g.
/// `Mon Jan  2 15:04:05 UTC 2006`.
///
/// Returns `None` for anything that does not fit. The zone token is
/// accepted but not interpreted; the time is taken as UTC.
pub fn parse_unix_date(s: &str) -> Option<DateTime<Utc>> {
    // Tokenizing first absorbs the double space before single-digit days.
    let tokens: Vec<&str> = s.split_whitespace().collect();
    let &[_, month, day, time, _zone, year] = tokens.as_slice() else {
        return None;
    };

    let rebuilt = format!("{month} {day} {time} {year}");
    NaiveDateTime::parse_from_str(&rebuilt, "%b %d %H:%M:%S %Y")
        .ok()
        .map(|naive| naive.and_utc())
}
