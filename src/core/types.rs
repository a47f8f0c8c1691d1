//! core::types
//!
//! The four metadata records buildstamp tracks for a running program.
//!
//! # Types
//!
//! - [`AppInfo`] - Application name, description, and changelog
//! - [`Version`] - Raw version string plus parsed numeric fields
//! - [`GitInfo`] - Git provenance (commit, branch, remote repo)
//! - [`BuildInfo`] - Build timestamp, embedding [`GitInfo`]
//!
//! All records are plain data: public fields, `Default` as the empty/unset
//! state, and `Display` implementations that produce the human-readable
//! renderings used by [`crate::store::print`]. The populate-once policy
//! lives in the store, not here; these types never reject a value.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Application name, description, and changelog.
///
/// `name` and `description` are set together and treated as one field
/// group by the store; `changelog` is populated independently.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppInfo {
    /// Application name.
    pub name: String,
    /// Application description.
    pub description: String,
    /// Changelog for this build (arbitrary text).
    pub changelog: String,
}

impl fmt::Display for AppInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: \n\t {}", self.name, self.description)
    }
}

/// Git provenance for the build: where it came from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GitInfo {
    /// Commit identifier (full SHA as reported by the source).
    pub commit: String,
    /// Branch name.
    pub branch: String,
    /// Remote repository URL.
    pub repo: String,
}

impl fmt::Display for GitInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Repo: {}, Branch: {}, Commit: {}",
            self.repo, self.branch, self.commit
        )
    }
}

/// Build timestamp and git provenance.
///
/// `timestamp` is `None` until a source supplies a parseable value in the
/// `date(1)` textual format (see [`crate::core::parse::parse_unix_date`]).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildInfo {
    /// When the build happened, if known.
    pub timestamp: Option<DateTime<Utc>>,
    /// Git provenance for the build.
    pub git: GitInfo,
}

impl fmt::Display for BuildInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.timestamp {
            Some(ts) => write!(f, "Timestamp : {}, Git: {}", ts, self.git),
            None => write!(f, "Timestamp : unset, Git: {}", self.git),
        }
    }
}

/// Application version: the raw input string plus fields derived from it.
///
/// `raw` always holds the exact string last passed to the version setter,
/// unmodified. The derived fields come from the permissive parser in
/// [`crate::core::parse`] and may legitimately all be zero for a non-empty
/// `raw` when the string does not look like `X.Y.Z`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Version {
    /// Original input string, preserved verbatim.
    pub raw: String,
    /// Free-form suffix label (e.g. "beta.1" or "dev"), empty if none.
    pub prefix: String,
    /// Major version part.
    pub major: u32,
    /// Minor version part.
    pub minor: u32,
    /// Patch version part.
    pub patch: u32,
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // The leading space when prefix is empty is part of the format.
        write!(
            f,
            "{} {}.{}.{}",
            self.prefix, self.major, self.minor, self.patch
        )
    }
}
