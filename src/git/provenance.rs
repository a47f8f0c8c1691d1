//! git::provenance
//!
//! Provenance queries against a git checkout, implemented with git2.
//!
//! The [`ProvenanceSource`] trait models each query the store's git loader
//! needs as an independent text-or-failure operation: current commit,
//! current branch, origin URL, and a tag-based descriptive version string.
//! A failure in one query never implies anything about the others; the
//! loader attempts each independently and swallows per-query failures.
//!
//! # Error Handling
//!
//! - [`GitError::NotARepo`]: the starting path is not inside a checkout.
//!   This is the only error the loader surfaces to callers.
//! - [`GitError::Query`]: an individual query failed (no HEAD yet, no
//!   origin remote, no tags, ...). Always swallowed by the loader.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors from provenance queries.
#[derive(Debug, Error)]
pub enum GitError {
    /// Not inside a git repository.
    #[error("not a git repository: {path}")]
    NotARepo {
        /// The path discovery started from
        path: PathBuf,
    },

    /// An individual provenance query failed.
    #[error("git query failed: {message}")]
    Query {
        /// The underlying git error message
        message: String,
    },
}

/// An injectable source of git provenance data.
///
/// The store's git loader is written against this trait so it can be
/// exercised without a real checkout. Each method is an independent query
/// returning text or failing; results are not trimmed here (the loader
/// trims before storing).
pub trait ProvenanceSource {
    /// The current commit identifier (HEAD).
    fn commit(&self) -> Result<String, GitError>;

    /// The current branch name ("HEAD" when detached).
    fn branch(&self) -> Result<String, GitError>;

    /// The URL of the `origin` remote.
    fn remote_url(&self) -> Result<String, GitError>;

    /// A descriptive tag-based version string, falling back to the commit
    /// id when no tag is reachable (the `git describe --tags --always`
    /// behavior).
    fn describe(&self) -> Result<String, GitError>;
}

/// Production [`ProvenanceSource`] backed by a real repository via git2.
pub struct GitProvenance {
    repo: git2::Repository,
}

impl std::fmt::Debug for GitProvenance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitProvenance").finish_non_exhaustive()
    }
}

impl GitProvenance {
    /// Discover the repository containing `path`, walking up parent
    /// directories the way git itself does.
    ///
    /// # Errors
    ///
    /// Returns [`GitError::NotARepo`] if no repository is found.
    pub fn discover(path: &Path) -> Result<Self, GitError> {
        let repo = git2::Repository::discover(path).map_err(|_| GitError::NotARepo {
            path: path.to_path_buf(),
        })?;
        Ok(Self { repo })
    }

    fn query(err: git2::Error) -> GitError {
        GitError::Query {
            message: err.message().to_string(),
        }
    }
}

impl ProvenanceSource for GitProvenance {
    fn commit(&self) -> Result<String, GitError> {
        let head = self.repo.head().map_err(Self::query)?;
        let commit = head.peel_to_commit().map_err(Self::query)?;
        Ok(commit.id().to_string())
    }

    fn branch(&self) -> Result<String, GitError> {
        let head = self.repo.head().map_err(Self::query)?;
        Ok(head.shorthand().unwrap_or("HEAD").to_string())
    }

    fn remote_url(&self) -> Result<String, GitError> {
        let remote = self.repo.find_remote("origin").map_err(Self::query)?;
        remote
            .url()
            .map(str::to_string)
            .ok_or_else(|| GitError::Query {
                message: "remote 'origin' URL is not valid UTF-8".to_string(),
            })
    }

    fn describe(&self) -> Result<String, GitError> {
        let mut opts = git2::DescribeOptions::new();
        opts.describe_tags().show_commit_oid_as_fallback(true);
        let description = self.repo.describe(&opts).map_err(Self::query)?;
        description.format(None).map_err(Self::query)
    }
}
