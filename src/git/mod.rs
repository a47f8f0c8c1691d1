//! git
//!
//! Single interface for all git operations.
//!
//! # Architecture
//!
//! This module is the only doorway to git. The store's git loader consumes
//! the [`ProvenanceSource`] trait, never `git2` directly, so it can be
//! driven by a scripted source in tests. [`GitProvenance`] is the
//! production implementation, backed by the `git2` crate (no shelling out
//! to the git CLI).
//!
//! # Responsibilities
//!
//! - Checkout discovery from the current directory
//! - Commit, branch, and remote URL queries
//! - Tag-based version description (`git describe` semantics)

mod provenance;

pub use provenance::{GitError, GitProvenance, ProvenanceSource};
