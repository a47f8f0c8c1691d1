//! Buildstamp - build, version, and git metadata for running applications
//!
//! Buildstamp holds four records about the running program (application
//! identity, version, git provenance, build timestamp) and lets them be
//! populated from three independent sources: compile-time injected
//! constants, a key=value metadata file, or live inspection of a git
//! checkout.
//!
//! # Architecture
//!
//! - [`core`] - Domain types and the version-string parser
//! - [`git`] - Single interface for all git operations (provenance queries)
//! - [`store`] - The metadata store, its loaders, and the global handle
//!
//! # Population policy
//!
//! Every field is populate-once: the first source to write a non-empty
//! value wins, and later writers are silently ignored. This lets build-time
//! constants, a version file, and git detection coexist, with priority
//! given to whichever source runs first. The one exception is the version
//! setter itself, which always overwrites; the loaders gate it on the raw
//! version string still being empty.
//!
//! # Usage
//!
//! ```no_run
//! buildstamp::set_app_info("myapp", "My application");
//! buildstamp::load_from_build_env();
//! let _ = buildstamp::load_from_file(".version");
//! let _ = buildstamp::load_from_git();
//! buildstamp::print();
//! ```

pub mod core;
pub mod git;
pub mod store;

pub use crate::core::{AppInfo, BuildInfo, GitInfo, Version};
pub use crate::git::{GitError, GitProvenance, ProvenanceSource};
pub use crate::store::file::FileError;
pub use crate::store::{
    app, build, get, git_info, load_from_build_env, load_from_file, load_from_git, print, report,
    reset, set_app_info, set_build_info, set_changelog, set_changelog_from_file, set_git_info,
    set_version, MetadataStore,
};
