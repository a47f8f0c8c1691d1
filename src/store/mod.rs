//! store
//!
//! The metadata store: populate-once setters, loaders, and accessors.
//!
//! # Singleton
//!
//! The usual handle is the process-wide store behind the module-level
//! free functions ([`set_app_info`], [`load_from_file`], [`get`], ...).
//! It starts empty at process start and lives until process exit. Unlike
//! the typical instance-owned design, this is deliberate: version
//! metadata describes the process itself, and every part of the program
//! should see the same answer.
//!
//! [`MetadataStore`] is also directly constructible for hosts that want
//! an owned handle, and [`reset`] restores the global store to its
//! initial empty state for test isolation.
//!
//! # Concurrency
//!
//! The global store is guarded by a mutex, so concurrent population is
//! defined, if pointless; the intended usage is still populate early in
//! startup, read thereafter. A poisoned lock is recovered rather than
//! propagated.
//!
//! # Build-time injection
//!
//! Cargo's `rustc-env` mechanism stands in for linker flags: a build
//! script (or the environment driving the build) sets the
//! `BUILDSTAMP_*` variables below, and [`load_from_build_env`] applies
//! whichever were present when this crate compiled. There is no
//! life-before-main in Rust, so application is an explicit call.

pub mod file;

use std::path::Path;
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::core::parse::{parse_unix_date, parse_version};
use crate::core::types::{AppInfo, BuildInfo, GitInfo, Version};
use crate::git::{GitError, GitProvenance, ProvenanceSource};
use crate::store::file::FileError;

/// Version string injected at compile time, if any.
pub const VERSION_INFO: Option<&str> = option_env!("BUILDSTAMP_VERSION");
/// Git commit injected at compile time, if any.
pub const GIT_COMMIT: Option<&str> = option_env!("BUILDSTAMP_GIT_COMMIT");
/// Git branch injected at compile time, if any.
pub const GIT_BRANCH: Option<&str> = option_env!("BUILDSTAMP_GIT_BRANCH");
/// Git repository URL injected at compile time, if any.
pub const GIT_REPO: Option<&str> = option_env!("BUILDSTAMP_GIT_REPO");
/// Build timestamp injected at compile time, if any.
pub const BUILD_TIMESTAMP: Option<&str> = option_env!("BUILDSTAMP_BUILD_TIMESTAMP");

/// Holds the four metadata records and enforces the populate-once policy.
///
/// Every setter writes only while its target field group is still
/// empty/unset and silently ignores later calls. The exception is
/// [`set_version`](MetadataStore::set_version), which always overwrites;
/// the loaders gate it on the raw string being empty before calling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataStore {
    app: AppInfo,
    version: Version,
    build: BuildInfo,
}

impl Default for MetadataStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MetadataStore {
    /// Create an empty store: all strings empty, timestamp unset.
    pub const fn new() -> Self {
        Self {
            app: AppInfo {
                name: String::new(),
                description: String::new(),
                changelog: String::new(),
            },
            version: Version {
                raw: String::new(),
                prefix: String::new(),
                major: 0,
                minor: 0,
                patch: 0,
            },
            build: BuildInfo {
                timestamp: None,
                git: GitInfo {
                    commit: String::new(),
                    branch: String::new(),
                    repo: String::new(),
                },
            },
        }
    }

    /// Set the application name and description.
    ///
    /// Ignored once either field is non-empty; the pair is one group.
    pub fn set_app_info(&mut self, name: &str, description: &str) {
        if self.app.name.is_empty() && self.app.description.is_empty() {
            self.app.name = name.to_string();
            self.app.description = description.to_string();
        }
    }

    /// Set the changelog text. Ignored once non-empty.
    pub fn set_changelog(&mut self, changelog: &str) {
        if self.app.changelog.is_empty() {
            self.app.changelog = changelog.to_string();
        }
    }

    /// Read the changelog from a file, subject to the populate-once guard.
    ///
    /// If the changelog is already set, the file is not read at all.
    ///
    /// # Errors
    ///
    /// Returns [`FileError`] if the file cannot be read; the changelog is
    /// left untouched in that case.
    pub fn set_changelog_from_file(&mut self, path: impl AsRef<Path>) -> Result<(), FileError> {
        if !self.app.changelog.is_empty() {
            return Ok(());
        }
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| FileError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        self.app.changelog = contents;
        Ok(())
    }

    /// Set git provenance as a group, keyed on the stored commit: while
    /// the commit is empty, one call overwrites all three fields at once.
    pub fn set_git_info(&mut self, commit: &str, branch: &str, repo: &str) {
        if self.build.git.commit.is_empty() {
            self.build.git.commit = commit.to_string();
            self.build.git.branch = branch.to_string();
            self.build.git.repo = repo.to_string();
        }
    }

    /// Set the build timestamp from text in `date(1)` format, e.g.
    /// `Mon Jan  2 15:04:05 UTC 2006`.
    ///
    /// Ignored once set. A malformed timestamp leaves the field unset
    /// without error.
    pub fn set_build_info(&mut self, timestamp: &str) {
        if self.build.timestamp.is_none() {
            self.build.timestamp = parse_unix_date(timestamp);
        }
    }

    /// Set the version from a free-form string.
    ///
    /// Always overwrites: raw keeps the input verbatim and the numeric
    /// fields are re-derived from it (all zero when the string does not
    /// parse). Populate-once, where wanted, is the caller's job; the
    /// loaders check that raw is empty before calling.
    pub fn set_version(&mut self, input: &str) {
        self.version = parse_version(input);
    }

    /// Apply compile-time injected `BUILDSTAMP_*` values through the
    /// ordinary populate-once setters. Absent variables are skipped.
    pub fn load_from_build_env(&mut self) {
        if let Some(ts) = BUILD_TIMESTAMP {
            self.set_build_info(ts);
        }
        if let Some(commit) = GIT_COMMIT {
            self.set_git_info(
                commit,
                GIT_BRANCH.unwrap_or_default(),
                GIT_REPO.unwrap_or_default(),
            );
        }
        if let Some(ver) = VERSION_INFO {
            if self.version.raw.is_empty() {
                self.set_version(ver);
            }
        }
    }

    /// Load metadata from the git checkout containing the current
    /// directory.
    ///
    /// # Errors
    ///
    /// Returns [`GitError::NotARepo`] if the current directory is not
    /// inside a checkout; nothing is mutated in that case. Failures of
    /// individual queries are swallowed (see
    /// [`load_from_provenance`](MetadataStore::load_from_provenance)).
    pub fn load_from_git(&mut self) -> Result<(), GitError> {
        let source = GitProvenance::discover(Path::new("."))?;
        self.load_from_provenance(&source);
        Ok(())
    }

    /// Populate still-empty fields from a provenance source.
    ///
    /// Each of commit, branch, repo, and version is attempted
    /// independently: a query that succeeds fills its field (trimmed)
    /// only if the field is still empty, and a query that fails is
    /// silently skipped without affecting the others. The describe
    /// result goes through the version parser only when raw is empty.
    pub fn load_from_provenance(&mut self, source: &dyn ProvenanceSource) {
        if self.build.git.commit.is_empty() {
            if let Ok(commit) = source.commit() {
                self.build.git.commit = commit.trim().to_string();
            }
        }
        if self.build.git.branch.is_empty() {
            if let Ok(branch) = source.branch() {
                self.build.git.branch = branch.trim().to_string();
            }
        }
        if self.build.git.repo.is_empty() {
            if let Ok(url) = source.remote_url() {
                self.build.git.repo = url.trim().to_string();
            }
        }
        if self.version.raw.is_empty() {
            if let Ok(described) = source.describe() {
                self.set_version(described.trim());
            }
        }
    }

    /// Snapshot of the version record.
    pub fn get(&self) -> Version {
        self.version.clone()
    }

    /// Snapshot of the build record.
    pub fn build(&self) -> BuildInfo {
        self.build.clone()
    }

    /// Snapshot of the git provenance record.
    pub fn git_info(&self) -> GitInfo {
        self.build.git.clone()
    }

    /// Snapshot of the application identity record.
    pub fn app(&self) -> AppInfo {
        self.app.clone()
    }

    /// The three-line human-readable rendering printed by
    /// [`print`](MetadataStore::print).
    pub fn report(&self) -> String {
        format!(
            "Running: {}\nVersion: {}\nBuild: {}",
            self.app, self.version, self.build
        )
    }

    /// Print the report to standard output.
    pub fn print(&self) {
        println!("{}", self.report());
    }

    /// Restore the initial empty state. Exists for test isolation and
    /// deliberate re-initialization; production code normally never
    /// needs it.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

static STORE: Mutex<MetadataStore> = Mutex::new(MetadataStore::new());

fn global() -> MutexGuard<'static, MetadataStore> {
    STORE.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Set the application name and description on the global store.
pub fn set_app_info(name: &str, description: &str) {
    global().set_app_info(name, description);
}

/// Set the changelog on the global store.
pub fn set_changelog(changelog: &str) {
    global().set_changelog(changelog);
}

/// Read the changelog from a file into the global store.
///
/// # Errors
///
/// Returns [`FileError`] if the file cannot be read.
pub fn set_changelog_from_file(path: impl AsRef<Path>) -> Result<(), FileError> {
    global().set_changelog_from_file(path)
}

/// Set git provenance on the global store.
pub fn set_git_info(commit: &str, branch: &str, repo: &str) {
    global().set_git_info(commit, branch, repo);
}

/// Set the build timestamp on the global store.
pub fn set_build_info(timestamp: &str) {
    global().set_build_info(timestamp);
}

/// Set the version on the global store (always overwrites).
pub fn set_version(input: &str) {
    global().set_version(input);
}

/// Apply compile-time injected values to the global store.
pub fn load_from_build_env() {
    global().load_from_build_env();
}

/// Load a key=value metadata file into the global store.
///
/// # Errors
///
/// Returns [`FileError`] if the file cannot be opened or read.
pub fn load_from_file(path: impl AsRef<Path>) -> Result<(), FileError> {
    global().load_from_file(path)
}

/// Load metadata from the enclosing git checkout into the global store.
///
/// # Errors
///
/// Returns [`GitError::NotARepo`] when not inside a checkout.
pub fn load_from_git() -> Result<(), GitError> {
    global().load_from_git()
}

/// Snapshot of the global version record.
pub fn get() -> Version {
    global().get()
}

/// Snapshot of the global build record.
pub fn build() -> BuildInfo {
    global().build()
}

/// Snapshot of the global git provenance record.
pub fn git_info() -> GitInfo {
    global().git_info()
}

/// Snapshot of the global application identity record.
pub fn app() -> AppInfo {
    global().app()
}

/// The global store's three-line report.
pub fn report() -> String {
    global().report()
}

/// Print the global store's report to standard output.
pub fn print() {
    global().print();
}

/// Reset the global store to its initial empty state (test isolation).
pub fn reset() {
    global().reset();
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FakeSource {
        commit: Result<String, ()>,
        branch: Result<String, ()>,
        remote: Result<String, ()>,
        describe: Result<String, ()>,
    }

    impl FakeSource {
        fn all_ok() -> Self {
            Self {
                commit: Ok("abc123\n".into()),
                branch: Ok("main\n".into()),
                remote: Ok("git@example.com:me/app.git\n".into()),
                describe: Ok("v2.0.0-rc.1\n".into()),
            }
        }
    }

    fn query(res: &Result<String, ()>) -> Result<String, GitError> {
        res.clone().map_err(|_| GitError::Query {
            message: "fake query failure".into(),
        })
    }

    impl ProvenanceSource for FakeSource {
        fn commit(&self) -> Result<String, GitError> {
            query(&self.commit)
        }
        fn branch(&self) -> Result<String, GitError> {
            query(&self.branch)
        }
        fn remote_url(&self) -> Result<String, GitError> {
            query(&self.remote)
        }
        fn describe(&self) -> Result<String, GitError> {
            query(&self.describe)
        }
    }

    #[test]
    fn app_info_first_writer_wins() {
        let mut store = MetadataStore::new();
        store.set_app_info("myapp", "first");
        store.set_app_info("other", "second");
        assert_eq!(store.app().name, "myapp");
        assert_eq!(store.app().description, "first");
    }

    #[test]
    fn app_info_ignored_once_either_field_set() {
        let mut store = MetadataStore::new();
        store.set_app_info("", "described but unnamed");
        store.set_app_info("late-name", "ignored");
        assert_eq!(store.app().name, "");
        assert_eq!(store.app().description, "described but unnamed");
    }

    #[test]
    fn changelog_populate_once() {
        let mut store = MetadataStore::new();
        store.set_changelog("v1 notes");
        store.set_changelog("v2 notes");
        assert_eq!(store.app().changelog, "v1 notes");
    }

    #[test]
    fn git_info_group_gated_on_commit() {
        let mut store = MetadataStore::new();
        store.set_git_info("abc", "main", "repo-a");
        store.set_git_info("def", "dev", "repo-b");
        let git = store.git_info();
        assert_eq!(
            (git.commit.as_str(), git.branch.as_str(), git.repo.as_str()),
            ("abc", "main", "repo-a")
        );
    }

    #[test]
    fn git_info_empty_commit_does_not_lock_the_group() {
        let mut store = MetadataStore::new();
        store.set_git_info("", "main", "repo-a");
        store.set_git_info("abc", "dev", "repo-b");
        assert_eq!(store.git_info().commit, "abc");
        assert_eq!(store.git_info().branch, "dev");
    }

    #[test]
    fn build_timestamp_populate_once_and_lenient() {
        let mut store = MetadataStore::new();
        store.set_build_info("garbage");
        assert_eq!(store.build().timestamp, None);

        store.set_build_info("Mon Jan  2 15:04:05 UTC 2006");
        let first = store.build().timestamp;
        assert!(first.is_some());

        store.set_build_info("Tue Jan  3 15:04:05 UTC 2006");
        assert_eq!(store.build().timestamp, first);
    }

    #[test]
    fn set_version_always_overwrites() {
        let mut store = MetadataStore::new();
        store.set_version("1.2.3");
        store.set_version("4.5.6-dev");
        let ver = store.get();
        assert_eq!(ver.raw, "4.5.6-dev");
        assert_eq!((ver.major, ver.minor, ver.patch), (4, 5, 6));
        assert_eq!(ver.prefix, "dev");
    }

    #[test]
    fn set_version_rederives_on_parse_failure() {
        let mut store = MetadataStore::new();
        store.set_version("1.2.3");
        store.set_version("nonsense");
        let ver = store.get();
        assert_eq!(ver.raw, "nonsense");
        assert_eq!((ver.major, ver.minor, ver.patch), (0, 0, 0));
    }

    #[test]
    fn provenance_fills_empty_fields_trimmed() {
        let mut store = MetadataStore::new();
        store.load_from_provenance(&FakeSource::all_ok());

        let git = store.git_info();
        assert_eq!(git.commit, "abc123");
        assert_eq!(git.branch, "main");
        assert_eq!(git.repo, "git@example.com:me/app.git");

        let ver = store.get();
        assert_eq!(ver.raw, "v2.0.0-rc.1");
        assert_eq!((ver.major, ver.minor, ver.patch), (2, 0, 0));
        assert_eq!(ver.prefix, "rc.1");
    }

    #[test]
    fn provenance_respects_existing_values() {
        let mut store = MetadataStore::new();
        store.set_git_info("existing", "keep", "mine");
        store.set_version("0.1.0");
        store.load_from_provenance(&FakeSource::all_ok());

        assert_eq!(store.git_info().commit, "existing");
        assert_eq!(store.get().raw, "0.1.0");
    }

    #[test]
    fn provenance_query_failures_do_not_block_others() {
        let mut source = FakeSource::all_ok();
        source.commit = Err(());
        source.describe = Err(());

        let mut store = MetadataStore::new();
        store.load_from_provenance(&source);

        assert_eq!(store.git_info().commit, "");
        assert_eq!(store.git_info().branch, "main");
        assert_eq!(store.git_info().repo, "git@example.com:me/app.git");
        assert_eq!(store.get().raw, "");
    }

    #[test]
    fn report_has_labels_in_order() {
        let mut store = MetadataStore::new();
        store.set_app_info("myapp", "My application");
        store.set_version("v1.2.3");
        let report = store.report();

        let lines: Vec<&str> = report.lines().collect();
        assert!(lines[0].starts_with("Running: "));
        // AppInfo's rendering embeds a newline, shifting the rest down.
        assert!(report.contains("\nVersion:  1.2.3"));
        let version_idx = report.find("Version: ").unwrap();
        let build_idx = report.find("Build: ").unwrap();
        assert!(report.find("Running: ").unwrap() < version_idx);
        assert!(version_idx < build_idx);
    }

    #[test]
    fn reset_restores_empty_state() {
        let mut store = MetadataStore::new();
        store.set_app_info("myapp", "desc");
        store.set_version("1.2.3");
        store.reset();
        assert_eq!(store, MetadataStore::new());
    }
}
