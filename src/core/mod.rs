//! core
//!
//! Core domain types and parsing for buildstamp.
//!
//! # Contents
//!
//! - [`types`] - The four metadata records and their renderings
//! - [`parse`] - The permissive version-string parser and date parsing

pub mod parse;
pub mod types;

pub use types::{AppInfo, BuildInfo, GitInfo, Version};
