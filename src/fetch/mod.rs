//! Fetchers for the two dependency kinds.
//!
//! Git dependencies go through the `git` CLI; archives are streamed down
//! over HTTP.

pub mod git;
pub mod http;

pub use git::GitFetcher;
pub use http::HttpFetcher;
