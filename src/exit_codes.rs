//! Process exit codes.
//!
//! - `0`: the changelog was produced for every repository
//! - `1`: general error (unreadable input, invalid pattern, I/O)
//! - `2`: invalid command-line usage, including a one-sided commit range
//! - `11`: a repository could not be cloned or fetched; the run was aborted
//! - `12`: one or more repositories could not be scraped; the changelog
//!   was still written for the others

pub const SUCCESS: i32 = 0;
pub const ERROR: i32 = 1;
pub const USAGE: i32 = 2;
pub const SYNC_FAILED: i32 = 11;
pub const SCRAPE_FAILED: i32 = 12;
