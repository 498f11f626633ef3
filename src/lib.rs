//! Count HTTP status codes in web-server access logs.
//!
//! Each log file goes through its own pipeline: [`parse`] turns lines into
//! records, [`stats`] folds them into per-code counts and [`report`] renders the
//! codes known to [`labels`] as a table. [`app`] runs one pipeline per file.

pub mod app;
pub mod cli;
pub mod labels;
pub mod logging;
pub mod parse;
pub mod report;
pub mod source;
pub mod stats;
