//! Integration tests for Comic-Archiver
//!
//! Cargo only discovers `tests/*.rs` and `tests/*/main.rs`, so this file
//! pulls the suite together.

mod crawl_tests;
mod fetcher_tests;
