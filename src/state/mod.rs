//! Outcome tracking for crawl units
//!
//! The serialized model only records "image or no image" and "pages or no
//! pages". These types keep the reason around while the crawl runs, so that
//! logging and statistics can tell a fetch failure apart from markup that
//! simply had nothing to extract.

mod unit_outcome;

pub use unit_outcome::{ImageOutcome, PageListOutcome, UnitFailure};
