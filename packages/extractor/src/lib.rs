//! Family Extractor - Read person records from legacy family pages.
//!
//! A legacy genealogy export stores one household per page (`f1.htm`,
//! `f2.htm`, ...). Each page lists a husband, a wife and their children as
//! loosely formatted lines with inline links. This crate turns those lines
//! into a stream of [`PersonRecord`]s grouped by family.
//!
//! # Example
//!
//! ```
//! use family_extractor::scanner::PageScanner;
//!
//! let page = "<a name=\"f12\"></a>\nHusband John Smith\nBorn: 1850\nTable of Contents\n";
//! let people: Vec<_> = PageScanner::new(page.lines()).collect();
//!
//! assert_eq!(people[0].name, "John Smith");
//! assert_eq!(people[0].family, "f12");
//! ```
//!
//! # Architecture
//!
//! - [`markup`]: single-line scanner for visible text, first link and anchor
//! - [`classify`]: decides what a line is (family anchor, header, end, other)
//! - [`content`]: splits content lines into key/value fragments
//! - [`types`]: person and fragment data types
//! - [`scanner`]: per-page state machine producing records
//! - [`walker`]: runs the scanner over every page matching a glob
//! - [`consistency`]: cross-check against the family index
//! - [`yaml`]: YAML output and read-back
//! - [`config`]: constants and patterns
//! - [`error`]: error types and Result alias
//! - [`cli`]: command-line interface

pub mod classify;
pub mod cli;
pub mod config;
pub mod consistency;
pub mod content;
pub mod error;
pub mod markup;
pub mod scanner;
pub mod types;
pub mod walker;
pub mod yaml;

// Re-export commonly used items
pub use error::{ExtractorError, Result};
pub use scanner::{PageScanner, ScanOptions, TrailingRecord};
pub use types::{ContentFragment, PersonRecord, Relation};
pub use walker::CorpusWalker;
