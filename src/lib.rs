//! rxrename - rule-driven recursive find-and-replace over a directory tree.
//!
//! This library provides the core functionality for rxrename, including:
//! - Ordered regex substitution rules applied to file contents and names
//! - Ignore patterns that prune paths from the walk
//! - A tree walker with a dry-run mode that reports without mutating
//!
//! # Example
//!
//! ```no_run
//! use rxrename::config::{load_ignore_list, load_rules};
//! use rxrename::walk::{WalkOptions, walk};
//! use std::path::Path;
//!
//! let rules = load_rules(Path::new("rules.txt")).unwrap();
//! let ignore = load_ignore_list(Path::new(".rxignore")).unwrap();
//!
//! let options = WalkOptions { dry_run: true };
//! walk(Path::new("."), &rules, &ignore, options, |report| {
//!     println!("{report}");
//! })
//! .unwrap();
//! ```

pub mod config;
pub mod error;
pub mod rules;
pub mod walk;

pub use error::{RenameError, Result};
