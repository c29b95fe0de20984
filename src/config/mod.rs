//! Loading rule and ignore files.
//!
//! Both formats are line-based UTF-8 text; see [`parser`] for the details.

pub mod parser;

pub use parser::{load_ignore_list, load_rules, parse_ignore_str, parse_rules_str};
