//! Substitution rules and ignore patterns.
//!
//! This module handles:
//! - Compiling ordered `pattern=>replacement` rules and applying them to content and names
//! - Matching paths against ignore patterns

pub mod matcher;
pub mod rewriter;

pub use matcher::IgnoreList;
pub use rewriter::{RULE_SEPARATOR, Rule, RuleSet};
