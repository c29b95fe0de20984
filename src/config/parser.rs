use crate::error::{RenameError, Result};
use crate::rules::{IgnoreList, RuleSet};
use std::path::Path;

/// Load a rule file: one `<pattern>=><replacement>` per line.
pub fn load_rules(path: &Path) -> Result<RuleSet> {
	let content = std::fs::read_to_string(path).map_err(|source| RenameError::RulesRead {
		path: path.to_path_buf(),
		source,
	})?;

	parse_rules_str(&content)
}

/// Parse rules from a string (useful for testing).
pub fn parse_rules_str(content: &str) -> Result<RuleSet> {
	RuleSet::compile(content.lines())
}

/// Load an ignore file: one pattern per line, empty lines skipped.
pub fn load_ignore_list(path: &Path) -> Result<IgnoreList> {
	let content = std::fs::read_to_string(path).map_err(|source| RenameError::IgnoreRead {
		path: path.to_path_buf(),
		source,
	})?;

	parse_ignore_str(&content)
}

/// Parse ignore patterns from a string (useful for testing).
pub fn parse_ignore_str(content: &str) -> Result<IgnoreList> {
	IgnoreList::compile(content.lines())
}
