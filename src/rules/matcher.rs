use crate::error::{RenameError, Result};
use regex::Regex;
use std::path::Path;

/// Patterns that suppress processing of matching paths.
#[derive(Debug, Clone, Default)]
pub struct IgnoreList {
	patterns: Vec<Regex>,
}

impl IgnoreList {
	/// Compile ignore lines, one pattern per line. Empty lines are skipped.
	pub fn compile<'a, I>(lines: I) -> Result<Self>
	where
		I: IntoIterator<Item = &'a str>,
	{
		let patterns = lines
			.into_iter()
			.filter(|line| !line.is_empty())
			.map(compile_regex)
			.collect::<Result<Vec<_>>>()?;
		Ok(IgnoreList { patterns })
	}

	pub fn len(&self) -> usize {
		self.patterns.len()
	}

	pub fn is_empty(&self) -> bool {
		self.patterns.is_empty()
	}

	/// Check whether any pattern matches anywhere in the path.
	pub fn should_ignore(&self, path: &Path) -> bool {
		if self.is_empty() {
			return false;
		}
		let path_str = path.to_string_lossy();
		self.patterns.iter().any(|regex| regex.is_match(&path_str))
	}
}

fn compile_regex(pattern: &str) -> Result<Regex> {
	Regex::new(pattern).map_err(|source| RenameError::InvalidRegex {
		pattern: pattern.to_string(),
		source,
	})
}
