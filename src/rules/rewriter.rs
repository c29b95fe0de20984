use crate::error::{RenameError, Result};
use regex::Regex;
use regex::bytes::Regex as BytesRegex;
use std::ffi::{OsStr, OsString};

/// Separator between the pattern and the replacement on a rule line.
pub const RULE_SEPARATOR: &str = "=>";

/// A single substitution: every match of `pattern` is replaced by `replacement`.
///
/// The pattern is compiled twice, once for file names and once for raw file
/// content, so content never has to be valid UTF-8.
#[derive(Debug, Clone)]
pub struct Rule {
	/// Pattern applied to file names.
	pub pattern: Regex,

	/// Same pattern, applied to file content.
	pub content_pattern: BytesRegex,

	/// Replacement template; may reference capture groups as `$1` or `${name}`.
	pub replacement: String,
}

impl Rule {
	/// Compile a rule from a pattern and a replacement template.
	pub fn new(pattern: &str, replacement: &str) -> Result<Self> {
		let invalid = |source| RenameError::InvalidRegex {
			pattern: pattern.to_string(),
			source,
		};
		Ok(Rule {
			pattern: Regex::new(pattern).map_err(invalid)?,
			content_pattern: BytesRegex::new(pattern).map_err(invalid)?,
			replacement: replacement.to_string(),
		})
	}

	/// Parse a `<pattern>=><replacement>` line.
	///
	/// Returns `Ok(None)` for lines that do not split into exactly two fields.
	pub fn parse(line: &str) -> Result<Option<Self>> {
		let fields: Vec<&str> = line.split(RULE_SEPARATOR).collect();
		match fields.as_slice() {
			[pattern, replacement] => Rule::new(pattern, replacement).map(Some),
			_ => Ok(None),
		}
	}

	/// Replace all matches in a string.
	pub fn apply_str(&self, input: &str) -> String {
		self.pattern
			.replace_all(input, self.replacement.as_str())
			.into_owned()
	}

	/// Replace all matches in a byte sequence.
	pub fn apply_bytes(&self, input: &[u8]) -> Vec<u8> {
		self.content_pattern
			.replace_all(input, self.replacement.as_bytes())
			.into_owned()
	}
}

/// An ordered sequence of rules. Each rule sees the output of the one before it.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
	rules: Vec<Rule>,
}

impl RuleSet {
	/// Compile rule lines. Malformed lines are skipped; an invalid pattern fails the whole set.
	pub fn compile<'a, I>(lines: I) -> Result<Self>
	where
		I: IntoIterator<Item = &'a str>,
	{
		let mut rules = Vec::new();
		for line in lines {
			if let Some(rule) = Rule::parse(line)? {
				rules.push(rule);
			}
		}
		Ok(RuleSet { rules })
	}

	pub fn len(&self) -> usize {
		self.rules.len()
	}

	pub fn is_empty(&self) -> bool {
		self.rules.is_empty()
	}

	pub fn iter(&self) -> impl Iterator<Item = &Rule> {
		self.rules.iter()
	}

	/// Run every rule, in order, over a string.
	pub fn apply_str(&self, input: &str) -> String {
		self.rules
			.iter()
			.fold(input.to_string(), |text, rule| rule.apply_str(&text))
	}

	/// Run every rule, in order, over a byte sequence.
	pub fn apply_bytes(&self, input: &[u8]) -> Vec<u8> {
		self.rules
			.iter()
			.fold(input.to_vec(), |content, rule| rule.apply_bytes(&content))
	}

	/// Rewrite file content, returning `None` when the result equals the input.
	pub fn rewrite_content(&self, content: &[u8]) -> Option<Vec<u8>> {
		let rewritten = self.apply_bytes(content);
		(rewritten != content).then_some(rewritten)
	}

	/// Rewrite a single path segment, returning `None` when the result equals the input.
	pub fn rewrite_name(&self, name: &str) -> Option<String> {
		let rewritten = self.apply_str(name);
		(rewritten != name).then_some(rewritten)
	}

	/// Rewrite a file name taken straight from the filesystem.
	///
	/// Names that are not valid UTF-8 are matched as raw bytes on unix and left
	/// alone elsewhere.
	pub fn rewrite_os_name(&self, name: &OsStr) -> Option<OsString> {
		match name.to_str() {
			Some(name) => self.rewrite_name(name).map(OsString::from),
			None => self.rewrite_raw_name(name),
		}
	}

	#[cfg(unix)]
	fn rewrite_raw_name(&self, name: &OsStr) -> Option<OsString> {
		use std::os::unix::ffi::{OsStrExt, OsStringExt};
		self.rewrite_content(name.as_bytes())
			.map(OsString::from_vec)
	}

	#[cfg(not(unix))]
	fn rewrite_raw_name(&self, _name: &OsStr) -> Option<OsString> {
		None
	}
}
