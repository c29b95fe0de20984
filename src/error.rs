use std::path::PathBuf;

/// Library-level structured errors for rxrename.
///
/// Use `thiserror` for structured errors that library consumers can match on.
/// The CLI binary wraps these with `anyhow` for rich context chains.
#[derive(Debug, thiserror::Error)]
pub enum RenameError {
	#[error("Failed to read rules file: {path}")]
	RulesRead {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Failed to read ignore file: {path}")]
	IgnoreRead {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Invalid regex pattern: {pattern}")]
	InvalidRegex {
		pattern: String,
		#[source]
		source: regex::Error,
	},

	#[error("Failed to stat: {path}")]
	Metadata {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Failed to read directory: {path}")]
	ReadDir {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Failed to read file: {path}")]
	ReadFile {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Failed to write file: {path}")]
	WriteFile {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Failed to rename {from} to {to}")]
	Rename {
		from: PathBuf,
		to: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Cannot rename {from} to {to}: destination already exists")]
	RenameCollision { from: PathBuf, to: PathBuf },

	#[error("Rules rewrote the name of {path} to an invalid file name: {name:?}")]
	InvalidRenameTarget { path: PathBuf, name: String },
}

/// Result type alias using RenameError.
pub type Result<T> = std::result::Result<T, RenameError>;
