use std::fmt;
use std::path::{Path, PathBuf};

/// A change the walker made, or would make in dry-run mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Change {
	/// File content was rewritten in place.
	Modified { path: PathBuf },

	/// An entry was moved to a new name in the same directory.
	Renamed { from: PathBuf, to: PathBuf },
}

impl Change {
	/// The path the change applies to, as it was before the change.
	pub fn path(&self) -> &Path {
		match self {
			Change::Modified { path } => path,
			Change::Renamed { from, .. } => from,
		}
	}
}

/// A change paired with the mode it was produced in. Renders as one output line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeReport {
	pub change: Change,
	pub dry_run: bool,
}

impl fmt::Display for ChangeReport {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match (&self.change, self.dry_run) {
			(Change::Modified { path }, true) => {
				write!(f, "DRY RUN: Making substitutions in {}", path.display())
			}
			(Change::Modified { path }, false) => {
				write!(f, "Made substitutions in {}", path.display())
			}
			(Change::Renamed { from, to }, true) => {
				write!(
					f,
					"DRY RUN: Would rename {} to {}",
					from.display(),
					to.display()
				)
			}
			(Change::Renamed { from, to }, false) => {
				write!(f, "Renamed {} to {}", from.display(), to.display())
			}
		}
	}
}
