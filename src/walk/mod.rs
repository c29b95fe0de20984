//! Recursive traversal that applies a rule set to a directory tree.
//!
//! Each directory's entries are listed in full and sorted before any of them is
//! touched. A directory is renamed only once its whole subtree has been
//! processed, so every child is visited and reported under the path it had
//! when the walk started. Dry-run and live mode take the same decisions on the
//! same paths; the only difference is whether the filesystem is mutated.
//!
//! Renames are tracked in two sets, paths vacated and paths claimed by earlier
//! renames, and the collision check consults them before the filesystem. A dry
//! run therefore sees its own simulated renames exactly as a live run sees the
//! real ones.

pub mod report;

pub use report::{Change, ChangeReport};

use crate::error::{RenameError, Result};
use crate::rules::{IgnoreList, RuleSet};
use std::collections::HashSet;
use std::ffi::OsStr;
use std::fs::{self, Metadata};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Options controlling a walk.
#[derive(Debug, Clone, Copy, Default)]
pub struct WalkOptions {
	/// Report intended changes without writing or renaming anything.
	pub dry_run: bool,
}

/// Counters collected over a walk.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WalkSummary {
	/// Entries that were examined (files, directories, links).
	pub visited: usize,

	/// Entries skipped because an ignore pattern matched. Pruned subtrees count once.
	pub ignored: usize,

	/// Files whose content was (or would be) rewritten.
	pub modified: usize,

	/// Entries that were (or would be) renamed.
	pub renamed: usize,
}

/// Walk `root`, rewriting file contents and entry names with `rules`.
///
/// `on_change` is called once per change, in traversal order, as soon as the
/// change has been applied (or decided, in dry-run mode). The first I/O error
/// aborts the walk; changes already applied stay in place.
///
/// The root itself is never renamed.
pub fn walk<F>(
	root: &Path,
	rules: &RuleSet,
	ignore: &IgnoreList,
	options: WalkOptions,
	on_change: F,
) -> Result<WalkSummary>
where
	F: FnMut(&ChangeReport),
{
	let mut walker = Walker {
		rules,
		ignore,
		dry_run: options.dry_run,
		on_change,
		summary: WalkSummary::default(),
		vacated: HashSet::new(),
		claimed: HashSet::new(),
	};
	walker.visit(root, true)?;
	Ok(walker.summary)
}

struct Walker<'a, F> {
	rules: &'a RuleSet,
	ignore: &'a IgnoreList,
	dry_run: bool,
	on_change: F,
	summary: WalkSummary,
	/// Paths that existed when listed but have since been renamed away.
	vacated: HashSet<PathBuf>,
	/// Paths that earlier renames moved an entry to.
	claimed: HashSet<PathBuf>,
}

impl<F> Walker<'_, F>
where
	F: FnMut(&ChangeReport),
{
	fn visit(&mut self, path: &Path, is_root: bool) -> Result<()> {
		if self.ignore.should_ignore(path) {
			debug!("Ignoring: {:?}", path);
			self.summary.ignored += 1;
			return Ok(());
		}

		let metadata = fs::symlink_metadata(path).map_err(|source| RenameError::Metadata {
			path: path.to_path_buf(),
			source,
		})?;
		self.summary.visited += 1;

		let file_type = metadata.file_type();
		if file_type.is_dir() {
			debug!("Entering directory: {:?}", path);
			for child in list_children(path)? {
				self.visit(&child, false)?;
			}
		} else if file_type.is_file() {
			self.rewrite_content(path, &metadata)?;
		} else {
			debug!("Not following: {:?}", path);
		}

		if !is_root {
			self.rewrite_name(path, &metadata)?;
		}
		Ok(())
	}

	fn rewrite_content(&mut self, path: &Path, metadata: &Metadata) -> Result<()> {
		let content = fs::read(path).map_err(|source| RenameError::ReadFile {
			path: path.to_path_buf(),
			source,
		})?;

		let Some(rewritten) = self.rules.rewrite_content(&content) else {
			return Ok(());
		};

		if !self.dry_run {
			let write_error = |source| RenameError::WriteFile {
				path: path.to_path_buf(),
				source,
			};
			fs::write(path, &rewritten).map_err(write_error)?;
			fs::set_permissions(path, metadata.permissions()).map_err(write_error)?;
		}

		self.summary.modified += 1;
		self.report(Change::Modified {
			path: path.to_path_buf(),
		});
		Ok(())
	}

	fn rewrite_name(&mut self, path: &Path, metadata: &Metadata) -> Result<()> {
		let Some(name) = path.file_name() else {
			return Ok(());
		};
		let Some(new_name) = self.rules.rewrite_os_name(name) else {
			return Ok(());
		};

		if !is_valid_file_name(&new_name) {
			return Err(RenameError::InvalidRenameTarget {
				path: path.to_path_buf(),
				name: new_name.to_string_lossy().into_owned(),
			});
		}

		let destination = path.with_file_name(&new_name);
		if self.is_taken(&destination, name, &new_name, metadata) {
			return Err(RenameError::RenameCollision {
				from: path.to_path_buf(),
				to: destination,
			});
		}

		if !self.dry_run {
			fs::rename(path, &destination).map_err(|source| RenameError::Rename {
				from: path.to_path_buf(),
				to: destination.clone(),
				source,
			})?;
		}

		self.claimed.remove(path);
		self.vacated.remove(&destination);
		self.vacated.insert(path.to_path_buf());
		self.claimed.insert(destination.clone());

		self.summary.renamed += 1;
		self.report(Change::Renamed {
			from: path.to_path_buf(),
			to: destination,
		});
		Ok(())
	}

	/// Check whether `destination` is occupied, counting renames made earlier in this walk.
	fn is_taken(
		&self,
		destination: &Path,
		name: &OsStr,
		new_name: &OsStr,
		metadata: &Metadata,
	) -> bool {
		if self.claimed.contains(destination) {
			return true;
		}
		if self.vacated.contains(destination) {
			return false;
		}
		match fs::symlink_metadata(destination) {
			// A case-only rename on a case-insensitive filesystem finds the entry itself.
			Ok(existing) => {
				!(is_case_only_change(name, new_name) && is_same_entry(metadata, &existing))
			}
			Err(_) => false,
		}
	}

	fn report(&mut self, change: Change) {
		let report = ChangeReport {
			change,
			dry_run: self.dry_run,
		};
		(self.on_change)(&report);
	}
}

/// List a directory's entries, sorted by name.
fn list_children(dir: &Path) -> Result<Vec<PathBuf>> {
	let read_dir_error = |source| RenameError::ReadDir {
		path: dir.to_path_buf(),
		source,
	};

	let mut names = fs::read_dir(dir)
		.map_err(read_dir_error)?
		.map(|entry| entry.map(|entry| entry.file_name()))
		.collect::<std::io::Result<Vec<_>>>()
		.map_err(read_dir_error)?;
	names.sort();

	Ok(names.into_iter().map(|name| dir.join(name)).collect())
}

fn is_valid_file_name(name: &OsStr) -> bool {
	let name = name.to_string_lossy();
	!name.is_empty() && name != "." && name != ".." && !name.chars().any(std::path::is_separator)
}

fn is_case_only_change(name: &OsStr, new_name: &OsStr) -> bool {
	match (name.to_str(), new_name.to_str()) {
		(Some(name), Some(new_name)) => name.to_lowercase() == new_name.to_lowercase(),
		_ => false,
	}
}

#[cfg(unix)]
fn is_same_entry(a: &Metadata, b: &Metadata) -> bool {
	use std::os::unix::fs::MetadataExt;
	a.dev() == b.dev() && a.ino() == b.ino()
}

// TODO: compare file indexes once `windows_by_handle` is stable; until then a
// case-only rename on Windows is reported as a collision.
#[cfg(not(unix))]
fn is_same_entry(_a: &Metadata, _b: &Metadata) -> bool {
	false
}
