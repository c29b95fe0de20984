use anyhow::{Context, Result};
use clap::Parser;
use std::ffi::OsString;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use rxrename::config::{load_ignore_list, load_rules};
use rxrename::rules::IgnoreList;
use rxrename::walk::{WalkOptions, walk};

const USAGE: &str =
	"Usage: rxrename -dir=<directory> -rules=<rules_file> [-ignore=<ignore_file>] [-n]";

/// Environment variable holding a tracing filter directive, e.g. `rxrename=debug`.
const LOG_ENV_VAR: &str = "RXRENAME_LOG";

#[derive(Parser)]
#[command(name = "rxrename")]
#[command(
	author,
	version,
	about = "Rule-driven recursive find-and-replace for file contents and names"
)]
struct Cli {
	// Kept as `OsString` so an empty value reaches the usage check instead of
	// being rejected by clap's path parser.
	/// Root of the tree to process
	#[arg(long, value_name = "DIR")]
	dir: Option<OsString>,

	/// File of `<pattern>=><replacement>` rules, one per line
	#[arg(long, value_name = "FILE")]
	rules: Option<OsString>,

	/// File of path patterns to skip, one per line
	#[arg(long, value_name = "FILE")]
	ignore: Option<OsString>,

	/// Report the changes that would be made without making them
	#[arg(short = 'n', long = "dry-run")]
	dry_run: bool,

	/// Log per-entry decisions to stderr
	#[arg(short, long)]
	verbose: bool,
}

fn main() -> ExitCode {
	match run() {
		Ok(code) => code,
		Err(e) => {
			eprintln!("error: {e:?}");
			ExitCode::FAILURE
		}
	}
}

fn run() -> Result<ExitCode> {
	let cli = Cli::parse_from(normalize_args(std::env::args_os()));
	init_tracing(cli.verbose);

	let (Some(dir), Some(rules_path)) = (non_empty_path(cli.dir), non_empty_path(cli.rules)) else {
		println!("{USAGE}");
		return Ok(ExitCode::FAILURE);
	};

	let rules = load_rules(&rules_path).context("Failed to load rules")?;
	debug!("Loaded {} rules from {:?}", rules.len(), rules_path);

	let ignore = match non_empty_path(cli.ignore) {
		Some(ref ignore_path) => {
			let ignore = load_ignore_list(ignore_path).context("Failed to load ignore list")?;
			debug!("Loaded {} ignore patterns from {:?}", ignore.len(), ignore_path);
			ignore
		}
		None => IgnoreList::default(),
	};

	let options = WalkOptions {
		dry_run: cli.dry_run,
	};
	let summary = walk(&dir, &rules, &ignore, options, |report| println!("{report}"))
		.context("Failed to rename files and content")?;

	info!(
		"Walk complete: {} visited, {} ignored, {} modified, {} renamed",
		summary.visited, summary.ignored, summary.modified, summary.renamed
	);

	Ok(ExitCode::SUCCESS)
}

/// An empty flag value counts as not given.
fn non_empty_path(value: Option<OsString>) -> Option<PathBuf> {
	value.filter(|v| !v.is_empty()).map(PathBuf::from)
}

fn init_tracing(verbose: bool) {
	let default_level = if verbose { "debug" } else { "warn" };
	let filter =
		EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new(default_level));

	tracing_subscriber::registry()
		.with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
		.with(filter)
		.init();
}

/// Accept single-dash long flags (`-dir=x`) by rewriting them to `--dir=x`.
///
/// Single-letter flags such as `-n` are left alone.
fn normalize_args<I>(args: I) -> Vec<OsString>
where
	I: IntoIterator<Item = OsString>,
{
	let mut normalized = Vec::new();
	let mut passthrough = false;

	for (index, arg) in args.into_iter().enumerate() {
		if index == 0 || passthrough {
			normalized.push(arg);
			continue;
		}

		match arg.to_str() {
			Some("--") => {
				passthrough = true;
				normalized.push(arg);
			}
			Some(flag) if is_single_dash_long_flag(flag) => {
				normalized.push(OsString::from(format!("-{flag}")));
			}
			_ => normalized.push(arg),
		}
	}

	normalized
}

fn is_single_dash_long_flag(arg: &str) -> bool {
	let Some(rest) = arg.strip_prefix('-') else {
		return false;
	};
	if rest.starts_with('-') {
		return false;
	}
	let name = rest.split('=').next().unwrap_or_default();
	name.len() > 1 && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
}
