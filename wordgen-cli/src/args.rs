use std::path::PathBuf;

use clap::Parser;
use log::LevelFilter;

/// Generates new words that look like the words of a training text.
#[derive(Parser, Debug)]
#[command(name = "wordgen", version)]
pub struct Args {
	/// Training text file (UTF-8).
	#[arg(long = "input", short = 'i', default_value = "file.txt")]
	pub input: PathBuf,

	/// Output file; standard output when omitted.
	#[arg(long = "output", short = 'o')]
	pub output: Option<PathBuf>,

	/// Model order: letters of context remembered, markers included.
	#[arg(long = "lvl", default_value_t = 4)]
	pub lvl: usize,

	/// Attempts allowed for a single word.
	#[arg(long = "iter-max", default_value_t = 100)]
	pub iter_max: usize,

	/// Number of words to generate.
	#[arg(long = "words", default_value_t = 100)]
	pub words: usize,

	/// Length of generated words; sampled from the training text when omitted.
	#[arg(long = "length")]
	pub length: Option<usize>,

	/// Column width of the output.
	#[arg(long = "column", default_value_t = 21)]
	pub column: usize,

	/// Alphabet JSON file (`{"letters": "..."}`); Russian by default.
	#[arg(long = "alphabet")]
	pub alphabet: Option<PathBuf>,

	/// Seed for reproducible output.
	#[arg(long = "seed")]
	pub seed: Option<u64>,

	/// Print every training path of the trie before generating.
	#[arg(long = "dump")]
	pub dump: bool,

	/// Stop after `words + 1` rounds even if duplicates were rejected.
	#[arg(long = "legacy-batch")]
	pub legacy_batch: bool,

	#[command(flatten)]
	pub logging: LogArgs,
}

/// Logging setup arg group.
#[derive(clap::Args, Debug)]
pub struct LogArgs {
	/// Silence log messages.
	#[arg(short, long)]
	pub quiet: bool,

	/// Turn debugging information on (-v, -vv, -vvv)
	#[arg(short, long, action = clap::ArgAction::Count)]
	pub verbose: u8,
}

impl LogArgs {
	/// Level selected by the flags; warnings by default.
	pub fn level(&self) -> LevelFilter {
		if self.quiet {
			return LevelFilter::Off;
		}
		match self.verbose {
			0 => LevelFilter::Warn,
			1 => LevelFilter::Info,
			2 => LevelFilter::Debug,
			_ => LevelFilter::Trace,
		}
	}

	/// Installs the logger. `RUST_LOG` still takes precedence.
	pub fn setup_logging(&self) {
		env_logger::Builder::new()
			.filter_level(self.level())
			.parse_default_env()
			.init();
	}
}
