use std::fs::File;
use std::io::{self, BufWriter, Write};

use clap::Parser;
use rand::SeedableRng;
use rand::rngs::StdRng;

use wordgen_core::io::{load_alphabet, read_text};
use wordgen_core::{Alphabet, BatchPolicy, GenerationInput, WordGenerator};

mod args;
mod display;

use args::Args;

fn main() -> Result<(), Box<dyn std::error::Error>> {
	let args = Args::parse();
	args.logging.setup_logging();

	let alphabet = match &args.alphabet {
		Some(path) => load_alphabet(path)?,
		None => Alphabet::russian(),
	};

	let text = read_text(&args.input)
		.map_err(|e| format!("Failed to read training file {}: {}", args.input.display(), e))?;

	// Learn the letter transitions of the training text
	let mut generator = WordGenerator::new(alphabet, args.lvl)?;
	generator.train(&text);

	if args.dump {
		display::write_dump(&mut io::stdout().lock(), &generator)?;
	}

	let mut out: Box<dyn Write> = match &args.output {
		Some(path) => Box::new(BufWriter::new(File::create(path)?)),
		None => Box::new(BufWriter::new(io::stdout().lock())),
	};

	// Either reproducible or seeded from the OS
	let mut rng = match args.seed {
		Some(seed) => StdRng::seed_from_u64(seed),
		None => StdRng::from_os_rng(),
	};

	let mut input = GenerationInput::new(args.words);
	input.length = args.length.into();
	input.set_max_attempts(args.iter_max);
	if args.legacy_batch {
		input.policy = BatchPolicy::Rounds;
	}

	let words = generator.generate(&mut rng, &input);
	if words.len() < args.words {
		log::warn!("Only {} of {} words could be generated", words.len(), args.words);
	}

	display::write_columns(&mut out, &words, args.column)?;
	out.flush()?;

	Ok(())
}
