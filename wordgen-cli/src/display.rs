//! Output layout: generated words in columns, trie dumps.

use std::io::{self, Write};

use wordgen_core::{Alphabet, WordGenerator};

/// Nominal line width used to derive the number of columns.
const LINE_WIDTH: usize = 200;

/// Writes `words` padded to `column` characters.
///
/// A line break comes before every word whose 1-based position is a
/// multiple of `LINE_WIDTH / column`, and once more at the end.
pub fn write_columns<W: Write>(out: &mut W, words: &[String], column: usize) -> io::Result<()> {
	let per_line = (LINE_WIDTH / column.max(1)).max(1);
	for (i, word) in words.iter().enumerate() {
		if (i + 1) % per_line == 0 {
			writeln!(out)?;
		}
		let padding = column.saturating_sub(word.chars().count());
		write!(out, "{}{}", word, " ".repeat(padding))?;
	}
	writeln!(out)
}

/// Writes every training path of the trie, `", "` after each path and a
/// line break after each top-level branch.
pub fn write_dump<W: Write>(out: &mut W, generator: &WordGenerator) -> io::Result<()> {
	let alphabet: &Alphabet = generator.alphabet();
	let mut result = Ok(());
	let mut branch = None;

	generator.for_each_path(|path| {
		if result.is_err() {
			return;
		}
		let first = path.first().copied();
		if branch.is_some() && branch != first {
			result = writeln!(out);
		}
		branch = first;
		let text: String = path.iter().map(|&s| alphabet.display(s)).collect();
		if result.is_ok() {
			result = write!(out, "{}, ", text);
		}
	});
	result?;

	if branch.is_some() {
		writeln!(out)?;
	}
	writeln!(out)
}
