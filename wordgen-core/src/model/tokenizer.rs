use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

use rand::Rng;

use super::alphabet::{Alphabet, Symbol};
use super::distribution::Distribution;

/// Turns raw text into overlapping training windows, one word at a time.
///
/// A word is a maximal run of alphabet letters; anything else separates
/// words. For a word `c1..cN` the successive windows are a step-1 sliding
/// view over `[Begin, c1, .., cN, End]`, each capped at the requested
/// width. The first window of a word always starts with `Begin`, the last
/// one always ends with `End`.
///
/// While tokenizing, every completed word is added to the vocabulary and
/// counted in the word-length histogram.
#[derive(Debug)]
pub struct Tokenizer {
	alphabet: Arc<Alphabet>,

	/// Text being tokenized.
	text: Vec<char>,
	/// First letter of the next window when inside a word.
	cursor: usize,
	in_word: bool,
	/// Letters of the current word consumed so far.
	word: String,

	/// Exact training words.
	vocabulary: HashSet<String>,
	/// Word length (in letters) -> number of training words.
	word_lengths: BTreeMap<usize, u64>,
	/// Length table derived from `word_lengths`, dropped on every new word.
	length_table: Option<Distribution<usize>>,
}

impl Tokenizer {
	/// Creates a tokenizer with no text and empty statistics.
	pub fn new(alphabet: Arc<Alphabet>) -> Self {
		Self {
			alphabet,
			text: Vec::new(),
			cursor: 0,
			in_word: false,
			word: String::new(),
			vocabulary: HashSet::new(),
			word_lengths: BTreeMap::new(),
			length_table: None,
		}
	}

	/// Replaces the text to tokenize and rewinds to its beginning.
	///
	/// Vocabulary and histogram are kept.
	pub fn set_text(&mut self, text: &str) {
		self.text = text.chars().collect();
		self.cursor = 0;
		self.in_word = false;
		self.word.clear();
	}

	/// Shared alphabet.
	pub fn alphabet(&self) -> &Arc<Alphabet> {
		&self.alphabet
	}

	fn letter_at(&self, position: usize) -> Option<usize> {
		self.text.get(position).and_then(|&c| self.alphabet.index_of(c))
	}

	/// Moves the cursor forward past non-letters.
	///
	/// Returns the position of the first letter at or after the cursor, or
	/// `None` once the text is exhausted. A cursor already on a letter does
	/// not move.
	pub fn advance_to_word_start(&mut self) -> Option<usize> {
		while self.cursor < self.text.len() {
			if self.letter_at(self.cursor).is_some() {
				return Some(self.cursor);
			}
			self.cursor += 1;
		}
		None
	}

	/// Returns the next training window of at most `max_len` symbols.
	///
	/// An empty window means the text holds no more words.
	pub fn next_window(&mut self, max_len: usize) -> Vec<Symbol> {
		let first_of_word = !self.in_word;
		let mut window = Vec::with_capacity(max_len);

		if first_of_word {
			if self.advance_to_word_start().is_none() {
				return window;
			}
			self.word.clear();
			self.in_word = true;
			window.push(Symbol::Begin);
		}

		let mut position = self.cursor;
		while window.len() < max_len {
			match self.letter_at(position) {
				Some(index) => {
					window.push(Symbol::Letter(index));
					position += 1;
				}
				None => {
					window.push(Symbol::End);
					self.word.extend(&self.text[self.cursor..position]);
					self.cursor = position;
					self.finish_word();
					break;
				}
			}
		}

		// Slide one letter forward for the next window of the same word.
		if !first_of_word && self.in_word {
			self.word.push(self.text[self.cursor]);
			self.cursor += 1;
		}

		window
	}

	fn finish_word(&mut self) {
		self.in_word = false;
		let word = std::mem::take(&mut self.word);
		*self.word_lengths.entry(word.chars().count()).or_insert(0) += 1;
		self.vocabulary.insert(word);
		self.length_table = None;
	}

	/// Rebuilds the length table if training data changed since last use.
	///
	/// Lengths below 2 are left out: such words are never generated.
	pub fn refresh_length_table(&mut self) -> &Distribution<usize> {
		let word_lengths = &self.word_lengths;
		self.length_table.get_or_insert_with(|| {
			Distribution::from_weights(
				word_lengths
					.iter()
					.filter(|&(&length, _)| length > 1)
					.map(|(&length, &count)| (length, count)),
			)
		})
	}

	/// Draws a word length proportionally to the training histogram.
	///
	/// Returns `None` if no word of two letters or more was ever seen.
	pub fn sample_length<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<usize> {
		self.refresh_length_table().sample(rng)
	}

	/// Whether `word` never appeared in the training text.
	pub fn is_novel(&self, word: &str) -> bool {
		!self.vocabulary.contains(word)
	}

	/// Distinct training words seen so far.
	pub fn vocabulary(&self) -> &HashSet<String> {
		&self.vocabulary
	}

	/// Word length histogram.
	pub fn word_lengths(&self) -> &BTreeMap<usize, u64> {
		&self.word_lengths
	}
}
