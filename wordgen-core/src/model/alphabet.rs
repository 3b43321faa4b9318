use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{WordgenError, WordgenResult};

/// Lowercase then uppercase Russian letters, the default modeled alphabet.
const RUSSIAN_LETTERS: &str =
	"абвгдеёжзийклмнопрстуфхцчшщъыьэюяАБВГДЕЁЖЗИЙКЛМНОПРСТУФХЦЧШЩЪЫЬЭЮЯ";

/// Character printed for the word-start marker in diagnostics.
pub const BEGIN_DISPLAY: char = '{';

/// Character printed for the word-end marker in diagnostics.
pub const END_DISPLAY: char = '}';

/// One position in a training window or a trie path.
///
/// Real letters are addressed by their alphabet index; the two markers
/// delimit a word and never take part in weighted letter sampling.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Symbol {
	/// A modeled letter, by alphabet index.
	Letter(usize),
	/// Word start marker.
	Begin,
	/// Word end marker.
	End,
}

/// Fixed ordered set of modeled letters.
///
/// The letter to index mapping is built once when the alphabet is created
/// and is never rebuilt afterwards. Markers are appended after the letters:
/// `Begin` takes slot `len()`, `End` takes slot `len() + 1`.
///
/// # Invariants
/// - At least one letter
/// - Letters are pairwise distinct
#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(try_from = "AlphabetFile", into = "AlphabetFile")]
pub struct Alphabet {
	letters: Vec<char>,
	index: HashMap<char, usize>,
}

/// On-disk form of an alphabet: `{"letters": "abc..."}`.
#[derive(Serialize, Deserialize)]
struct AlphabetFile {
	letters: String,
}

impl TryFrom<AlphabetFile> for Alphabet {
	type Error = WordgenError;

	fn try_from(file: AlphabetFile) -> Result<Self, Self::Error> {
		Alphabet::new(&file.letters)
	}
}

impl From<Alphabet> for AlphabetFile {
	fn from(alphabet: Alphabet) -> Self {
		Self { letters: alphabet.letters.into_iter().collect() }
	}
}

impl Alphabet {
	/// Builds an alphabet from the letters of `letters`, in order.
	///
	/// # Errors
	/// - `EmptyAlphabet` if `letters` is empty
	/// - `DuplicateLetter` if a letter occurs twice
	pub fn new(letters: &str) -> WordgenResult<Self> {
		let letters: Vec<char> = letters.chars().collect();
		if letters.is_empty() {
			return Err(WordgenError::EmptyAlphabet);
		}

		let mut index = HashMap::with_capacity(letters.len());
		for (i, &c) in letters.iter().enumerate() {
			if index.insert(c, i).is_some() {
				return Err(WordgenError::DuplicateLetter(c));
			}
		}

		Ok(Self { letters, index })
	}

	/// The default alphabet: 66 Russian letters, lowercase first.
	pub fn russian() -> Self {
		let letters: Vec<char> = RUSSIAN_LETTERS.chars().collect();
		let index = letters.iter().enumerate().map(|(i, &c)| (c, i)).collect();
		Self { letters, index }
	}

	/// Number of real letters (markers excluded).
	pub fn len(&self) -> usize {
		self.letters.len()
	}

	/// Whether the alphabet has no letter. Never true for a built alphabet.
	pub fn is_empty(&self) -> bool {
		self.letters.is_empty()
	}

	/// Number of child slots a trie node needs: every letter plus both markers.
	pub fn slots(&self) -> usize {
		self.letters.len() + 2
	}

	/// Returns the index of `c`, or `None` if it is not a modeled letter.
	pub fn index_of(&self, c: char) -> Option<usize> {
		self.index.get(&c).copied()
	}

	/// Returns the letter at `index`.
	pub fn letter(&self, index: usize) -> Option<char> {
		self.letters.get(index).copied()
	}

	/// Whether `c` belongs to the alphabet.
	pub fn contains(&self, c: char) -> bool {
		self.index.contains_key(&c)
	}

	/// Dense slot of `symbol` in a children array.
	///
	/// Returns `None` for a letter index outside the alphabet, so a bad
	/// index can never land on a marker's slot.
	pub fn slot(&self, symbol: Symbol) -> Option<usize> {
		let n = self.letters.len();
		match symbol {
			Symbol::Letter(i) if i < n => Some(i),
			Symbol::Letter(_) => None,
			Symbol::Begin => Some(n),
			Symbol::End => Some(n + 1),
		}
	}

	/// Inverse of [`Alphabet::slot`]. Returns `None` past the last slot.
	pub fn symbol(&self, slot: usize) -> Option<Symbol> {
		let n = self.letters.len();
		match slot {
			s if s < n => Some(Symbol::Letter(s)),
			s if s == n => Some(Symbol::Begin),
			s if s == n + 1 => Some(Symbol::End),
			_ => None,
		}
	}

	/// Character used to print `symbol` in diagnostics.
	///
	/// Out of range letter indices print as `'\0'`.
	pub fn display(&self, symbol: Symbol) -> char {
		match symbol {
			Symbol::Letter(i) => self.letter(i).unwrap_or('\0'),
			Symbol::Begin => BEGIN_DISPLAY,
			Symbol::End => END_DISPLAY,
		}
	}
}

impl Default for Alphabet {
	fn default() -> Self {
		Self::russian()
	}
}
