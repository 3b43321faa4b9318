use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

use rand::Rng;

use crate::error::{WordgenError, WordgenResult};
use crate::model::alphabet::{Alphabet, Symbol};
use crate::model::generation_input::{BatchPolicy, GenerationInput, WordLength};
use crate::model::tokenizer::Tokenizer;
use crate::model::trie::ContextTrie;

/// Shortest word ever generated.
pub const MIN_WORD_LENGTH: usize = 2;

/// High-level word generator: a trained context trie plus the corpus
/// statistics collected while training it.
///
/// # Responsibilities
/// - Feed training text through the tokenizer into the trie
/// - Generate words of a fixed or sampled length, with retries
/// - Generate batches of unique words absent from the training text
#[derive(Debug)]
pub struct WordGenerator {
	trie: ContextTrie,
	tokenizer: Tokenizer,
}

impl WordGenerator {
	/// Creates an untrained generator.
	///
	/// `model_order` is the number of symbols a context remembers
	/// (the trie depth), markers included.
	///
	/// # Errors
	/// Returns an error if `model_order < 2`.
	pub fn new(alphabet: Alphabet, model_order: usize) -> WordgenResult<Self> {
		if model_order < 2 {
			return Err(WordgenError::InvalidModelOrder { order: model_order });
		}
		let alphabet = Arc::new(alphabet);
		Ok(Self {
			trie: ContextTrie::new(alphabet.clone(), model_order),
			tokenizer: Tokenizer::new(alphabet),
		})
	}

	/// Model order (trie depth).
	pub fn model_order(&self) -> usize {
		self.trie.max_depth()
	}

	/// Alphabet shared by the trie and the tokenizer.
	pub fn alphabet(&self) -> &Alphabet {
		self.trie.alphabet()
	}

	/// Read access to the trained trie.
	pub fn trie(&self) -> &ContextTrie {
		&self.trie
	}

	/// Number of distinct training words.
	pub fn vocabulary_size(&self) -> usize {
		self.tokenizer.vocabulary().len()
	}

	/// Whether `word` appeared in the training text.
	pub fn contains_word(&self, word: &str) -> bool {
		!self.tokenizer.is_novel(word)
	}

	/// Word length histogram of the training text.
	pub fn word_lengths(&self) -> &BTreeMap<usize, u64> {
		self.tokenizer.word_lengths()
	}

	/// Learns from `text`, on top of everything learned before.
	///
	/// Returns the number of training windows registered.
	pub fn train(&mut self, text: &str) -> usize {
		self.trie.begin_training();
		self.tokenizer.set_text(text);

		let order = self.trie.max_depth();
		let mut windows = 0;
		loop {
			let window = self.tokenizer.next_window(order);
			if window.is_empty() {
				break;
			}
			self.trie.register(&window);
			windows += 1;
		}

		log::info!(
			"Trained on {} windows: {} distinct words, {} trie nodes",
			windows,
			self.vocabulary_size(),
			self.trie.node_count()
		);
		windows
	}

	/// Generates one word, retrying up to `max_attempts` times.
	///
	/// Returns `None` if the length is below 2, if no length can be sampled
	/// (nothing trained), or if every attempt failed. An explicit length
	/// below 2 is rejected before any random draw.
	pub fn generate_word<R: Rng + ?Sized>(
		&mut self,
		rng: &mut R,
		max_attempts: usize,
		length: WordLength,
	) -> Option<String> {
		let length = match length {
			WordLength::Exact(length) => length,
			WordLength::Sampled => self.tokenizer.sample_length(rng)?,
		};
		if length < MIN_WORD_LENGTH {
			return None;
		}

		for attempt in 1..=max_attempts {
			match self.trie.attempt_word(length, rng) {
				Some(word) => return Some(word),
				None => log::trace!("Attempt {} for a {}-letter word failed", attempt, length),
			}
		}

		log::debug!("No {}-letter word after {} attempts", length, max_attempts);
		None
	}

	/// Generates distinct words that never appeared in the training text.
	///
	/// Words come out in generation order. `policy` decides when to stop;
	/// the result may hold fewer than `count` words.
	pub fn generate_unique_words<R: Rng + ?Sized>(
		&mut self,
		rng: &mut R,
		count: usize,
		length: WordLength,
		max_attempts: usize,
		policy: BatchPolicy,
	) -> Vec<String> {
		let mut accepted = Vec::with_capacity(count);
		let mut seen = HashSet::new();

		match policy {
			BatchPolicy::Rounds => {
				for _ in 0..=count {
					let candidate = self.generate_word(rng, max_attempts, length);
					self.offer(candidate, &mut seen, &mut accepted);
				}
			}
			BatchPolicy::Accepted { max_stalled_rounds } => {
				let mut stalled = 0;
				while accepted.len() < count {
					let candidate = self.generate_word(rng, max_attempts, length);
					if self.offer(candidate, &mut seen, &mut accepted) {
						stalled = 0;
						continue;
					}
					stalled += 1;
					if stalled >= max_stalled_rounds {
						log::debug!("Giving up after {} rounds without a new word", stalled);
						break;
					}
				}
			}
		}

		log::debug!("Generated {} of {} requested words", accepted.len(), count);
		accepted
	}

	/// Runs a batch described by `input`.
	pub fn generate<R: Rng + ?Sized>(
		&mut self,
		rng: &mut R,
		input: &GenerationInput,
	) -> Vec<String> {
		self.generate_unique_words(
			rng,
			input.count,
			input.length,
			input.max_attempts(),
			input.policy,
		)
	}

	/// Keeps `candidate` if it is new to both the batch and the training text.
	fn offer(
		&self,
		candidate: Option<String>,
		seen: &mut HashSet<String>,
		accepted: &mut Vec<String>,
	) -> bool {
		match candidate {
			Some(word) if self.tokenizer.is_novel(&word) && seen.insert(word.clone()) => {
				accepted.push(word);
				true
			}
			_ => false,
		}
	}

	/// Visits every registered training path, see [`ContextTrie::for_each_path`].
	pub fn for_each_path<F>(&self, visitor: F)
	where
		F: FnMut(&[Symbol]),
	{
		self.trie.for_each_path(visitor);
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rand::SeedableRng;
	use rand::rngs::StdRng;

	fn trained(letters: &str, order: usize, text: &str) -> WordGenerator {
		let mut generator = WordGenerator::new(Alphabet::new(letters).unwrap(), order).unwrap();
		generator.train(text);
		generator
	}

	#[test]
	fn test_rejects_low_order() {
		assert!(matches!(
			WordGenerator::new(Alphabet::russian(), 1),
			Err(WordgenError::InvalidModelOrder { order: 1 })
		));
		assert!(WordGenerator::new(Alphabet::russian(), 2).is_ok());
	}

	#[test]
	fn test_train_counts_windows() {
		let mut generator = WordGenerator::new(Alphabet::russian(), 4).unwrap();
		assert_eq!(generator.train("кот"), 2);
		assert_eq!(generator.vocabulary_size(), 1);
		assert!(generator.contains_word("кот"));
		assert_eq!(generator.word_lengths().get(&3), Some(&1));
	}

	#[test]
	fn test_untrained_generates_nothing() {
		let mut rng = StdRng::seed_from_u64(1);
		let mut generator = WordGenerator::new(Alphabet::russian(), 3).unwrap();
		assert_eq!(generator.generate_word(&mut rng, 10, WordLength::Sampled), None);
		assert_eq!(generator.generate_word(&mut rng, 10, WordLength::Exact(4)), None);
		let batch = generator.generate_unique_words(
			&mut rng,
			5,
			WordLength::Sampled,
			10,
			BatchPolicy::default(),
		);
		assert!(batch.is_empty());
	}

	#[test]
	fn test_short_lengths_draw_nothing() {
		let mut generator = trained("ab", 3, "ab ba abba baab");
		let mut rng = StdRng::seed_from_u64(5);
		let mut reference = StdRng::seed_from_u64(5);

		assert_eq!(generator.generate_word(&mut rng, 50, WordLength::Exact(0)), None);
		assert_eq!(generator.generate_word(&mut rng, 50, WordLength::Exact(1)), None);
		assert_eq!(rng.random::<u64>(), reference.random::<u64>());
	}

	#[test]
	fn test_exact_length() {
		let mut generator = trained("abc", 3, "abc bca cab acb bac cba abcabc");
		let mut rng = StdRng::seed_from_u64(9);
		let mut produced = 0;
		for length in 2..8 {
			for _ in 0..20 {
				let word = generator.generate_word(&mut rng, 100, WordLength::Exact(length));
				if let Some(word) = word {
					assert_eq!(word.chars().count(), length);
					produced += 1;
				}
			}
		}
		assert!(produced > 0);
	}

	#[test]
	fn test_single_word_corpus_reproduces_it() {
		// With one training word every walk follows that word.
		let mut generator = trained("кот", 4, "кот");
		let mut rng = StdRng::seed_from_u64(2);
		let word = generator.generate_word(&mut rng, 5, WordLength::Sampled);
		assert_eq!(word, Some("кот".to_owned()));

		let batch = generator.generate_unique_words(
			&mut rng,
			3,
			WordLength::Sampled,
			5,
			BatchPolicy::default(),
		);
		assert!(batch.is_empty());
	}

	#[test]
	fn test_unique_words_are_novel() {
		let text = "abacab bacaba cabab abcab bacab acaba cabac abbac";
		let mut generator = trained("abc", 3, text);
		let mut rng = StdRng::seed_from_u64(77);

		for policy in [BatchPolicy::default(), BatchPolicy::Rounds] {
			let batch =
				generator.generate_unique_words(&mut rng, 30, WordLength::Sampled, 100, policy);
			let distinct: HashSet<&String> = batch.iter().collect();
			assert_eq!(distinct.len(), batch.len());
			for word in &batch {
				assert!(!generator.contains_word(word), "{word} is a training word");
				assert!(word.chars().count() >= 2);
			}
		}
	}

	#[test]
	fn test_rounds_policy_bounds_batch() {
		let mut generator = trained("ab", 2, "ab ba aab bba abab");
		let mut rng = StdRng::seed_from_u64(4);
		let batch = generator.generate_unique_words(
			&mut rng,
			3,
			WordLength::Exact(5),
			50,
			BatchPolicy::Rounds,
		);
		assert!(batch.len() <= 4);
	}

	#[test]
	fn test_accepted_policy_fills_batch() {
		let mut generator = trained("ab", 2, "ab ba aab bba abab");
		let mut rng = StdRng::seed_from_u64(4);
		let batch = generator.generate_unique_words(
			&mut rng,
			10,
			WordLength::Exact(8),
			50,
			BatchPolicy::default(),
		);
		assert_eq!(batch.len(), 10);
	}

	#[test]
	fn test_retraining_updates_distributions() {
		let mut generator = trained("ab", 3, "aa");
		let mut rng = StdRng::seed_from_u64(6);
		let word = generator.generate_word(&mut rng, 10, WordLength::Exact(2));
		assert_eq!(word, Some("aa".to_owned()));

		// After more `bb` words than `aa` ones, `b` must show up at the start.
		generator.train("bb bb bb bb bb bb bb bb bb");
		let mut saw_b = false;
		for _ in 0..50 {
			if let Some(word) = generator.generate_word(&mut rng, 10, WordLength::Exact(2)) {
				saw_b |= word == "bb";
			}
		}
		assert!(saw_b);
		assert_eq!(generator.vocabulary_size(), 2);
	}
}
