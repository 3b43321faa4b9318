/// Length of the words to generate.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum WordLength {
	/// Draw a length per word from the training length histogram.
	#[default]
	Sampled,
	/// Exactly this many letters. Lengths below 2 never produce a word.
	Exact(usize),
}

impl From<Option<usize>> for WordLength {
	fn from(length: Option<usize>) -> Self {
		length.map_or(WordLength::Sampled, WordLength::Exact)
	}
}

/// When a batch of unique words stops generating.
///
/// # Variants
/// - `Accepted`: stop once `count` words were accepted, or after
///   `max_stalled_rounds` consecutive rounds without a new word.
/// - `Rounds`: run exactly `count + 1` rounds and keep whatever was
///   accepted. Duplicates and training words make the batch shorter.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum BatchPolicy {
	Accepted { max_stalled_rounds: usize },
	Rounds,
}

/// Default number of fruitless rounds before an `Accepted` batch gives up.
pub const DEFAULT_MAX_STALLED_ROUNDS: usize = 100;

impl Default for BatchPolicy {
	fn default() -> Self {
		BatchPolicy::Accepted { max_stalled_rounds: DEFAULT_MAX_STALLED_ROUNDS }
	}
}

/// Parameters of a batch generation.
///
/// # Invariants
/// - `max_attempts >= 1` (a zero value is raised to 1 by the setter)
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GenerationInput {
	/// Number of words wanted.
	pub count: usize,

	/// Length of each word.
	pub length: WordLength,

	/// Attempts allowed per word before giving up on it.
	max_attempts: usize,

	/// Stopping rule of the batch.
	pub policy: BatchPolicy,
}

impl GenerationInput {
	/// Creates a batch request for `count` words with default settings.
	pub fn new(count: usize) -> Self {
		Self { count, ..Self::default() }
	}

	/// Attempts allowed per word.
	pub fn max_attempts(&self) -> usize {
		self.max_attempts
	}

	/// Sets the attempts allowed per word, at least 1.
	pub fn set_max_attempts(&mut self, max_attempts: usize) {
		self.max_attempts = max_attempts.max(1);
	}
}

impl Default for GenerationInput {
	fn default() -> Self {
		Self {
			count: 100,
			length: WordLength::Sampled,
			max_attempts: 100,
			policy: BatchPolicy::default(),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_defaults() {
		let input = GenerationInput::new(7);
		assert_eq!(input.count, 7);
		assert_eq!(input.length, WordLength::Sampled);
		assert_eq!(input.max_attempts(), 100);
		assert_eq!(input.policy, BatchPolicy::Accepted { max_stalled_rounds: 100 });
	}

	#[test]
	fn test_max_attempts_floor() {
		let mut input = GenerationInput::default();
		input.set_max_attempts(0);
		assert_eq!(input.max_attempts(), 1);
	}

	#[test]
	fn test_length_from_option() {
		assert_eq!(WordLength::from(None), WordLength::Sampled);
		assert_eq!(WordLength::from(Some(5)), WordLength::Exact(5));
	}
}
