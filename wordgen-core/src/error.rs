//! # Error Types

/// Errors from wordgen configuration and I/O.
///
/// Generation itself never fails with an error: an attempt that cannot
/// produce a word yields `None` and the caller retries.
#[derive(Debug, thiserror::Error)]
pub enum WordgenError {
	/// Model order below the minimum of 2.
	#[error("model order ({order}) must be >= 2")]
	InvalidModelOrder {
		/// The rejected order.
		order: usize,
	},

	/// Alphabet without any letter.
	#[error("alphabet must contain at least one letter")]
	EmptyAlphabet,

	/// A letter listed twice in an alphabet.
	#[error("letter '{0}' appears more than once in the alphabet")]
	DuplicateLetter(char),

	/// I/O error.
	#[error(transparent)]
	Io(#[from] std::io::Error),

	/// Malformed JSON input.
	#[error(transparent)]
	Json(#[from] serde_json::Error),
}

/// Result type for wordgen operations.
pub type WordgenResult<T> = Result<T, WordgenError>;
