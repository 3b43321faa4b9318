//! Letter-sequence word generation library.
//!
//! This crate learns which letters follow which in a training text and
//! spells new, plausible words that the text does not contain:
//! - Word tokenization into sliding training windows
//! - A fixed-order context trie of transition counts
//! - Weighted random walks with re-anchoring past the trie depth
//! - Unique batch generation excluding training words

/// Core model and generation logic.
pub mod model;

/// Error type shared by the crate.
pub mod error;

/// I/O utilities (training text, alphabet files).
pub mod io;

pub use error::{WordgenError, WordgenResult};
pub use model::alphabet::{Alphabet, Symbol};
pub use model::generation_input::{BatchPolicy, GenerationInput, WordLength};
pub use model::generator::WordGenerator;
