//! Top-level module for the word generation system.
//!
//! This module provides:
//! - The modeled alphabet and its word markers (`Alphabet`, `Symbol`)
//! - Training window extraction and corpus statistics (`Tokenizer`)
//! - Fixed-order context trie with random walks (`ContextTrie`)
//! - Generation parameters (`GenerationInput`)
//! - A high-level training and generation interface (`WordGenerator`)

/// High-level interface: training, single words and unique batches.
pub mod generator;

/// Batch and length parameters for generation.
pub mod generation_input;

/// Fixed-order context trie.
///
/// Stores symbol-transition counts in an arena of nodes and drives the
/// random walk that spells new words.
pub mod trie;

/// Sliding training windows, vocabulary and word-length histogram.
pub mod tokenizer;

/// Modeled letters plus the word start and end markers.
pub mod alphabet;

/// Cumulative weight tables for weighted sampling.
pub mod distribution;
