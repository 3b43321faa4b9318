use std::collections::HashSet;

use rand::SeedableRng;
use rand::rngs::StdRng;
use wordgen_core::model::trie::NodeId;
use wordgen_core::{Alphabet, BatchPolicy, GenerationInput, Symbol, WordGenerator, WordLength};

const CORPUS: &str = "\
	В лесу родилась ёлочка, в лесу она росла. Зимой и летом стройная, \
	зелёная была. Метель ей пела песенку: спи, ёлочка, бай-бай! Мороз \
	снежком укутывал: смотри, не замерзай! Трусишка зайка серенький \
	под ёлочкой скакал. Порою волк, сердитый волк, рысцою пробегал.";

fn trained(order: usize) -> WordGenerator {
	let mut generator = WordGenerator::new(Alphabet::russian(), order).unwrap();
	generator.train(CORPUS);
	generator
}

#[test]
fn test_batch_is_novel_and_unique() {
	let mut generator = trained(3);
	let mut rng = StdRng::seed_from_u64(2024);

	let mut input = GenerationInput::new(40);
	input.set_max_attempts(200);
	let words = generator.generate(&mut rng, &input);

	assert!(!words.is_empty());
	let distinct: HashSet<&str> = words.iter().map(String::as_str).collect();
	assert_eq!(distinct.len(), words.len());
	for word in &words {
		assert!(!generator.contains_word(word), "{word} leaked from the corpus");
		assert!(word.chars().count() >= 2);
		assert!(word.chars().all(|c| generator.alphabet().contains(c)));
	}
}

#[test]
fn test_generated_words_end_on_evidence() {
	let mut generator = trained(4);
	let mut rng = StdRng::seed_from_u64(7);
	let context = generator.model_order() - 1;

	for _ in 0..200 {
		let Some(word) = generator.generate_word(&mut rng, 100, WordLength::Sampled) else {
			continue;
		};
		let letters: Vec<char> = word.chars().collect();
		// Short words never leave the fixed-depth descent.
		let node = if letters.len() < context {
			generator.trie().locate(true, &word)
		} else {
			let tail: String = letters[letters.len() - context..].iter().collect();
			generator.trie().locate(false, &tail)
		};
		assert!(generator.trie().has_end_marker(node.unwrap()), "{word}");
	}
}

#[test]
fn test_sampled_lengths_follow_corpus() {
	let mut generator = trained(3);
	let mut rng = StdRng::seed_from_u64(11);
	let longest = *generator.word_lengths().keys().max().unwrap();

	for _ in 0..100 {
		if let Some(word) = generator.generate_word(&mut rng, 100, WordLength::Sampled) {
			let length = word.chars().count();
			assert!(length >= 2 && length <= longest);
			assert!(generator.word_lengths().contains_key(&length));
		}
	}
}

#[test]
fn test_same_seed_same_words() {
	let mut first = trained(3);
	let mut second = trained(3);
	let input = GenerationInput::new(15);

	let a = first.generate(&mut StdRng::seed_from_u64(5), &input);
	let b = second.generate(&mut StdRng::seed_from_u64(5), &input);
	assert_eq!(a, b);
}

#[test]
fn test_cumulative_training() {
	let mut generator = WordGenerator::new(Alphabet::russian(), 3).unwrap();
	generator.train("кот");
	generator.train("кит");
	assert_eq!(generator.vocabulary_size(), 2);
	assert_eq!(generator.trie().child_hits(NodeId::ROOT, Symbol::Begin), 2);

	// Windows of one pass never run into the next pass's text.
	assert_eq!(generator.trie().locate(false, "тк"), None);

	let mut rng = StdRng::seed_from_u64(3);
	let words =
		generator.generate_unique_words(&mut rng, 1, WordLength::Exact(3), 50, BatchPolicy::Rounds);
	assert!(words.iter().all(|w| w != "кот" && w != "кит"));
}

#[test]
fn test_dump_paths() {
	let generator = trained(3);
	let alphabet = generator.alphabet();
	let mut lines = Vec::new();
	generator.for_each_path(|path| {
		lines.push(path.iter().map(|&s| alphabet.display(s)).collect::<String>());
	});

	assert!(lines.iter().any(|l| l.starts_with('{')));
	assert!(lines.iter().any(|l| l.ends_with('}')));
	assert!(lines.iter().all(|l| l.chars().count() <= 3));
	assert!(lines.contains(&"{ле".to_owned()));
}
