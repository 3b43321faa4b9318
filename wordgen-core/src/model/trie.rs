use std::collections::VecDeque;
use std::sync::Arc;

use rand::Rng;

use super::alphabet::{Alphabet, Symbol};
use super::distribution::Distribution;

/// Handle to a node of a [`ContextTrie`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

impl NodeId {
	/// The root node (depth 0, empty context).
	pub const ROOT: NodeId = NodeId(0);
}

/// Letter table of a node, tagged with the training epoch it was built in.
#[derive(Clone, Debug)]
struct Cached {
	epoch: u64,
	table: Distribution<usize>,
}

/// A node of the context trie.
///
/// The path from the root to a node is a context: the symbols observed
/// right before whatever the node's children describe.
#[derive(Clone, Debug)]
struct Node {
	depth: usize,
	/// How many training windows started with this node's path.
	hits: u64,
	/// One slot per alphabet letter plus both markers, allocated on the
	/// first registered child. A missing node is a slot with zero hits.
	children: Option<Box<[Option<NodeId>]>>,
	/// Letter sampling table, valid only for the epoch it carries.
	letters: Option<Cached>,
}

impl Node {
	fn new(depth: usize) -> Self {
		Self { depth, hits: 0, children: None, letters: None }
	}
}

/// Fixed-order trie of symbol-transition counts.
///
/// Training registers every window as a root-to-node path, incrementing
/// the hit counter of each node on the way. Generation walks the trie at
/// random: each step picks a real letter among the children of the
/// current node, weighted by their hit counts.
///
/// Nodes live in an arena and refer to their children by index; the whole
/// tree is dropped with the trie.
///
/// ## Invariants
/// - The root has depth 0, a child is one deeper than its parent
/// - A node is only ever allocated with at least one hit
/// - `Begin` only occurs as a child of the root
/// - Letter tables from an older epoch are never used for sampling
/// - Every child slot is a letter of the alphabet or a marker
#[derive(Clone, Debug)]
pub struct ContextTrie {
	alphabet: Arc<Alphabet>,
	max_depth: usize,
	nodes: Vec<Node>,
	/// Bumped at the start of every training pass.
	epoch: u64,
}

impl ContextTrie {
	/// Creates an empty trie remembering contexts of up to `max_depth` symbols.
	pub fn new(alphabet: Arc<Alphabet>, max_depth: usize) -> Self {
		Self { alphabet, max_depth, nodes: vec![Node::new(0)], epoch: 0 }
	}

	/// Maximum depth (model order).
	pub fn max_depth(&self) -> usize {
		self.max_depth
	}

	/// Shared alphabet.
	pub fn alphabet(&self) -> &Arc<Alphabet> {
		&self.alphabet
	}

	/// Number of allocated nodes, root included.
	pub fn node_count(&self) -> usize {
		self.nodes.len()
	}

	/// Marks every letter table as stale.
	///
	/// Must be called before registering the windows of a training pass.
	pub fn begin_training(&mut self) {
		self.epoch += 1;
	}

	/// Depth of `node`.
	pub fn depth(&self, node: NodeId) -> usize {
		self.nodes[node.0].depth
	}

	/// Number of training windows that went through `node`.
	pub fn hits(&self, node: NodeId) -> u64 {
		self.nodes[node.0].hits
	}

	/// Child of `node` reached through `symbol`, if it was ever registered.
	pub fn child(&self, node: NodeId, symbol: Symbol) -> Option<NodeId> {
		let slot = self.alphabet.slot(symbol)?;
		self.nodes[node.0].children.as_ref()?.get(slot).copied().flatten()
	}

	/// Hits of the child of `node` reached through `symbol`, 0 if absent.
	pub fn child_hits(&self, node: NodeId, symbol: Symbol) -> u64 {
		self.child(node, symbol).map_or(0, |child| self.hits(child))
	}

	/// Whether `node` has no registered child.
	pub fn is_leaf(&self, node: NodeId) -> bool {
		self.nodes[node.0].children.is_none()
	}

	/// Registers one training window as a path from the root.
	///
	/// Each node along the path, created on demand, gains one hit. Symbols
	/// past `max_depth` are ignored. A window holding a letter outside the
	/// alphabet is rejected whole and `false` is returned.
	pub fn register(&mut self, window: &[Symbol]) -> bool {
		let Some(slots) = window
			.iter()
			.take(self.max_depth)
			.map(|&symbol| self.alphabet.slot(symbol))
			.collect::<Option<Vec<_>>>()
		else {
			log::debug!("Skipping a window with a letter outside the alphabet");
			return false;
		};

		let mut current = NodeId::ROOT;
		for slot in slots {
			current = self.register_child(current, slot);
		}
		true
	}

	fn register_child(&mut self, parent: NodeId, slot: usize) -> NodeId {
		let slots = self.alphabet.slots();
		let depth = self.nodes[parent.0].depth + 1;

		let existing = self.nodes[parent.0]
			.children
			.get_or_insert_with(|| vec![None; slots].into_boxed_slice())[slot];

		let child = match existing {
			Some(child) => child,
			None => {
				let child = NodeId(self.nodes.len());
				self.nodes.push(Node::new(depth));
				if let Some(children) = self.nodes[parent.0].children.as_mut() {
					children[slot] = Some(child);
				}
				child
			}
		};
		self.nodes[child.0].hits += 1;
		child
	}

	/// Returns the letter table of `node`, rebuilding it if stale.
	///
	/// Only real letters are weighted; both markers are left out.
	pub fn refresh_distribution(&mut self, node: NodeId) -> &Distribution<usize> {
		let cached = match self.nodes[node.0].letters.take() {
			Some(cached) if cached.epoch == self.epoch => cached,
			_ => Cached { epoch: self.epoch, table: self.letter_table(node) },
		};
		&self.nodes[node.0].letters.insert(cached).table
	}

	fn letter_table(&self, node: NodeId) -> Distribution<usize> {
		Distribution::from_weights(
			(0..self.alphabet.len()).map(|i| (i, self.child_hits(node, Symbol::Letter(i)))),
		)
	}

	/// Draws the index of a real letter following `node`'s context.
	///
	/// Returns `None` if no letter was ever observed after this context.
	pub fn sample_letter<R: Rng + ?Sized>(&mut self, node: NodeId, rng: &mut R) -> Option<usize> {
		self.refresh_distribution(node).sample(rng)
	}

	/// Finds the node for a context given as letter indices.
	///
	/// With `word_start`, the context is anchored right after `Begin`;
	/// otherwise it starts at the root. Fails if any step has no hits.
	/// An empty `suffix` yields the starting node itself.
	pub fn locate_letters(&self, word_start: bool, suffix: &[usize]) -> Option<NodeId> {
		let mut current = NodeId::ROOT;
		if word_start {
			current = self.child(current, Symbol::Begin)?;
		}
		for &letter in suffix {
			current = self.child(current, Symbol::Letter(letter))?;
		}
		Some(current)
	}

	/// Finds the node for a context given as text.
	///
	/// Fails on any character outside the alphabet.
	pub fn locate(&self, word_start: bool, suffix: &str) -> Option<NodeId> {
		let letters = suffix
			.chars()
			.map(|c| self.alphabet.index_of(c))
			.collect::<Option<Vec<_>>>()?;
		self.locate_letters(word_start, &letters)
	}

	/// Whether training saw a word end right after `node`'s context.
	pub fn has_end_marker(&self, node: NodeId) -> bool {
		self.child_hits(node, Symbol::End) > 0
	}

	/// Tries once to build a word of exactly `length` letters.
	///
	/// The walk starts right after `Begin` and follows sampled letters down
	/// the trie until the deepest sampling level (`max_depth - 1`) is
	/// reached. From there on, every step re-anchors: it looks up the node
	/// of the trailing context and samples from it. The first re-anchor
	/// still includes the word start; the later ones use the last
	/// `max_depth - 1` letters. The word is accepted only if training saw a
	/// word end after its final context.
	pub fn attempt_word<R: Rng + ?Sized>(&mut self, length: usize, rng: &mut R) -> Option<String> {
		if length == 0 {
			return None;
		}

		let mut current = self.child(NodeId::ROOT, Symbol::Begin)?;
		let mut word = String::with_capacity(length);
		let mut context: VecDeque<usize> = VecDeque::with_capacity(self.max_depth);

		while self.depth(current) + 1 < self.max_depth && context.len() < length {
			let letter = self.sample_letter(current, rng)?;
			self.push_letter(&mut word, letter);
			context.push_back(letter);
			current = self.child(current, Symbol::Letter(letter))?;
		}
		let mut emitted = context.len();

		let mut word_start = true;
		while emitted < length {
			let anchor = self.locate_letters(word_start, context.make_contiguous())?;
			let letter = self.sample_letter(anchor, rng)?;
			self.push_letter(&mut word, letter);
			if !word_start {
				context.pop_front();
			}
			context.push_back(letter);
			word_start = false;
			emitted += 1;
		}

		let last = self.locate_letters(word_start, context.make_contiguous())?;
		self.has_end_marker(last).then_some(word)
	}

	fn push_letter(&self, word: &mut String, letter: usize) {
		if let Some(c) = self.alphabet.letter(letter) {
			word.push(c);
		}
	}

	/// Visits every registered path that ends in a leaf, depth first.
	///
	/// Children are visited in slot order: letters, then `Begin`, then `End`.
	/// Nodes without hits are skipped; an untrained trie has no path.
	pub fn for_each_path<F>(&self, mut visitor: F)
	where
		F: FnMut(&[Symbol]),
	{
		if self.is_leaf(NodeId::ROOT) {
			return;
		}
		let mut path = Vec::with_capacity(self.max_depth);
		self.walk(NodeId::ROOT, &mut path, &mut visitor);
	}

	fn walk<F>(&self, node: NodeId, path: &mut Vec<Symbol>, visitor: &mut F)
	where
		F: FnMut(&[Symbol]),
	{
		let Some(children) = self.nodes[node.0].children.as_ref() else {
			visitor(path);
			return;
		};
		for (slot, child) in children.iter().enumerate() {
			let (Some(child), Some(symbol)) = (child, self.alphabet.symbol(slot)) else {
				continue;
			};
			if self.hits(*child) == 0 {
				continue;
			}
			path.push(symbol);
			self.walk(*child, path, visitor);
			path.pop();
		}
	}
}
