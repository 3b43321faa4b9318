use rand::Rng;

/// Cumulative frequency table for weighted random sampling.
///
/// Built from `(value, weight)` pairs in a fixed order. Each stored entry
/// pairs a running total with the value whose weight closed it, so a draw
/// `r` in `[0, total)` selects the first entry whose running total
/// exceeds `r` (inverse CDF). On a boundary draw the earlier entry loses:
/// `r == cumulative` moves on to the next bucket.
///
/// ## Invariants
/// - Running totals are strictly increasing (zero weights are skipped)
/// - `total` equals the last running total, or 0 when empty
#[derive(Clone, Debug)]
pub struct Distribution<T> {
	/// `(running total, value)`, ordered by running total.
	cumulative: Vec<(u64, T)>,
	total: u64,
}

impl<T: Copy> Distribution<T> {
	/// Builds the table from weighted values, in iteration order.
	pub fn from_weights<I>(weights: I) -> Self
	where
		I: IntoIterator<Item = (T, u64)>,
	{
		let mut cumulative = Vec::new();
		let mut total = 0;
		for (value, weight) in weights {
			if weight == 0 {
				continue;
			}
			total += weight;
			cumulative.push((total, value));
		}
		Self { cumulative, total }
	}

	/// Sum of all weights.
	pub fn total(&self) -> u64 {
		self.total
	}

	/// Whether no value carries weight.
	pub fn is_empty(&self) -> bool {
		self.total == 0
	}

	/// Returns the value whose bucket covers `draw`.
	///
	/// Returns `None` if `draw >= total`.
	pub fn select(&self, draw: u64) -> Option<T> {
		let position = self.cumulative.partition_point(|(running, _)| *running <= draw);
		self.cumulative.get(position).map(|(_, value)| *value)
	}

	/// Draws a value with probability proportional to its weight.
	///
	/// Returns `None` if the table carries no weight; no random number is
	/// consumed in that case.
	pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<T> {
		if self.total == 0 {
			return None;
		}
		self.select(rng.random_range(0..self.total))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rand::SeedableRng;
	use rand::rngs::StdRng;

	#[test]
	fn test_select_boundaries() {
		let table = Distribution::from_weights([('a', 0), ('b', 3), ('c', 0), ('d', 2)]);
		assert_eq!(table.total(), 5);
		assert_eq!(table.select(0), Some('b'));
		assert_eq!(table.select(2), Some('b'));
		assert_eq!(table.select(3), Some('d'));
		assert_eq!(table.select(4), Some('d'));
		assert_eq!(table.select(5), None);
	}

	#[test]
	fn test_empty_table() {
		let table: Distribution<usize> = Distribution::from_weights([(0, 0), (1, 0)]);
		assert!(table.is_empty());
		let mut rng = StdRng::seed_from_u64(7);
		assert_eq!(table.sample(&mut rng), None);
	}

	#[test]
	fn test_sampling_frequencies() {
		let weights = [(0usize, 1u64), (1, 2), (2, 7)];
		let table = Distribution::from_weights(weights);
		let mut rng = StdRng::seed_from_u64(42);

		let draws = 100_000;
		let mut seen = [0usize; 3];
		for _ in 0..draws {
			seen[table.sample(&mut rng).unwrap()] += 1;
		}

		for (value, weight) in weights {
			let expected = weight as f64 / 10.0;
			let observed = seen[value] as f64 / draws as f64;
			assert!((observed - expected).abs() < 0.01, "value {value}: {observed} vs {expected}");
		}
	}
}
