use std::borrow::Borrow;
use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::vocabulary::TokenId;

/// An ordered, fixed-length sequence of token ids.
///
/// Two n-grams are equal iff every position matches. `NGram` borrows as
/// `[TokenId]`, so tables can be queried with a slice of the history window
/// without allocating.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Hash)]
pub struct NGram(Box<[TokenId]>);

impl NGram {
	pub fn order(&self) -> usize {
		self.0.len()
	}

	pub fn ids(&self) -> &[TokenId] {
		&self.0
	}

	/// All but the last token; `None` for unigrams.
	pub fn history(&self) -> Option<&[TokenId]> {
		match self.0.len() {
			0 | 1 => None,
			n => Some(&self.0[..n - 1]),
		}
	}

	/// The predicted (last) token.
	pub fn last(&self) -> TokenId {
		// Tables never hold empty keys
		self.0[self.0.len() - 1]
	}
}

impl From<&[TokenId]> for NGram {
	fn from(ids: &[TokenId]) -> Self {
		Self(ids.into())
	}
}

impl Borrow<[TokenId]> for NGram {
	fn borrow(&self) -> &[TokenId] {
		&self.0
	}
}

/// Occurrence counts for every n-gram of one order.
///
/// # Invariants
/// - Every key has exactly `order` tokens
/// - Every stored count is >= 1
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct CountTable {
	order: usize,
	counts: HashMap<NGram, u64>,
}

impl CountTable {
	pub fn new(order: usize) -> Self {
		Self { order, counts: HashMap::new() }
	}

	pub fn order(&self) -> usize {
		self.order
	}

	/// Records one occurrence of `ids` and returns the updated count.
	pub fn increment(&mut self, ids: &[TokenId]) -> u64 {
		debug_assert_eq!(ids.len(), self.order, "n-gram length must match the table order");

		if let Some(count) = self.counts.get_mut(ids) {
			*count += 1;
			return *count;
		}
		self.counts.insert(NGram::from(ids), 1);
		1
	}

	/// Count of `ids`, 0 if absent.
	pub fn get(&self, ids: &[TokenId]) -> u64 {
		self.counts.get(ids).copied().unwrap_or(0)
	}

	/// Number of distinct n-grams stored.
	pub fn len(&self) -> usize {
		self.counts.len()
	}

	pub fn is_empty(&self) -> bool {
		self.counts.is_empty()
	}

	pub fn iter(&self) -> impl Iterator<Item = (&NGram, u64)> {
		self.counts.iter().map(|(ngram, count)| (ngram, *count))
	}

	/// Drops every entry seen exactly once.
	///
	/// Returns the number of evicted entries.
	pub fn retain_frequent(&mut self) -> usize {
		let before = self.counts.len();
		self.counts.retain(|_, count| *count > 1);
		before - self.counts.len()
	}
}
