use std::collections::VecDeque;

use super::vocabulary::TokenId;

/// Bounded FIFO of the most recent tokens.
///
/// Holds at most `capacity` ids, oldest first. Pushing into a full window
/// evicts the oldest id, so memory stays fixed for the whole stream.
#[derive(Clone, Debug)]
pub struct HistoryWindow {
	capacity: usize,
	tokens: VecDeque<TokenId>,
}

impl HistoryWindow {
	pub fn new(capacity: usize) -> Self {
		Self { capacity, tokens: VecDeque::with_capacity(capacity) }
	}

	pub fn capacity(&self) -> usize {
		self.capacity
	}

	pub fn len(&self) -> usize {
		self.tokens.len()
	}

	pub fn is_empty(&self) -> bool {
		self.tokens.is_empty()
	}

	/// Appends `id`, evicting the oldest entry when full.
	pub fn push(&mut self, id: TokenId) {
		if self.capacity == 0 {
			return;
		}
		if self.tokens.len() == self.capacity {
			self.tokens.pop_front();
		}
		self.tokens.push_back(id);
	}

	/// The last `k` ids, oldest first, or `None` if fewer are held.
	pub fn tail(&self, k: usize) -> Option<impl Iterator<Item = TokenId> + '_> {
		let len = self.tokens.len();
		if k > len {
			return None;
		}
		Some(self.tokens.range(len - k..).copied())
	}
}
