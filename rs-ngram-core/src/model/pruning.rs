use serde::{Deserialize, Serialize};

use super::ngram::CountTable;

/// Lossy, best-effort cap on the number of distinct n-grams per order.
///
/// Whenever a table grows past `max_unique`, every entry seen exactly once is
/// evicted. Entries with a count >= 2 are never touched, so a table may stay
/// above the cap. An evicted n-gram that occurs again starts over at 1, which
/// means rare n-grams can be undercounted while pruning is active.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PruningPolicy {
	max_unique: Option<usize>,
}

impl PruningPolicy {
	/// No cap.
	pub fn unbounded() -> Self {
		Self { max_unique: None }
	}

	pub fn new(max_unique: Option<usize>) -> Self {
		Self { max_unique }
	}

	pub fn max_unique(&self) -> Option<usize> {
		self.max_unique
	}

	/// Evicts singletons from `table` if it exceeds the cap.
	///
	/// Returns the number of evicted entries (0 when within the cap or disabled).
	pub fn apply(&self, table: &mut CountTable) -> usize {
		let Some(max_unique) = self.max_unique else {
			return 0;
		};
		if table.len() <= max_unique {
			return 0;
		}

		let before = table.len();
		let evicted = table.retain_frequent();
		log::debug!(
			"Pruned {} singleton {}-grams ({} -> {} entries, cap {})",
			evicted,
			table.order(),
			before,
			table.len(),
			max_unique
		);
		evicted
	}
}
