use std::io;

use serde::{Deserialize, Serialize};

use crate::error::NGramError;
use super::ngram::{CountTable, NGram};
use super::pruning::PruningPolicy;
use super::smoothing::Estimator;
use super::vocabulary::{TokenId, Vocabulary};
use super::window::HistoryWindow;

/// Single-pass sliding-window counter for orders `1..=max_n`.
///
/// The counter consumes each token exactly once and never looks back further
/// than its history window, so memory depends on the number of distinct
/// n-grams only (and can be capped with a [`PruningPolicy`]).
///
/// # Responsibilities
/// - Intern tokens into the vocabulary
/// - Update one count table per order for every incoming token
/// - Keep the last `max_n - 1` tokens to build higher-order n-grams
/// - Apply the pruning policy to orders >= 2 after each increment
///
/// # Invariants
/// - `max_n >= 1`
/// - `tables[n - 1]` holds the order-`n` counts
/// - The window never holds more than `max_n - 1` tokens
#[derive(Debug)]
pub struct NGramCounter {
	max_n: usize,
	tables: Vec<CountTable>,
	window: HistoryWindow,
	total_tokens: u64,
	vocabulary: Vocabulary,
	pruning: PruningPolicy,
	scratch: Vec<TokenId>,
}

impl NGramCounter {
	/// Creates an empty counter for orders `1..=max_n`.
	///
	/// # Errors
	/// Returns `MalformedConfiguration` if `max_n < 1`.
	pub fn new(max_n: usize, pruning: PruningPolicy) -> Result<Self, NGramError> {
		if max_n < 1 {
			return Err(NGramError::MalformedConfiguration("max_n must be >= 1".to_owned()));
		}
		Ok(Self {
			max_n,
			tables: (1..=max_n).map(CountTable::new).collect(),
			window: HistoryWindow::new(max_n - 1),
			total_tokens: 0,
			vocabulary: Vocabulary::new(),
			pruning,
			scratch: Vec::with_capacity(max_n),
		})
	}

	/// Feeds one token.
	///
	/// Every order is built from the window as it was *before* this token;
	/// the token joins the window only once all orders are updated. Orders
	/// whose history is still too short are skipped.
	///
	/// # Errors
	/// `VocabularyOverflow` if `token` is new and no id is left; nothing is
	/// counted in that case.
	pub fn observe(&mut self, token: &str) -> Result<(), NGramError> {
		let id = self.vocabulary.intern(token)?;
		self.total_tokens += 1;
		self.tables[0].increment(&[id]);

		for n in 2..=self.max_n {
			// A shorter window cannot serve any higher order either
			let Some(history) = self.window.tail(n - 1) else {
				break;
			};
			self.scratch.clear();
			self.scratch.extend(history);
			self.scratch.push(id);

			let table = &mut self.tables[n - 1];
			table.increment(&self.scratch);
			self.pruning.apply(table);
		}

		self.window.push(id);
		Ok(())
	}

	/// Drains a token stream, stopping at the first read error.
	pub fn consume<I>(&mut self, tokens: I) -> Result<(), NGramError>
	where
		I: IntoIterator<Item = io::Result<String>>,
	{
		for token in tokens {
			self.observe(&token?)?;
		}
		Ok(())
	}

	pub fn max_n(&self) -> usize {
		self.max_n
	}

	pub fn total_tokens(&self) -> u64 {
		self.total_tokens
	}

	pub fn vocabulary(&self) -> &Vocabulary {
		&self.vocabulary
	}

	pub fn window(&self) -> &HistoryWindow {
		&self.window
	}

	/// Order-`n` table, `None` outside `1..=max_n`.
	pub fn table(&self, n: usize) -> Option<&CountTable> {
		n.checked_sub(1).and_then(|i| self.tables.get(i))
	}

	/// Freezes the counts. The history window is discarded.
	pub fn finish(self) -> NGramCounts {
		NGramCounts {
			max_n: self.max_n,
			tables: self.tables,
			total_tokens: self.total_tokens,
			vocabulary: self.vocabulary,
			pruning: self.pruning,
		}
	}
}

/// Finalized, read-only counts produced by [`NGramCounter::finish`].
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct NGramCounts {
	max_n: usize,
	tables: Vec<CountTable>,
	total_tokens: u64,
	vocabulary: Vocabulary,
	pruning: PruningPolicy,
}

impl NGramCounts {
	pub fn max_n(&self) -> usize {
		self.max_n
	}

	pub fn total_tokens(&self) -> u64 {
		self.total_tokens
	}

	pub fn vocabulary(&self) -> &Vocabulary {
		&self.vocabulary
	}

	/// Vocabulary size (V).
	pub fn vocab_size(&self) -> usize {
		self.vocabulary.len()
	}

	/// Pruning policy the counts were produced with.
	pub fn pruning(&self) -> PruningPolicy {
		self.pruning
	}

	pub fn table(&self, n: usize) -> Option<&CountTable> {
		n.checked_sub(1).and_then(|i| self.tables.get(i))
	}

	/// Count of a token sequence, 0 if any token is unknown or the order is out of range.
	pub fn count(&self, tokens: &[&str]) -> u64 {
		let Some(table) = self.table(tokens.len()) else {
			return 0;
		};
		let ids: Option<Vec<TokenId>> = tokens.iter().map(|t| self.vocabulary.get(t)).collect();
		ids.map_or(0, |ids| table.get(&ids))
	}

	/// Number of distinct n-grams for each order, starting at 1.
	pub fn unique_counts(&self) -> Vec<usize> {
		self.tables.iter().map(CountTable::len).collect()
	}

	/// Token text of an n-gram.
	pub fn resolve(&self, ngram: &NGram) -> Vec<&str> {
		ngram.ids().iter().map(|id| self.vocabulary.resolve(*id)).collect()
	}

	/// Checks the structure of counts that did not come from a counter,
	/// such as a decoded snapshot.
	///
	/// # Errors
	/// `InconsistentCounts` if the tables do not cover exactly `1..=max_n` in
	/// order, a key has the wrong length, or an id is outside the vocabulary.
	pub fn check_consistency(&self) -> Result<(), NGramError> {
		if self.max_n < 1 || self.tables.len() != self.max_n {
			return Err(NGramError::InconsistentCounts(format!(
				"max_n is {} but {} tables are present",
				self.max_n,
				self.tables.len()
			)));
		}
		if !self.vocabulary.is_consistent() {
			return Err(NGramError::InconsistentCounts("vocabulary index is corrupt".to_owned()));
		}

		for (i, table) in self.tables.iter().enumerate() {
			let n = i + 1;
			if table.order() != n {
				return Err(NGramError::InconsistentCounts(format!(
					"table {} has order {}",
					n,
					table.order()
				)));
			}
			for (ngram, count) in table.iter() {
				if ngram.order() != n || count == 0 {
					return Err(NGramError::InconsistentCounts(format!("malformed {n}-gram entry")));
				}
				if !ngram.ids().iter().all(|id| self.vocabulary.contains_id(*id)) {
					return Err(NGramError::InconsistentCounts(format!(
						"{n}-gram refers to a token outside the vocabulary of {}",
						self.vocabulary.len()
					)));
				}
			}
		}
		Ok(())
	}

	/// Smoothing estimator for order `n` (`2..=max_n`).
	pub fn estimator(&self, n: usize, add_k: f64) -> Option<Estimator<'_>> {
		if n < 2 {
			return None;
		}
		let table = self.table(n)?;
		let history = self.table(n - 1)?;
		Some(Estimator::new(table, history, &self.vocabulary, add_k))
	}
}
