//! Conditional estimators over finalized count tables.
//!
//! For an n-gram `g` with history `h` (all but the last token), joint count
//! `c = count_n(g)` and history count `d = count_{n-1}(h)`:
//!
//! | Estimator  | Value                                          |
//! |------------|------------------------------------------------|
//! | MLE        | `c / d`, or 0 when `d == 0`                    |
//! | Add-1      | `(c + 1) / (d + V)` when `d > 0 \|\| V > 0`, else 0 |
//! | Add-K      | `(c + K) / (d + K·V)` under the same guard     |
//! | Token-type | `c + distinct chars of the last token`         |
//!
//! A history missing from the lower-order table (possible once pruning has
//! run) simply has `d = 0`.
//!
//! The token-type score is a ranking heuristic and is not normalized: it does
//! not sum to 1 over the continuations of a history.

use std::cmp::Ordering;
use std::collections::HashSet;

use super::ngram::CountTable;
use super::vocabulary::{TokenId, Vocabulary};

/// Maximum-likelihood estimate `c / d`.
pub fn mle(c: u64, d: u64) -> f64 {
	if d > 0 { c as f64 / d as f64 } else { 0.0 }
}

/// Laplace estimate `(c + 1) / (d + V)`.
///
/// With `d > 0` and `V == 0` the vocabulary term vanishes and this is
/// `(c + 1) / d`; both zero yields 0.
pub fn add_one(c: u64, d: u64, vocab_size: usize) -> f64 {
	if d > 0 || vocab_size > 0 {
		(c + 1) as f64 / (d as f64 + vocab_size as f64)
	} else {
		0.0
	}
}

/// Additive estimate `(c + k) / (d + k·V)`.
pub fn add_k(c: u64, d: u64, vocab_size: usize, k: f64) -> f64 {
	if d > 0 || vocab_size > 0 {
		(c as f64 + k) / (d as f64 + k * vocab_size as f64)
	} else {
		0.0
	}
}

/// Raw count plus the number of distinct characters of the predicted token.
pub fn token_type_score(c: u64, predicted: &str) -> f64 {
	let distinct = predicted.chars().collect::<HashSet<char>>().len();
	c as f64 + distinct as f64
}

/// Scores of one n-gram. Built once, never mutated.
#[derive(Clone, Debug, PartialEq)]
pub struct SmoothedRecord<'a> {
	pub tokens: Vec<&'a str>,
	pub count: u64,
	pub mle: f64,
	pub add_one: f64,
	pub add_k: f64,
	pub token_type_score: f64,
}

impl SmoothedRecord<'_> {
	/// Canonical output order: descending count, then ascending tokens.
	pub fn rank_cmp(&self, other: &Self) -> Ordering {
		other
			.count
			.cmp(&self.count)
			.then_with(|| self.tokens.cmp(&other.tokens))
	}
}

/// Estimator for one order `n >= 2`, borrowing the frozen tables.
#[derive(Clone, Copy, Debug)]
pub struct Estimator<'a> {
	table: &'a CountTable,
	history: &'a CountTable,
	vocabulary: &'a Vocabulary,
	add_k: f64,
}

impl<'a> Estimator<'a> {
	pub(crate) fn new(table: &'a CountTable, history: &'a CountTable, vocabulary: &'a Vocabulary, add_k: f64) -> Self {
		debug_assert_eq!(table.order(), history.order() + 1);
		Self { table, history, vocabulary, add_k }
	}

	pub fn order(&self) -> usize {
		self.table.order()
	}

	pub fn add_k_value(&self) -> f64 {
		self.add_k
	}

	/// Scores an arbitrary n-gram, seen or not.
	///
	/// `ids` must have exactly `order()` tokens.
	pub fn score(&self, ids: &[TokenId]) -> SmoothedRecord<'a> {
		let vocab_size = self.vocabulary.len();
		let (history, predicted) = match ids.split_last() {
			Some((last, history)) => (history, *last),
			None => return self.empty_record(),
		};

		let c = self.table.get(ids);
		let d = self.history.get(history);

		SmoothedRecord {
			tokens: ids.iter().map(|id| self.vocabulary.resolve(*id)).collect(),
			count: c,
			mle: mle(c, d),
			add_one: add_one(c, d, vocab_size),
			add_k: add_k(c, d, vocab_size, self.add_k),
			token_type_score: token_type_score(c, self.vocabulary.resolve(predicted)),
		}
	}

	fn empty_record(&self) -> SmoothedRecord<'a> {
		SmoothedRecord {
			tokens: Vec::new(),
			count: 0,
			mle: 0.0,
			add_one: 0.0,
			add_k: 0.0,
			token_type_score: 0.0,
		}
	}

	/// Scores every stored n-gram, in canonical rank order.
	pub fn ranked(&self) -> Vec<SmoothedRecord<'a>> {
		let mut records: Vec<SmoothedRecord<'a>> = self
			.table
			.iter()
			.map(|(ngram, _)| self.score(ngram.ids()))
			.collect();
		records.sort_by(SmoothedRecord::rank_cmp);
		records
	}
}
