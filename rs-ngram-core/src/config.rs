use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::NGramError;

/// Default corpus file name.
pub const DEFAULT_INPUT: &str = "indiccorp_gu_words.txt";

/// Run parameters, fixed for the whole run.
///
/// # Fields
/// - `input`: corpus path or bare file name (resolved against `search_dirs`)
/// - `search_dirs`: fallback directories tried in order when `input` is not a file
/// - `output_dir`: where the per-order tables are written
/// - `max_n`: highest n-gram order counted (>= 1)
/// - `add_k`: pseudo-count for Add-K smoothing (> 0)
/// - `max_unique_per_order`: optional pruning cap, `None` means unbounded
/// - `top_print`: number of rows shown in the console preview
/// - `snapshot`: optional binary cache of the frozen counts
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct PipelineConfig {
	pub input: PathBuf,
	pub search_dirs: Vec<PathBuf>,
	pub output_dir: PathBuf,
	pub max_n: usize,
	pub add_k: f64,
	pub max_unique_per_order: Option<usize>,
	pub top_print: usize,
	pub snapshot: Option<PathBuf>,
}

impl Default for PipelineConfig {
	fn default() -> Self {
		Self {
			input: PathBuf::from(DEFAULT_INPUT),
			search_dirs: default_search_dirs(),
			output_dir: PathBuf::from("."),
			max_n: 4,
			add_k: 0.5,
			max_unique_per_order: None,
			top_print: 8,
			snapshot: None,
		}
	}
}

/// Directories searched for the corpus when none are given.
pub fn default_search_dirs() -> Vec<PathBuf> {
	[".", "..", "../Lab 1", "data"].iter().map(PathBuf::from).collect()
}

impl PipelineConfig {
	/// Checks the numeric knobs.
	///
	/// # Errors
	/// - `max_n < 1`
	/// - `add_k` not a finite number strictly greater than 0
	pub fn validate(&self) -> Result<(), NGramError> {
		if self.max_n < 1 {
			return Err(NGramError::MalformedConfiguration(format!(
				"max_n must be >= 1, got {}",
				self.max_n
			)));
		}
		if !self.add_k.is_finite() || self.add_k <= 0.0 {
			return Err(NGramError::MalformedConfiguration(format!(
				"add_k must be a positive number, got {}",
				self.add_k
			)));
		}
		Ok(())
	}
}
