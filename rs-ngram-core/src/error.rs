use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by the counting pipeline.
///
/// Every variant is fatal: a run either completes all orders or stops at the
/// first error. A history missing from the lower-order table is not an error
/// and never shows up here (see [`crate::model::smoothing`]).
#[derive(Debug, Error)]
pub enum NGramError {
	/// The corpus could not be located in any candidate location.
	#[error("could not locate input file '{name}'. Checked:\n{}", format_checked(.checked))]
	SourceNotFound { name: String, checked: Vec<PathBuf> },

	/// Rejected configuration value.
	#[error("malformed configuration: {0}")]
	MalformedConfiguration(String),

	/// Frozen counts whose tables or ids do not line up.
	#[error("inconsistent counts: {0}")]
	InconsistentCounts(String),

	/// More distinct tokens than a `TokenId` can address.
	#[error("vocabulary overflow: more than {} distinct tokens", u32::MAX as u64 + 1)]
	VocabularyOverflow,

	#[error("I/O error: {0}")]
	Io(#[from] io::Error),

	/// The count snapshot could not be encoded or decoded.
	#[error("snapshot error: {0}")]
	Snapshot(#[from] postcard::Error),
}

fn format_checked(checked: &[PathBuf]) -> String {
	checked
		.iter()
		.map(|p| p.display().to_string())
		.collect::<Vec<_>>()
		.join("\n")
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn source_not_found_lists_every_candidate() {
		let err = NGramError::SourceNotFound {
			name: "corpus.txt".to_owned(),
			checked: vec![PathBuf::from("a/corpus.txt"), PathBuf::from("b/corpus.txt")],
		};
		let message = err.to_string();
		assert!(message.contains("corpus.txt"));
		assert!(message.contains("a/corpus.txt\nb/corpus.txt"));
	}
}
