use std::path::PathBuf;

use clap::Parser;
use rs_ngram_core::config::{default_search_dirs, DEFAULT_INPUT};
use rs_ngram_core::PipelineConfig;

/// Count n-grams of a whitespace-tokenized corpus and write smoothed
/// probability tables (MLE, Add-1, Add-K, token-type score), one per order.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
	/// Corpus file, or a bare file name looked up in the search directories.
	#[arg(long, default_value = DEFAULT_INPUT)]
	input: PathBuf,

	/// Directory tried when the input is not found as given (repeatable).
	/// Defaults to ".", "..", "../Lab 1" and "data".
	#[arg(long = "search-dir")]
	search_dirs: Vec<PathBuf>,

	/// Where the per-order tables are written.
	#[arg(long, default_value = ".")]
	output_dir: PathBuf,

	/// Highest n-gram order.
	#[arg(long, default_value_t = 4)]
	max_n: usize,

	/// Pseudo-count K for Add-K smoothing.
	#[arg(long, default_value_t = 0.5)]
	add_k: f64,

	/// Evict singleton n-grams once an order holds more distinct entries than this.
	#[arg(long)]
	max_unique_per_order: Option<usize>,

	/// Rows shown per order in the console preview.
	#[arg(long, default_value_t = 8)]
	top_print: usize,

	/// Binary cache of the counts, reused when the corpus and parameters match.
	#[arg(long)]
	snapshot: Option<PathBuf>,
}

impl Args {
	fn into_config(self) -> PipelineConfig {
		PipelineConfig {
			input: self.input,
			search_dirs: if self.search_dirs.is_empty() { default_search_dirs() } else { self.search_dirs },
			output_dir: self.output_dir,
			max_n: self.max_n,
			add_k: self.add_k,
			max_unique_per_order: self.max_unique_per_order,
			top_print: self.top_print,
			snapshot: self.snapshot,
		}
	}
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
	env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

	let config = Args::parse().into_config();
	let summary = rs_ngram_core::run(&config)?;

	println!("Done. Files written:");
	for path in &summary.outputs {
		println!("  {}", path.display());
	}
	println!("Add-One & Add-K are proper probability distributions (sum to 1 per history). Token-type score is not.");

	log::debug!("Run summary: {summary:?}");
	Ok(())
}
