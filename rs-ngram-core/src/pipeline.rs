use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::config::PipelineConfig;
use crate::error::NGramError;
use crate::io::{find_input_file, normalize_folder, open_tokens, output_path};
use crate::model::counter::{NGramCounter, NGramCounts};
use crate::model::pruning::PruningPolicy;
use crate::model::snapshot;
use crate::report;

/// Outcome of a completed run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
	/// Resolved corpus path.
	pub input: PathBuf,
	pub total_tokens: u64,
	pub vocab_size: usize,
	/// Distinct n-grams per order, starting at 1.
	pub unique_per_order: Vec<usize>,
	/// One table per order `2..=max_n`, in order.
	pub outputs: Vec<PathBuf>,
}

/// Counts a token stream in a single pass.
pub fn count_tokens<I>(tokens: I, max_n: usize, pruning: PruningPolicy) -> Result<NGramCounts, NGramError>
where
	I: IntoIterator<Item = io::Result<String>>,
{
	let mut counter = NGramCounter::new(max_n, pruning)?;
	counter.consume(tokens)?;
	Ok(counter.finish())
}

/// Produces the frozen counts for `input`, from the snapshot when it matches
/// the configuration, otherwise by streaming the corpus.
///
/// A freshly counted corpus refreshes the snapshot if one is configured.
pub fn load_counts(config: &PipelineConfig, input: &Path) -> Result<NGramCounts, NGramError> {
	let pruning = PruningPolicy::new(config.max_unique_per_order);
	let source = input.display().to_string();

	if let Some(path) = &config.snapshot {
		if let Some(counts) = snapshot::load_matching(path, &source, config.max_n, pruning)? {
			log::info!("Loaded counts from snapshot {}", path.display());
			return Ok(counts);
		}
	}

	log::info!("Streaming tokens from: {}", input.display());
	let counts = count_tokens(open_tokens(input)?, config.max_n, pruning)?;

	if let Some(path) = &config.snapshot {
		snapshot::save(path, &source, &counts)?;
		log::info!("Snapshot written to {}", path.display());
	}
	Ok(counts)
}

/// Writes the smoothed table of every order `2..=max_n` into
/// `config.output_dir` and the ranked preview of each into `preview`.
///
/// Returns the written paths, in order.
pub fn write_tables<W: Write>(counts: &NGramCounts, config: &PipelineConfig, preview: &mut W) -> Result<Vec<PathBuf>, NGramError> {
	let dir = normalize_folder(&config.output_dir);
	fs::create_dir_all(&dir)?;

	let mut outputs = Vec::new();
	for n in 2..=counts.max_n() {
		let Some(estimator) = counts.estimator(n, config.add_k) else {
			return Err(NGramError::InconsistentCounts(format!("no {n}-gram table to estimate")));
		};
		let records = estimator.ranked();

		let path = output_path(&dir, n);
		let mut writer = BufWriter::new(File::create(&path)?);
		report::write_table(&mut writer, n, config.add_k, &records)?;
		log::info!("Wrote {} {}-grams to {}", records.len(), n, path.display());

		writeln!(preview, "{}", report::format_preview(n, &records, config.top_print))?;
		outputs.push(path);
	}
	Ok(outputs)
}

/// Runs the whole pipeline, printing previews to stdout.
pub fn run(config: &PipelineConfig) -> Result<RunSummary, NGramError> {
	run_with_preview(config, &mut io::stdout().lock())
}

/// Runs the whole pipeline: validate, resolve, count, write.
///
/// Fails before counting on an invalid configuration or a missing corpus;
/// any later error aborts the run.
pub fn run_with_preview<W: Write>(config: &PipelineConfig, preview: &mut W) -> Result<RunSummary, NGramError> {
	config.validate()?;
	let input = find_input_file(&config.input, &config.search_dirs)?;

	let counts = load_counts(config, &input)?;
	log::info!("Total tokens: {}; Vocabulary size: {}", counts.total_tokens(), counts.vocab_size());
	let unique_per_order = counts.unique_counts();
	for (i, unique) in unique_per_order.iter().enumerate() {
		log::info!("Unique {}-grams: {}", i + 1, unique);
	}

	let outputs = write_tables(&counts, config, preview)?;

	Ok(RunSummary {
		input,
		total_tokens: counts.total_tokens(),
		vocab_size: counts.vocab_size(),
		unique_per_order,
		outputs,
	})
}
