use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::NGramError;
use super::counter::NGramCounts;
use super::pruning::PruningPolicy;

/// Binary cache of frozen counts.
///
/// The snapshot remembers which corpus it was built from; the counting
/// parameters are carried by the counts themselves.
#[derive(Serialize, Deserialize, Debug)]
struct Snapshot {
	source: String,
	counts: NGramCounts,
}

/// Writes `counts` to `path` using `postcard`.
pub fn save<P: AsRef<Path>>(path: P, source: &str, counts: &NGramCounts) -> Result<(), NGramError> {
	#[derive(Serialize)]
	struct SnapshotRef<'a> {
		source: &'a str,
		counts: &'a NGramCounts,
	}

	let bytes = postcard::to_stdvec(&SnapshotRef { source, counts })?;
	fs::write(path, bytes)?;
	Ok(())
}

/// Loads a snapshot if it exists and was built from the same corpus with
/// the same parameters.
///
/// Returns `Ok(None)` when the file is missing, stale or decodes into counts
/// whose tables and ids do not line up; the caller is expected to recount
/// and overwrite it.
pub fn load_matching<P: AsRef<Path>>(
	path: P,
	source: &str,
	max_n: usize,
	pruning: PruningPolicy,
) -> Result<Option<NGramCounts>, NGramError> {
	let path = path.as_ref();
	if !path.exists() {
		return Ok(None);
	}

	let bytes = fs::read(path)?;
	let snapshot: Snapshot = postcard::from_bytes(&bytes)?;

	if snapshot.source != source
		|| snapshot.counts.max_n() != max_n
		|| snapshot.counts.pruning() != pruning
	{
		log::warn!(
			"Snapshot {} is stale (source '{}', max_n {}, cap {:?}); recounting",
			path.display(),
			snapshot.source,
			snapshot.counts.max_n(),
			snapshot.counts.pruning().max_unique()
		);
		return Ok(None);
	}

	if let Err(e) = snapshot.counts.check_consistency() {
		log::warn!("Snapshot {} is corrupt ({}); recounting", path.display(), e);
		return Ok(None);
	}

	Ok(Some(snapshot.counts))
}
