use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::{env, vec};

use crate::error::NGramError;

/// Locates the corpus file.
///
/// - `name` is returned as-is if it already points to a file
/// - Otherwise each `dir/name` is tried, in order
///
/// # Errors
/// `SourceNotFound` listing every location checked.
pub fn find_input_file<P: AsRef<Path>>(name: P, search_dirs: &[PathBuf]) -> Result<PathBuf, NGramError> {
	let name = name.as_ref();
	let mut checked = Vec::with_capacity(search_dirs.len() + 1);

	checked.push(name.to_path_buf());
	if name.is_file() {
		return Ok(name.to_path_buf());
	}

	// Absolute paths ignore the search directories
	if !name.is_absolute() {
		for dir in search_dirs {
			let candidate = dir.join(name);
			if candidate.is_file() {
				return Ok(candidate);
			}
			checked.push(candidate);
		}
	}

	Err(NGramError::SourceNotFound {
		name: name.display().to_string(),
		checked,
	})
}

/// Lazy whitespace tokenizer over a line-oriented reader.
///
/// Only the current line is held in memory. Empty fragments are skipped and
/// bytes that are not valid UTF-8 are dropped. Iteration stops after the
/// first read error.
pub struct TokenStream<R> {
	reader: R,
	line: Vec<u8>,
	pending: vec::IntoIter<String>,
	done: bool,
}

impl<R: BufRead> TokenStream<R> {
	pub fn new(reader: R) -> Self {
		Self {
			reader,
			line: Vec::new(),
			pending: Vec::new().into_iter(),
			done: false,
		}
	}
}

impl<R: BufRead> Iterator for TokenStream<R> {
	type Item = io::Result<String>;

	fn next(&mut self) -> Option<Self::Item> {
		loop {
			if let Some(token) = self.pending.next() {
				return Some(Ok(token));
			}
			if self.done {
				return None;
			}

			self.line.clear();
			match self.reader.read_until(b'\n', &mut self.line) {
				Ok(0) => {
					self.done = true;
					return None;
				}
				Ok(_) => {
					let text = decode_valid_utf8(&self.line);
					self.pending = text
						.split(is_separator)
						.filter(|fragment| !fragment.is_empty())
						.map(str::to_owned)
						.collect::<Vec<_>>()
						.into_iter();
				}
				Err(e) => {
					self.done = true;
					return Some(Err(e));
				}
			}
		}
	}
}

/// Token separators: Unicode whitespace plus the ASCII file, group, record
/// and unit separators (U+001C..=U+001F).
fn is_separator(c: char) -> bool {
	c.is_whitespace() || ('\u{1c}'..='\u{1f}').contains(&c)
}

/// Opens a fresh token stream over a file.
pub fn open_tokens<P: AsRef<Path>>(path: P) -> io::Result<TokenStream<BufReader<File>>> {
	Ok(TokenStream::new(BufReader::new(File::open(path)?)))
}

/// Keeps the valid UTF-8 runs of `bytes`, discarding everything else.
fn decode_valid_utf8(bytes: &[u8]) -> String {
	let mut text = String::with_capacity(bytes.len());
	for chunk in bytes.utf8_chunks() {
		text.push_str(chunk.valid());
	}
	text
}

/// Output table path for order `n`.
///
/// Examples:
/// - `2` → `dir/bigrams_smoothing.tsv`
/// - `4` → `dir/quadragrams_smoothing.tsv`
/// - `5` → `dir/5grams_smoothing.tsv`
pub fn output_path<P: AsRef<Path>>(dir: P, n: usize) -> PathBuf {
	let name = match n {
		2 => "bigrams_smoothing.tsv".to_owned(),
		3 => "trigrams_smoothing.tsv".to_owned(),
		4 => "quadragrams_smoothing.tsv".to_owned(),
		_ => format!("{n}grams_smoothing.tsv"),
	};
	dir.as_ref().join(name)
}

/// Normalize a folder path.
///
/// - `"."` or `"./"` resolves to the current working directory
/// - Other paths are returned as-is (not canonicalized)
pub(crate) fn normalize_folder<P: AsRef<Path>>(input: P) -> PathBuf {
	let input = input.as_ref();
	if input == Path::new(".") || input == Path::new("./") {
		env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
	} else {
		input.to_path_buf()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::fs;
	use std::io::Cursor;

	fn collect(input: &[u8]) -> Vec<String> {
		TokenStream::new(Cursor::new(input.to_vec()))
			.collect::<io::Result<Vec<_>>>()
			.unwrap()
	}

	#[test]
	fn splits_on_any_whitespace() {
		assert_eq!(collect(b"a  b\tc\r\n\n  d \n"), vec!["a", "b", "c", "d"]);
	}

	#[test]
	fn ascii_information_separators_split_tokens() {
		assert_eq!(collect(b"a\x1cb\x1dc\x1ed\x1fe f"), vec!["a", "b", "c", "d", "e", "f"]);
		assert_eq!(collect(b"\x1c\x1f\n"), Vec::<String>::new());
		assert_eq!(collect("x\u{a0}y\u{2028}z".as_bytes()), vec!["x", "y", "z"]);
	}

	#[test]
	fn empty_input_yields_nothing() {
		assert!(collect(b"").is_empty());
		assert!(collect(b"   \n\t\n").is_empty());
	}

	#[test]
	fn last_line_without_newline_is_read() {
		assert_eq!(collect(b"x y\nz"), vec!["x", "y", "z"]);
	}

	#[test]
	fn invalid_utf8_bytes_are_dropped() {
		assert_eq!(collect(b"ab\xffcd ef\n"), vec!["abcd", "ef"]);
		assert_eq!(collect("નમસ્તે દુનિયા".as_bytes()), vec!["નમસ્તે", "દુનિયા"]);
	}

	#[test]
	fn read_error_is_reported_once() {
		struct Broken;
		impl io::Read for Broken {
			fn read(&mut self, _: &mut [u8]) -> io::Result<usize> {
				Err(io::Error::other("disk gone"))
			}
		}

		let mut stream = TokenStream::new(BufReader::new(Broken));
		assert!(matches!(stream.next(), Some(Err(_))));
		assert!(stream.next().is_none());
	}

	#[test]
	fn finds_file_in_search_dir() {
		let dir = tempfile::tempdir().unwrap();
		let nested = dir.path().join("data");
		fs::create_dir(&nested).unwrap();
		fs::write(nested.join("corpus.txt"), "a b").unwrap();

		let missing = dir.path().join("nowhere");
		let found = find_input_file("corpus.txt", &[missing, nested.clone()]).unwrap();
		assert_eq!(found, nested.join("corpus.txt"));
	}

	#[test]
	fn missing_file_enumerates_candidates() {
		let dir = tempfile::tempdir().unwrap();
		let dirs = vec![dir.path().join("one"), dir.path().join("two")];

		match find_input_file("absent.txt", &dirs) {
			Err(NGramError::SourceNotFound { checked, .. }) => {
				assert_eq!(
					checked,
					vec![
						PathBuf::from("absent.txt"),
						dirs[0].join("absent.txt"),
						dirs[1].join("absent.txt"),
					]
				);
			}
			other => panic!("expected SourceNotFound, got {other:?}"),
		}
	}

	#[test]
	fn output_names_per_order() {
		assert_eq!(output_path("out", 2), PathBuf::from("out/bigrams_smoothing.tsv"));
		assert_eq!(output_path("out", 3), PathBuf::from("out/trigrams_smoothing.tsv"));
		assert_eq!(output_path("out", 4), PathBuf::from("out/quadragrams_smoothing.tsv"));
		assert_eq!(output_path("out", 6), PathBuf::from("out/6grams_smoothing.tsv"));
	}
}
