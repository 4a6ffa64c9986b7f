use std::io::{self, Write};

use crate::model::smoothing::SmoothedRecord;

/// Header label of the Add-K column, e.g. `add0.5_p` or `add1.0_p`.
///
/// Whole numbers keep one decimal so the label stays stable for downstream
/// tooling. Values are always written positionally: for K in the usual
/// `1e-4..1e16` range this reads like a shortest float repr, but very small
/// or very large K never switch to exponent form (`1e-5` gives
/// `add0.00001_p`, not `add1e-05_p`).
pub fn add_k_label(k: f64) -> String {
	if k.fract() == 0.0 {
		format!("add{k:.1}_p")
	} else {
		format!("add{k}_p")
	}
}

/// Writes one order's records as a tab-separated table.
///
/// Columns: `w1..wn`, `count`, `mle_p`, `add1_p`, `add{K}_p`,
/// `token_type_score`. Probabilities use 8 decimals, the score 4. Rows are
/// written in the order given.
pub fn write_table<W: Write>(writer: &mut W, n: usize, add_k: f64, records: &[SmoothedRecord<'_>]) -> io::Result<()> {
	let mut header: Vec<String> = (1..=n).map(|i| format!("w{i}")).collect();
	header.extend([
		"count".to_owned(),
		"mle_p".to_owned(),
		"add1_p".to_owned(),
		add_k_label(add_k),
		"token_type_score".to_owned(),
	]);
	writeln!(writer, "{}", header.join("\t"))?;

	for record in records {
		for token in &record.tokens {
			write!(writer, "{token}\t")?;
		}
		writeln!(
			writer,
			"{}\t{:.8}\t{:.8}\t{:.8}\t{:.4}",
			record.count, record.mle, record.add_one, record.add_k, record.token_type_score
		)?;
	}
	writer.flush()
}

/// Console preview of the `top` first records.
pub fn format_preview(n: usize, records: &[SmoothedRecord<'_>], top: usize) -> String {
	let shown = &records[..top.min(records.len())];
	let mut out = format!("Top {} {}-grams (by raw count):\n", shown.len(), n);
	for record in shown {
		out.push_str(&format!("  {:<60} {}\n", record.tokens.join(" "), record.count));
	}
	out
}

#[cfg(test)]
mod tests {
	use super::*;

	fn record<'a>(tokens: Vec<&'a str>, count: u64) -> SmoothedRecord<'a> {
		SmoothedRecord {
			tokens,
			count,
			mle: 2.0 / 3.0,
			add_one: 0.6,
			add_k: 0.6,
			token_type_score: 3.0,
		}
	}

	#[test]
	fn label_keeps_one_decimal_for_whole_k() {
		assert_eq!(add_k_label(1.0), "add1.0_p");
		assert_eq!(add_k_label(0.5), "add0.5_p");
		assert_eq!(add_k_label(0.25), "add0.25_p");
	}

	#[test]
	fn label_never_uses_exponent_form() {
		assert_eq!(add_k_label(1e-5), "add0.00001_p");
		assert_eq!(add_k_label(1e20), "add100000000000000000000.0_p");
	}

	#[test]
	fn table_layout() {
		let mut out = Vec::new();
		write_table(&mut out, 2, 1.0, &[record(vec!["a", "b"], 2)]).unwrap();
		let text = String::from_utf8(out).unwrap();
		assert_eq!(
			text,
			"w1\tw2\tcount\tmle_p\tadd1_p\tadd1.0_p\ttoken_type_score\n\
			 a\tb\t2\t0.66666667\t0.60000000\t0.60000000\t3.0000\n"
		);
	}

	#[test]
	fn empty_table_has_header_only() {
		let mut out = Vec::new();
		write_table(&mut out, 3, 0.5, &[]).unwrap();
		assert_eq!(
			String::from_utf8(out).unwrap(),
			"w1\tw2\tw3\tcount\tmle_p\tadd1_p\tadd0.5_p\ttoken_type_score\n"
		);
	}

	#[test]
	fn preview_is_bounded() {
		let records = vec![record(vec!["a", "b"], 2), record(vec!["b", "a"], 1)];
		let preview = format_preview(2, &records, 1);
		assert!(preview.starts_with("Top 1 2-grams (by raw count):\n"));
		assert!(preview.contains("a b"));
		assert!(!preview.contains("b a"));
		assert_eq!(preview.lines().count(), 2);
	}
}
