//! Streaming n-gram counting and smoothing library.
//!
//! This crate provides a bounded-memory n-gram pipeline including:
//! - Lazy whitespace tokenization of a corpus
//! - Single-pass sliding-window counts for orders 1..=N
//! - Optional lossy pruning of singleton n-grams
//! - MLE, Add-1, Add-K and token-type scores per n-gram
//! - Tab-separated output tables, one per order
//!
//! Most callers only need [`pipeline::run`] and [`config::PipelineConfig`].

/// Run parameters and their validation.
pub mod config;

/// Error taxonomy of the pipeline.
pub mod error;

/// Corpus resolution, token streaming and output paths.
pub mod io;

/// Counting and smoothing core.
pub mod model;

/// End-to-end run: resolve, count, estimate, write.
pub mod pipeline;

/// Table and preview formatting.
pub mod report;

pub use config::PipelineConfig;
pub use error::NGramError;
pub use pipeline::{run, RunSummary};
