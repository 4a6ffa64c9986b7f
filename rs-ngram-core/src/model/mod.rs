//! Counting and smoothing core.
//!
//! This module contains:
//! - Token interning (`Vocabulary`)
//! - Per-order n-gram count tables (`CountTable`)
//! - The bounded history buffer (`HistoryWindow`)
//! - Singleton eviction (`PruningPolicy`)
//! - The single-pass counter and its frozen result (`NGramCounter`, `NGramCounts`)
//! - Conditional estimators (`Estimator`, `SmoothedRecord`)
//! - A binary cache of frozen counts (`snapshot`)

/// Single-pass sliding-window counter for orders 1..=N.
///
/// Freezes into read-only `NGramCounts` once the stream is exhausted.
pub mod counter;

/// N-gram keys and per-order occurrence tables.
pub mod ngram;

/// Memory cap evicting singleton n-grams.
pub mod pruning;

/// MLE, Add-1, Add-K and token-type scores over frozen counts.
pub mod smoothing;

/// `postcard` cache of frozen counts.
pub mod snapshot;

/// Token interning; its size is the smoothing vocabulary V.
pub mod vocabulary;

/// Fixed-capacity FIFO of the latest tokens.
pub mod window;
