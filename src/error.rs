//! Error types for trace generation, playback and benchmark ingestion.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::step::Role;

/// Errors reported by the trace store, the emitters and the playback controller.
///
/// None of these are fatal: a failed navigation leaves the controller in its
/// last valid state.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TraceError {
    #[error("index {index} is out of range for length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("invalid playback rate {rate}: seconds per step must be positive and finite")]
    InvalidRate { rate: f64 },

    #[error("binary search needs sorted input, but element {index} is smaller than its predecessor")]
    UnsortedInput { index: usize },

    #[error("binary search needs a target value")]
    MissingTarget,

    #[error("unknown algorithm '{name}' (expected merge, quick or binary)")]
    UnknownAlgorithm { name: String },

    #[error("unknown playback command '{input}'")]
    UnknownCommand { input: String },

    #[error("step {step} has a snapshot of length {found}, expected {expected}")]
    SnapshotLength {
        step: usize,
        expected: usize,
        found: usize,
    },

    #[error("step {step} annotates '{role}' at index {index}, outside length {len}")]
    AnnotationOutOfRange {
        step: usize,
        role: Role,
        index: usize,
        len: usize,
    },
}

/// Errors raised while reading or writing benchmark result files.
#[derive(Debug, Error)]
pub enum BenchmarkError {
    #[error(transparent)]
    Io(#[from] io::Error),

    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("unsupported benchmark file '{}' (expected .json or .csv)", path.display())]
    UnsupportedFormat { path: PathBuf },

    #[error("unrecognized CSV header [{headers}]: expected name,cat,dur or algorithm,case,size,duration")]
    UnrecognizedLayout { headers: String },

    #[error("row {row}: missing column '{column}'")]
    MissingColumn { row: usize, column: &'static str },

    #[error("row {row}: invalid {column} value '{value}'")]
    InvalidValue {
        row: usize,
        column: &'static str,
        value: String,
    },

    #[error("'{}' holds no trace events", path.display())]
    NoEvents { path: PathBuf },

    #[error("event name '{name}' does not embed 'Size: <N>)'")]
    MalformedName { name: String },

    #[error("unknown benchmark case '{label}' (expected Best, Average or Worst)")]
    UnknownCase { label: String },
}
