use log::debug;
use serde::{Deserialize, Serialize};

use crate::algorithm::Algorithm;
use crate::error::TraceError;
use crate::step::{Annotations, SourceMarker, Step};

/// Receives the instants an instrumented algorithm reports.
///
/// Algorithms are written once against this trait: `TraceRecorder` keeps the
/// steps, `NullSink` throws them away so the same code can be timed.
pub trait StepSink {
    /// Whether emitted steps are kept. Algorithms may pick a slower but
    /// snapshot-friendly strategy when this is set.
    const RECORDING: bool;

    /// Report the working array at `marker`; `annotate` is only called when
    /// the step is kept.
    fn emit<F>(&mut self, arr: &[i64], marker: SourceMarker, annotate: F)
    where
        F: FnOnce(&mut Annotations);

    fn count_comparison(&mut self) {}
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl StepSink for NullSink {
    const RECORDING: bool = false;

    #[inline(always)]
    fn emit<F>(&mut self, _arr: &[i64], _marker: SourceMarker, _annotate: F)
    where
        F: FnOnce(&mut Annotations),
    {
    }
}

/// Collects steps while an algorithm runs; `finish` freezes them into a `Trace`.
#[derive(Debug)]
pub struct TraceRecorder {
    input_len: usize,
    steps: Vec<Step>,
    comparisons: usize,
}

impl TraceRecorder {
    pub fn new(input_len: usize) -> Self {
        TraceRecorder {
            input_len,
            steps: Vec::new(),
            comparisons: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn finish(self, algorithm: Algorithm) -> Trace {
        debug!(
            "{algorithm}: recorded {} steps, {} comparisons over {} elements",
            self.steps.len(),
            self.comparisons,
            self.input_len
        );
        Trace {
            algorithm,
            input_len: self.input_len,
            steps: self.steps,
            comparisons: self.comparisons,
        }
    }
}

impl StepSink for TraceRecorder {
    const RECORDING: bool = true;

    fn emit<F>(&mut self, arr: &[i64], marker: SourceMarker, annotate: F)
    where
        F: FnOnce(&mut Annotations),
    {
        debug_assert_eq!(arr.len(), self.input_len);
        let mut annotations = Annotations::new();
        annotate(&mut annotations);
        debug_assert!(annotations.indices().all(|(_, i)| i < self.input_len));
        self.steps.push(Step {
            snapshot: arr.to_vec(),
            annotations,
            marker,
            operations: self.comparisons,
        });
    }

    fn count_comparison(&mut self) {
        self.comparisons += 1;
    }
}

/// The frozen, replayable output of one (algorithm, input) run.
///
/// There are no mutators; a trace is built by `TraceRecorder::finish` or
/// loaded (and re-validated) from JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawTrace")]
pub struct Trace {
    algorithm: Algorithm,
    input_len: usize,
    steps: Vec<Step>,
    comparisons: usize,
}

#[derive(Deserialize)]
struct RawTrace {
    algorithm: Algorithm,
    input_len: usize,
    steps: Vec<Step>,
    comparisons: usize,
}

impl TryFrom<RawTrace> for Trace {
    type Error = TraceError;

    fn try_from(raw: RawTrace) -> Result<Self, Self::Error> {
        for (n, step) in raw.steps.iter().enumerate() {
            if step.len() != raw.input_len {
                return Err(TraceError::SnapshotLength {
                    step: n,
                    expected: raw.input_len,
                    found: step.len(),
                });
            }
            if let Some((role, index)) = step
                .annotations
                .indices()
                .find(|&(_, index)| index >= raw.input_len)
            {
                return Err(TraceError::AnnotationOutOfRange {
                    step: n,
                    role,
                    index,
                    len: raw.input_len,
                });
            }
        }
        Ok(Trace {
            algorithm: raw.algorithm,
            input_len: raw.input_len,
            steps: raw.steps,
            comparisons: raw.comparisons,
        })
    }
}

impl Trace {
    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    pub fn input_len(&self) -> usize {
        self.input_len
    }

    pub fn comparisons(&self) -> usize {
        self.comparisons
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn get(&self, index: usize) -> Result<&Step, TraceError> {
        self.steps.get(index).ok_or(TraceError::IndexOutOfRange {
            index,
            len: self.steps.len(),
        })
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Step> {
        self.steps.iter()
    }

    pub fn last(&self) -> Option<&Step> {
        self.steps.last()
    }

    pub fn final_snapshot(&self) -> Option<&[i64]> {
        self.last().map(|step| step.snapshot.as_slice())
    }
}

impl<'a> IntoIterator for &'a Trace {
    type Item = &'a Step;
    type IntoIter = std::slice::Iter<'a, Step>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
