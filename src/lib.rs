pub mod algorithm;
pub mod benchmark;
pub mod binary_search;
pub mod complexity;
pub mod config;
pub mod error;
pub mod ingest;
pub mod input;
pub mod merge_sort;
pub mod playback;
pub mod quick_sort;
pub mod render;
pub mod step;
pub mod trace;

pub use algorithm::{record, Algorithm};
pub use benchmark::BenchmarkRecord;
pub use config::{BenchmarkConfig, TraceConfig};
pub use error::{BenchmarkError, TraceError};
pub use input::Case;
pub use playback::{PlaybackCommand, PlaybackController, PlaybackState};
pub use quick_sort::PivotStrategy;
pub use step::{Annotations, Role, SourceMarker, Step};
pub use trace::{NullSink, StepSink, Trace, TraceRecorder};
