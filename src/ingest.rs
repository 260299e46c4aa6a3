//! Reading and writing benchmark results.
//!
//! Two shapes are understood: the trace-event JSON written by profilers
//! (`{"traceEvents": [{"name", "cat", "dur", ...}]}`, where `name` embeds
//! the input size as `Size: <N>)`), and CSV in either the same event
//! layout or a flat `algorithm,case,size,duration` layout.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::benchmark::BenchmarkRecord;
use crate::error::BenchmarkError;
use crate::input::Case;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceEvent {
    pub name: String,
    pub cat: String,
    pub dur: f64,
    #[serde(default = "complete_phase")]
    pub ph: String,
    #[serde(default)]
    pub ts: f64,
    #[serde(default)]
    pub pid: u64,
    #[serde(default)]
    pub tid: u64,
}

fn complete_phase() -> String {
    "X".to_string()
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TraceEventFile {
    #[serde(rename = "otherData", default)]
    pub other_data: serde_json::Map<String, serde_json::Value>,
    #[serde(rename = "traceEvents")]
    pub trace_events: Vec<TraceEvent>,
}

impl TraceEvent {
    pub fn from_record(record: &BenchmarkRecord, ts: f64) -> Self {
        TraceEvent {
            name: record.event_name(),
            cat: record.case.to_string(),
            dur: record.duration,
            ph: complete_phase(),
            ts,
            pid: 0,
            tid: 0,
        }
    }
}

impl TryFrom<&TraceEvent> for BenchmarkRecord {
    type Error = BenchmarkError;

    fn try_from(event: &TraceEvent) -> Result<Self, Self::Error> {
        let size = parse_size(&event.name)?;
        let case = match event.cat.parse::<Case>() {
            Ok(case) => case,
            Err(err) => Case::find_in(&event.name).ok_or(err)?,
        };
        Ok(BenchmarkRecord {
            algorithm: algorithm_name(&event.name).to_string(),
            case,
            size,
            duration: event.dur,
        })
    }
}

/// The `<N>` of a `... Size: <N>)` event name.
pub fn parse_size(name: &str) -> Result<usize, BenchmarkError> {
    let malformed = || BenchmarkError::MalformedName {
        name: name.to_string(),
    };
    let (_, rest) = name.split_once("Size: ").ok_or_else(malformed)?;
    let (digits, _) = rest.split_once(')').ok_or_else(malformed)?;
    digits.trim().parse().map_err(|_| malformed())
}

/// Everything before the parenthesised details: `Quick Sort (Worst, ...)` -> `Quick Sort`.
pub fn algorithm_name(name: &str) -> &str {
    name.split_once(" (").map_or(name, |(algorithm, _)| algorithm).trim()
}

pub fn read_events<R: Read>(reader: R) -> Result<TraceEventFile, BenchmarkError> {
    let file: TraceEventFile = serde_json::from_reader(reader)?;
    if file.trace_events.is_empty() {
        warn!("no trace events found");
    }
    Ok(file)
}

pub fn read_json<R: Read>(reader: R) -> Result<Vec<BenchmarkRecord>, BenchmarkError> {
    read_events(reader)?
        .trace_events
        .iter()
        .map(BenchmarkRecord::try_from)
        .collect()
}

#[derive(Clone, Copy)]
enum Layout {
    Events { name: usize, cat: usize, dur: usize },
    Flat {
        algorithm: usize,
        case: usize,
        size: usize,
        duration: usize,
    },
}

pub fn read_csv<R: Read>(reader: R) -> Result<Vec<BenchmarkRecord>, BenchmarkError> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);
    let headers = rdr.headers()?.clone();
    let column = |wanted: &str| headers.iter().position(|h| h.eq_ignore_ascii_case(wanted));

    let layout = match (column("name"), column("cat"), column("dur")) {
        (Some(name), Some(cat), Some(dur)) => Layout::Events { name, cat, dur },
        _ => match (
            column("algorithm"),
            column("case"),
            column("size"),
            column("duration"),
        ) {
            (Some(algorithm), Some(case), Some(size), Some(duration)) => Layout::Flat {
                algorithm,
                case,
                size,
                duration,
            },
            _ => {
                return Err(BenchmarkError::UnrecognizedLayout {
                    headers: headers.iter().collect::<Vec<_>>().join(","),
                })
            }
        },
    };

    let mut records = Vec::new();
    for (n, result) in rdr.records().enumerate() {
        let row = n + 2;
        let line = result?;
        let field = |index: usize, column: &'static str| {
            line.get(index)
                .filter(|value| !value.is_empty())
                .ok_or(BenchmarkError::MissingColumn { row, column })
        };
        let number = |index: usize, column: &'static str| -> Result<f64, BenchmarkError> {
            let value = field(index, column)?;
            value.parse().map_err(|_| BenchmarkError::InvalidValue {
                row,
                column,
                value: value.to_string(),
            })
        };

        let record = match layout {
            Layout::Events { name, cat, dur } => BenchmarkRecord::try_from(&TraceEvent {
                name: field(name, "name")?.to_string(),
                cat: field(cat, "cat")?.to_string(),
                dur: number(dur, "dur")?,
                ph: complete_phase(),
                ts: 0.0,
                pid: 0,
                tid: 0,
            })?,
            Layout::Flat {
                algorithm,
                case,
                size,
                duration,
            } => {
                let size_value = field(size, "size")?;
                BenchmarkRecord {
                    algorithm: field(algorithm, "algorithm")?.to_string(),
                    case: field(case, "case")?.parse()?,
                    size: size_value.parse().map_err(|_| BenchmarkError::InvalidValue {
                        row,
                        column: "size",
                        value: size_value.to_string(),
                    })?,
                    duration: number(duration, "duration")?,
                }
            }
        };
        records.push(record);
    }
    debug!("read {} benchmark rows", records.len());
    Ok(records)
}

/// Records as trace events laid end to end on one timeline.
pub fn to_events(records: &[BenchmarkRecord]) -> TraceEventFile {
    let mut ts = 0.0;
    let trace_events = records
        .iter()
        .map(|record| {
            let event = TraceEvent::from_record(record, ts);
            ts += record.duration;
            event
        })
        .collect();
    TraceEventFile {
        other_data: serde_json::Map::new(),
        trace_events,
    }
}

pub fn write_json<W: Write>(records: &[BenchmarkRecord], writer: W) -> Result<(), BenchmarkError> {
    serde_json::to_writer_pretty(writer, &to_events(records))?;
    Ok(())
}

pub fn write_events_csv<W: Write>(events: &[TraceEvent], writer: W) -> Result<(), BenchmarkError> {
    let mut wtr = csv::Writer::from_writer(writer);
    for event in events {
        wtr.serialize(event)?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_csv<W: Write>(records: &[BenchmarkRecord], writer: W) -> Result<(), BenchmarkError> {
    write_events_csv(&to_events(records).trace_events, writer)
}

enum Format {
    Json,
    Csv,
}

fn format_of(path: &Path) -> Result<Format, BenchmarkError> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("json") => Ok(Format::Json),
        Some(ext) if ext.eq_ignore_ascii_case("csv") => Ok(Format::Csv),
        _ => Err(BenchmarkError::UnsupportedFormat {
            path: path.to_path_buf(),
        }),
    }
}

pub fn load(path: &Path) -> Result<Vec<BenchmarkRecord>, BenchmarkError> {
    let format = format_of(path)?;
    let reader = BufReader::new(File::open(path)?);
    match format {
        Format::Json => read_json(reader),
        Format::Csv => read_csv(reader),
    }
}

pub fn save(path: &Path, records: &[BenchmarkRecord]) -> Result<(), BenchmarkError> {
    let format = format_of(path)?;
    let mut writer = BufWriter::new(File::create(path)?);
    match format {
        Format::Json => write_json(records, &mut writer)?,
        Format::Csv => write_csv(records, &mut writer)?,
    }
    writer.flush()?;
    Ok(())
}

/// Flatten a trace-event JSON file into CSV, one row per event.
///
/// A file without events is an error and no CSV is written.
pub fn convert(input: &Path, output: &Path) -> Result<usize, BenchmarkError> {
    let events = read_events(BufReader::new(File::open(input)?))?.trace_events;
    if events.is_empty() {
        return Err(BenchmarkError::NoEvents {
            path: input.to_path_buf(),
        });
    }
    let mut writer = BufWriter::new(File::create(output)?);
    write_events_csv(&events, &mut writer)?;
    writer.flush()?;
    Ok(events.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn size_is_read_from_event_name() {
        assert_eq!(parse_size("Merge Sort (Best, Size: 1000)").unwrap(), 1000);
        assert_eq!(parse_size("Binary Search (Worst, Size:  7 )").unwrap(), 7);
        assert!(parse_size("Merge Sort (Best)").is_err());
        assert!(parse_size("Merge Sort (Best, Size: 12").is_err());
        assert!(parse_size("Merge Sort (Best, Size: ten)").is_err());
    }

    #[test]
    fn algorithm_name_drops_details() {
        assert_eq!(algorithm_name("Quick Sort (Worst, Size: 10)"), "Quick Sort");
        assert_eq!(algorithm_name("Heap Sort"), "Heap Sort");
    }

    #[test]
    fn case_falls_back_to_name() {
        let event = TraceEvent {
            name: "Quick Sort (Average, Size: 10)".into(),
            cat: "function".into(),
            dur: 4.0,
            ph: complete_phase(),
            ts: 0.0,
            pid: 0,
            tid: 0,
        };
        let record = BenchmarkRecord::try_from(&event).unwrap();
        assert_eq!(record.case, Case::Average);
        assert_eq!(record.algorithm, "Quick Sort");
    }

    #[test]
    fn events_are_laid_end_to_end() {
        let records = vec![
            BenchmarkRecord {
                algorithm: "Merge Sort".into(),
                case: Case::Best,
                size: 10,
                duration: 5.0,
            },
            BenchmarkRecord {
                algorithm: "Quick Sort".into(),
                case: Case::Best,
                size: 10,
                duration: 2.0,
            },
        ];
        let events = to_events(&records).trace_events;
        assert_eq!(events[1].ts, 5.0);
        assert_eq!(events[1].name, "Quick Sort (Best, Size: 10)");
        assert_eq!(events[1].ph, "X");
    }
}
