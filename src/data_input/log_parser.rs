// src/data_input/log_parser.rs

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord};
use log::{debug, info, warn};
use serde::Serialize;

use crate::axis_names::AXIS_COUNT;
use crate::constants::HEADER_MARKER;
use crate::data_input::log_data::{LogRowData, LogSeries};
use crate::data_input::pid_metadata::{parse_preamble, try_parse_number, FlightConfig};
use crate::error::{DataLineError, TunerError};

/// A data line that was dropped, with its 1-based line number in the input.
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedLine {
    pub line_number: usize,
    pub reason: DataLineError,
}

/// Non-fatal problems absorbed while reading the tabular section.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParseDiagnostics {
    pub skipped_lines: Vec<SkippedLine>,
    pub field_parse_failures: usize,
    pub missing_columns: Vec<&'static str>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct DiagnosticsSummary {
    pub skipped_lines: usize,
    pub field_parse_failures: usize,
}

impl ParseDiagnostics {
    pub fn summary(&self) -> DiagnosticsSummary {
        DiagnosticsSummary {
            skipped_lines: self.skipped_lines.len(),
            field_parse_failures: self.field_parse_failures,
        }
    }
}

/// Everything the analysis needs from one blackbox CSV export.
#[derive(Debug, Clone, Default)]
pub struct FlightLog {
    pub config: FlightConfig,
    pub samples: LogSeries,
    pub diagnostics: ParseDiagnostics,
}

// Column names as written by blackbox_decode.
const TIME: &str = "time";
const P_COLUMNS: [&str; AXIS_COUNT] = ["axisP[0]", "axisP[1]", "axisP[2]"];
const I_COLUMNS: [&str; AXIS_COUNT] = ["axisI[0]", "axisI[1]", "axisI[2]"];
// axisD[2] is not logged for yaw.
const D_COLUMNS: [&str; 2] = ["axisD[0]", "axisD[1]"];
const F_COLUMNS: [&str; AXIS_COUNT] = ["axisF[0]", "axisF[1]", "axisF[2]"];
const RC_COLUMNS: [&str; AXIS_COUNT] = ["rcCommand[0]", "rcCommand[1]", "rcCommand[2]"];
const GYRO_COLUMNS: [&str; AXIS_COUNT] = ["gyroADC[0]", "gyroADC[1]", "gyroADC[2]"];

/// Name to position mapping built from the header line.
struct ColumnMap {
    indices: HashMap<String, usize>,
}

impl ColumnMap {
    fn from_header(header: &StringRecord) -> Self {
        let mut indices = HashMap::new();
        for (i, name) in header.iter().enumerate() {
            // Later duplicates win.
            indices.insert(name.trim().trim_matches('"').to_string(), i);
        }
        Self { indices }
    }

    /// Fields a data line must have to be considered complete.
    fn len(&self) -> usize {
        self.indices.len()
    }

    fn missing_required(&self) -> Vec<&'static str> {
        std::iter::once(TIME)
            .chain(P_COLUMNS)
            .chain(I_COLUMNS)
            .chain(D_COLUMNS)
            .chain(F_COLUMNS)
            .chain(RC_COLUMNS)
            .chain(GYRO_COLUMNS)
            .filter(|name| !self.indices.contains_key(*name))
            .collect()
    }

    fn field<'r>(
        &self,
        record: &'r StringRecord,
        name: &'static str,
    ) -> Result<&'r str, DataLineError> {
        let idx = *self
            .indices
            .get(name)
            .ok_or(DataLineError::MissingColumn(name))?;
        record.get(idx).ok_or(DataLineError::TooFewFields {
            found: record.len(),
            expected: idx + 1,
        })
    }
}

/// Pulls a `LogRowData` out of one record. Bad numbers become 0.0 and are counted.
struct RowExtractor<'a> {
    columns: &'a ColumnMap,
    field_failures: usize,
}

impl<'a> RowExtractor<'a> {
    fn number(&mut self, record: &StringRecord, name: &'static str) -> Result<f64, DataLineError> {
        let raw = self.columns.field(record, name)?;
        Ok(match try_parse_number(raw) {
            Some(v) => v,
            None => {
                self.field_failures += 1;
                0.0
            }
        })
    }

    fn triple(
        &mut self,
        record: &StringRecord,
        names: [&'static str; AXIS_COUNT],
    ) -> Result<[f64; AXIS_COUNT], DataLineError> {
        Ok([
            self.number(record, names[0])?,
            self.number(record, names[1])?,
            self.number(record, names[2])?,
        ])
    }

    fn extract(&mut self, record: &StringRecord) -> Result<LogRowData, DataLineError> {
        if record.len() < self.columns.len() {
            return Err(DataLineError::TooFewFields {
                found: record.len(),
                expected: self.columns.len(),
            });
        }
        Ok(LogRowData {
            time_sec: self.number(record, TIME)?,
            p_term: self.triple(record, P_COLUMNS)?,
            i_term: self.triple(record, I_COLUMNS)?,
            d_term: [
                self.number(record, D_COLUMNS[0])?,
                self.number(record, D_COLUMNS[1])?,
                0.0,
            ],
            f_term: self.triple(record, F_COLUMNS)?,
            rc_command: self.triple(record, RC_COLUMNS)?,
            gyro: self.triple(record, GYRO_COLUMNS)?,
        })
    }
}

/// A whitespace-only line. A line of bare commas is not blank; its empty fields parse as 0.0.
fn is_blank(record: &StringRecord) -> bool {
    record.len() <= 1 && record.iter().all(|field| field.trim().is_empty())
}

/// Parses raw log text into the firmware configuration and the sample series.
///
/// Fails with `EmptyLog` when there are no lines at all and with `MissingHeader`
/// when no line contains `loopIteration`. Individual bad fields and bad lines are
/// absorbed and reported through `FlightLog::diagnostics`.
pub fn parse_log(raw_text: &str) -> Result<FlightLog, TunerError> {
    let lines: Vec<&str> = raw_text.lines().collect();
    if lines.is_empty() {
        return Err(TunerError::EmptyLog);
    }

    let header_index = lines
        .iter()
        .position(|line| line.contains(HEADER_MARKER))
        .ok_or(TunerError::MissingHeader {
            marker: HEADER_MARKER,
        })?;
    debug!("Found CSV header at line {}", header_index + 1);

    let config = parse_preamble(lines[..header_index].iter().copied());

    let csv_content = lines[header_index..].join("\n");
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        // Each line stands alone; a stray quote must not swallow the lines after it.
        .quoting(false)
        .trim(csv::Trim::All)
        .from_reader(csv_content.as_bytes());

    let columns = ColumnMap::from_header(reader.headers()?);
    let mut diagnostics = ParseDiagnostics {
        missing_columns: columns.missing_required(),
        ..Default::default()
    };
    if !diagnostics.missing_columns.is_empty() {
        warn!(
            "Header is missing required columns {:?}; every data line will be skipped",
            diagnostics.missing_columns
        );
    }

    let mut samples = LogSeries::default();
    let mut extractor = RowExtractor {
        columns: &columns,
        field_failures: 0,
    };

    for result in reader.records() {
        let (line_number, outcome) = match result {
            Ok(record) => {
                if is_blank(&record) {
                    continue;
                }
                let line = record.position().map_or(0, |p| p.line() as usize);
                (line, extractor.extract(&record))
            }
            Err(e) => {
                let line = e.position().map_or(0, |p| p.line() as usize);
                (line, Err(DataLineError::Malformed(e.to_string())))
            }
        };
        // Reader lines count from the header line as 1.
        let line_number = header_index + line_number;

        match outcome {
            Ok(row) => samples.push_row(&row),
            Err(reason) => {
                if matches!(reason, DataLineError::MissingColumn(_)) {
                    debug!("Skipping line {}: {}", line_number, reason);
                } else {
                    warn!("Skipping line {}: {}", line_number, reason);
                }
                diagnostics.skipped_lines.push(SkippedLine {
                    line_number,
                    reason,
                });
            }
        }
    }
    diagnostics.field_parse_failures = extractor.field_failures;

    info!(
        "Finished reading {} data rows ({} skipped, {} unparseable fields)",
        samples.len(),
        diagnostics.skipped_lines.len(),
        diagnostics.field_parse_failures
    );
    if let Some(rate) = samples.estimated_sample_rate() {
        debug!("Estimated sample rate: {:.2} Hz", rate);
    }

    Ok(FlightLog {
        config,
        samples,
        diagnostics,
    })
}

/// Raw bytes as handed over by a file picker; invalid UTF-8 is replaced, not rejected.
pub fn parse_log_bytes(raw: &[u8]) -> Result<FlightLog, TunerError> {
    parse_log(&String::from_utf8_lossy(raw))
}

pub fn parse_log_file(input_file_path: &Path) -> Result<FlightLog, TunerError> {
    let raw = fs::read(input_file_path).map_err(|source| TunerError::Io {
        path: input_file_path.to_path_buf(),
        source,
    })?;
    parse_log_bytes(&raw)
}


// src/data_input/log_parser.rs
