//! CSV output
//!
//! One row per recognised console line: seconds since logging started and
//! the angle in degrees. Lines without an angle are skipped.

use std::io::Write;
use std::time::Duration;

use angulus_core::{Angle, Readout};
use anyhow::Result;

/// Column headers
pub const HEADER: [&str; 2] = ["Timestamp (s)", "Angle (deg)"];

/// Writes angle rows to a CSV sink
pub struct AngleLog<W: Write> {
    writer: csv::Writer<W>,
    rows: u64,
}

impl<W: Write> AngleLog<W> {
    /// Start a log and write the header row
    pub fn new(sink: W) -> Result<Self> {
        let mut writer = csv::WriterBuilder::new()
            .terminator(csv::Terminator::CRLF)
            .from_writer(sink);
        writer.write_record(HEADER)?;
        writer.flush()?;
        Ok(Self { writer, rows: 0 })
    }

    /// Record `line` if it carries an angle
    ///
    /// Every row is flushed so an interrupted run keeps what it logged.
    pub fn record(&mut self, line: &str, elapsed: Duration) -> Result<Option<Angle>> {
        let Some(angle) = Readout::parse(line) else {
            return Ok(None);
        };

        let timestamp = format!("{:.5}", elapsed.as_secs_f64());
        let degrees = format!("{:.4}", angle.degrees());
        self.writer.write_record([timestamp.as_str(), degrees.as_str()])?;
        self.writer.flush()?;
        self.rows += 1;
        Ok(Some(angle))
    }

    /// Rows written so far, header excluded
    pub fn rows(&self) -> u64 {
        self.rows
    }
}
