//! Per-tick log writer
//!
//! A [`TickObserver`] that writes every tick to a log, either as a human-readable
//! block of lines or as one JSON object per line.

use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::debug;

use crate::simulation::{
    SimulationError, SimulationReport, SimulationResult, TickEvents, TickObserver,
};
use crate::types::{DispatchOutcome, LogFormat, RunId, SimulationConfig, SortSource};

/// One line of a JSON tick log
#[derive(Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
enum JsonRecord<'a> {
    RunStart { run_id: RunId, config: &'a SimulationConfig },
    Tick(&'a TickEvents),
    RunEnd(&'a SimulationReport),
}

/// Writes tick events to `W` in the configured [`LogFormat`]
#[derive(Debug)]
pub struct TickLogWriter<W: Write> {
    writer: W,
    format: LogFormat,
    ticks_written: u64,
}

impl TickLogWriter<BufWriter<File>> {
    /// Create (or truncate) the log file at `path`
    pub fn create<P: AsRef<Path>>(path: P, format: LogFormat) -> SimulationResult<Self> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|e| SimulationError::tick_log_error(path, e))?;
        debug!("Writing {} tick log to {}", format, path.display());
        Ok(Self::new(BufWriter::new(file), format))
    }
}

impl<W: Write> TickLogWriter<W> {
    /// Wrap `writer`
    pub fn new(writer: W, format: LogFormat) -> Self {
        Self { writer, format, ticks_written: 0 }
    }

    /// Output format
    pub fn format(&self) -> LogFormat {
        self.format
    }

    /// Number of ticks written so far
    pub fn ticks_written(&self) -> u64 {
        self.ticks_written
    }

    /// Flush and return the underlying writer
    pub fn into_inner(mut self) -> SimulationResult<W> {
        self.writer.flush()?;
        Ok(self.writer)
    }

    fn write_json(&mut self, record: &JsonRecord<'_>) -> SimulationResult<()> {
        serde_json::to_writer(&mut self.writer, record)?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_text_tick(&mut self, events: &TickEvents) -> SimulationResult<()> {
        let w = &mut self.writer;
        let snapshot = &events.snapshot;

        writeln!(w, "[{}]", events.tick)?;

        for parcel in &events.discarded {
            writeln!(
                w,
                "WARNING: Queue overflow - discarding parcel {} to {}",
                parcel.id, parcel.destination
            )?;
        }
        if !events.generated.is_empty() {
            let parcels: Vec<String> = events.generated.iter().map(ToString::to_string).collect();
            writeln!(w, "New Parcels: {}", parcels.join(", "))?;
        }
        if !events.discarded.is_empty() {
            writeln!(w, "Parcels discarded due to queue overflow: {}", events.discarded.len())?;
        }
        writeln!(w, "Queue Size: {}/{}", snapshot.buffer_size, snapshot.buffer_capacity)?;

        match &events.sort {
            Some(sort) if sort.source == SortSource::ReturnStack => {
                writeln!(w, "Reprocessed: {} from ReturnStack to BST", sort.parcel_id)?
            }
            Some(sort) => writeln!(w, "Sorted to BST: {}", sort.parcel_id)?,
            None => {}
        }

        if let Some(rotation) = &events.rotation {
            writeln!(w, "Rotated to: {}", rotation.to)?;
        }

        if let Some(dispatch) = &events.dispatch {
            match dispatch.outcome {
                DispatchOutcome::Returned => writeln!(
                    w,
                    "Returned: {} misrouted -> Pushed to ReturnStack",
                    dispatch.parcel_id
                )?,
                DispatchOutcome::Dispatched => writeln!(
                    w,
                    "Dispatched: {} from BST to {} -> Success",
                    dispatch.parcel_id, dispatch.destination
                )?,
            }
        }

        writeln!(w, "Active Terminal: {}", snapshot.active_terminal.as_deref().unwrap_or("None"))?;
        writeln!(w, "ReturnStack Size: {}", snapshot.stack_size)?;
        let buckets: Vec<String> = snapshot
            .buckets
            .iter()
            .map(|bucket| format!("{}: {}", bucket.destination, bucket.count))
            .collect();
        writeln!(w, "BST Status: {}", buckets.join(", "))?;
        writeln!(w)?;
        Ok(())
    }
}

impl<W: Write> TickObserver for TickLogWriter<W> {
    fn on_run_start(&mut self, run_id: RunId, config: &SimulationConfig) -> SimulationResult<()> {
        match self.format {
            LogFormat::Json => self.write_json(&JsonRecord::RunStart { run_id, config }),
            LogFormat::Text => {
                writeln!(self.writer, "Starting ParcelSortX Simulation")?;
                writeln!(
                    self.writer,
                    "Configuration loaded: {} ticks, {} cities",
                    config.max_ticks,
                    config.city_list.len()
                )?;
                writeln!(self.writer, "Queue Capacity: {}", config.queue_capacity)?;
                Ok(())
            }
        }
    }

    fn on_tick(&mut self, events: &TickEvents) -> SimulationResult<()> {
        match self.format {
            LogFormat::Json => self.write_json(&JsonRecord::Tick(events))?,
            LogFormat::Text => self.write_text_tick(events)?,
        }
        self.ticks_written += 1;
        Ok(())
    }

    fn on_run_end(&mut self, report: &SimulationReport) -> SimulationResult<()> {
        match self.format {
            LogFormat::Json => self.write_json(&JsonRecord::RunEnd(report))?,
            LogFormat::Text => writeln!(self.writer, "Simulation complete: {}", report.summary())?,
        }
        self.writer.flush()?;
        Ok(())
    }
}
