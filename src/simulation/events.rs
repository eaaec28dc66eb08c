//! Per-tick observable events
//!
//! [`TickEvents`] captures everything that happened during one tick, and
//! [`TickObserver`] is the hook through which logging and reporting collaborators
//! receive it. The engine never formats output itself.

use serde::{Deserialize, Serialize};

use crate::parcel::ParcelDescriptor;
use crate::simulation::{SimulationReport, SimulationResult};
use crate::types::{DispatchOutcome, ParcelId, RunId, SimulationConfig, SortSource, Tick};

/// The single sort performed during a tick
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortEvent {
    /// Where the parcel came from
    pub source: SortSource,
    /// Parcel that was sorted
    pub parcel_id: ParcelId,
}

/// A terminal rotation that took effect this tick
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RotationEvent {
    /// Terminal active before the rotation
    pub from: String,
    /// Terminal active after the rotation
    pub to: String,
}

/// The single dispatch decision made during a tick
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchEvent {
    /// Parcel taken from the head of the active terminal's bucket
    pub parcel_id: ParcelId,
    /// Whether the parcel left the network or was misrouted
    pub outcome: DispatchOutcome,
    /// Active terminal the decision was made at
    pub destination: String,
}

/// Number of parcels waiting in one destination bucket
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BucketCount {
    /// Destination name
    pub destination: String,
    /// Parcels waiting for it
    pub count: usize,
}

/// Structure sizes at the end of a tick
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickSnapshot {
    /// Parcels in the arrival buffer
    pub buffer_size: usize,
    /// Arrival buffer capacity
    pub buffer_capacity: usize,
    /// Parcels on the return stack
    pub stack_size: usize,
    /// Active terminal after any rotation
    pub active_terminal: Option<String>,
    /// Bucket sizes for every configured destination, in configuration order
    pub buckets: Vec<BucketCount>,
}

impl TickSnapshot {
    /// Parcels across all listed buckets
    pub fn sorted_parcels(&self) -> usize {
        self.buckets.iter().map(|bucket| bucket.count).sum()
    }
}

/// Everything observable about one executed tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickEvents {
    /// Run the tick belongs to
    pub run_id: RunId,
    /// Tick number, starting at 1
    pub tick: Tick,
    /// Parcels accepted into the arrival buffer
    pub generated: Vec<ParcelDescriptor>,
    /// Parcels dropped because the arrival buffer was full
    pub discarded: Vec<ParcelDescriptor>,
    /// Sort performed, if any source had a parcel
    pub sort: Option<SortEvent>,
    /// Rotation performed before dispatch, if one was due
    pub rotation: Option<RotationEvent>,
    /// Dispatch decision, if the active bucket was non-empty
    pub dispatch: Option<DispatchEvent>,
    /// Sizes after the tick completed
    pub snapshot: TickSnapshot,
}

impl TickEvents {
    /// Parcels generated this tick, accepted or not
    pub fn arrivals(&self) -> usize {
        self.generated.len() + self.discarded.len()
    }
}

/// Receives simulation progress from
/// [`SimulationEngine::run_with_observer`](crate::simulation::SimulationEngine::run_with_observer)
///
/// All methods default to doing nothing. An error returned from any of them detaches
/// the observer for the rest of the run; the run itself always completes.
pub trait TickObserver {
    /// Called once before the first tick
    fn on_run_start(&mut self, _run_id: RunId, _config: &SimulationConfig) -> SimulationResult<()> {
        Ok(())
    }

    /// Called after every tick
    fn on_tick(&mut self, _events: &TickEvents) -> SimulationResult<()> {
        Ok(())
    }

    /// Called once after the final tick with the end-of-run report
    fn on_run_end(&mut self, _report: &SimulationReport) -> SimulationResult<()> {
        Ok(())
    }
}

/// Observer that ignores every event
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl TickObserver for NoopObserver {}

/// Observer that keeps every tick's events in memory
#[derive(Debug, Clone, Default)]
pub struct RecordingObserver {
    /// Events in tick order
    pub ticks: Vec<TickEvents>,
    /// Whether `on_run_end` was called
    pub finished: bool,
}

impl TickObserver for RecordingObserver {
    fn on_tick(&mut self, events: &TickEvents) -> SimulationResult<()> {
        self.ticks.push(events.clone());
        Ok(())
    }

    fn on_run_end(&mut self, _report: &SimulationReport) -> SimulationResult<()> {
        self.finished = true;
        Ok(())
    }
}
