//! Simulation statistics and reporting
//!
//! This module contains the running counters kept by the engine, the exact delay
//! aggregates computed over the parcel tracker, and the end-of-run report.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;
use tracing::info;

use crate::simulation::{BucketCount, SimulationError, SimulationResult};
use crate::sorting::ParcelTracker;
use crate::types::{ParcelId, RunId, Tick};

/// Counters accumulated over a run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunCounters {
    /// Parcels generated, including those discarded on arrival
    pub generated: u64,
    /// Parcels that left the network
    pub dispatched: u64,
    /// Misroute events; a parcel misrouted twice counts twice
    pub returned: u64,
    /// Parcels dropped because the arrival buffer was full
    pub discarded: u64,
    /// Largest arrival buffer size seen at the end of a tick
    pub max_buffer_size: usize,
    /// Largest return stack size seen at the end of a tick
    pub max_stack_size: usize,
}

impl RunCounters {
    /// Fold end-of-tick structure sizes into the running maxima
    pub fn observe_sizes(&mut self, buffer_size: usize, stack_size: usize) {
        self.max_buffer_size = self.max_buffer_size.max(buffer_size);
        self.max_stack_size = self.max_stack_size.max(stack_size);
    }

    /// Percentage of dispatch decisions that were misroutes
    pub fn misroute_percentage(&self) -> f64 {
        let decisions = self.dispatched + self.returned;
        if decisions == 0 {
            0.0
        } else {
            (self.returned as f64 / decisions as f64) * 100.0
        }
    }

    /// Percentage of generated parcels that were discarded
    pub fn discard_percentage(&self) -> f64 {
        if self.generated == 0 {
            0.0
        } else {
            (self.discarded as f64 / self.generated as f64) * 100.0
        }
    }
}

/// The dispatched parcel that waited longest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LongestDelay {
    /// Parcel identifier
    pub parcel_id: ParcelId,
    /// Ticks between arrival and dispatch
    pub delay: Tick,
}

impl fmt::Display for LongestDelay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (delay: {} ticks)", self.parcel_id, self.delay)
    }
}

/// Exact delay and misroute aggregates over tracked parcels
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DelayStatistics {
    /// Dispatched records the average is taken over
    pub dispatched_records: usize,
    /// Mean ticks from arrival to dispatch; 0.0 when nothing was dispatched
    pub average_delay: f64,
    /// Longest single delay; ties go to the smaller parcel identifier
    pub longest_delay: Option<LongestDelay>,
    /// Records misrouted more than once
    pub returned_more_than_once: usize,
}

impl DelayStatistics {
    /// Aggregate over every record in `tracker`
    pub fn from_tracker(tracker: &ParcelTracker) -> Self {
        let mut total_delay: u64 = 0;
        let mut dispatched_records = 0;
        let mut longest_delay: Option<LongestDelay> = None;
        let mut returned_more_than_once = 0;

        for (parcel_id, record) in tracker.records() {
            if record.return_count > 1 {
                returned_more_than_once += 1;
            }

            let Some(delay) = record.processing_delay() else {
                continue;
            };
            total_delay += delay;
            dispatched_records += 1;

            let replaces = match longest_delay {
                None => true,
                Some(best) => {
                    delay > best.delay || (delay == best.delay && parcel_id < best.parcel_id)
                }
            };
            if replaces {
                longest_delay = Some(LongestDelay { parcel_id, delay });
            }
        }

        let average_delay = if dispatched_records == 0 {
            0.0
        } else {
            total_delay as f64 / dispatched_records as f64
        };

        Self { dispatched_records, average_delay, longest_delay, returned_more_than_once }
    }
}

/// End-of-run report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationReport {
    /// Run the report describes
    pub run_id: RunId,
    /// Seed the run used, if one was configured
    pub seed: Option<u64>,
    /// Ticks executed
    pub ticks_executed: Tick,
    /// Run counters
    pub counters: RunCounters,
    /// Parcels left in the arrival buffer
    pub final_buffer_size: usize,
    /// Parcels left on the return stack
    pub final_stack_size: usize,
    /// Parcels left across all destination buckets
    pub final_sorted_parcels: usize,
    /// Final bucket sizes per configured destination
    pub destination_counts: Vec<BucketCount>,
    /// Destination with the most waiting parcels; `None` if every bucket is empty
    pub highest_load_destination: Option<String>,
    /// Delay and misroute aggregates
    pub delays: DelayStatistics,
    /// Final destination tree height
    pub sorter_height: usize,
    /// Destination nodes in the tree
    pub sorter_node_count: usize,
    /// Parcels registered in the tracker
    pub tracked_parcels: usize,
    /// Tracker records per table bucket
    pub tracker_load_factor: f64,
}

impl SimulationReport {
    /// Parcels still inside the network at the end of the run
    pub fn in_flight(&self) -> usize {
        self.final_buffer_size + self.final_stack_size + self.final_sorted_parcels
    }

    /// Whether every generated parcel is accounted for
    pub fn is_conserved(&self) -> bool {
        self.in_flight() as u64 + self.counters.dispatched + self.counters.discarded
            == self.counters.generated
    }

    /// Compact one-line summary
    pub fn summary(&self) -> String {
        format!(
            "{} ticks: {} generated, {} dispatched, {} returned, {} discarded, {} in flight",
            self.ticks_executed,
            self.counters.generated,
            self.counters.dispatched,
            self.counters.returned,
            self.counters.discarded,
            self.in_flight()
        )
    }

    /// Render the human-readable report stamped with `generated_at`
    pub fn render_text(&self, generated_at: DateTime<Utc>) -> String {
        let mut report = String::new();

        report.push_str("ParcelSortX Simulation Report\n");
        report.push_str(&format!("Generated: {}\n", generated_at.format("%Y-%m-%d %H:%M:%S UTC")));
        report.push_str(&format!("Run: {}\n", self.run_id));
        if let Some(seed) = self.seed {
            report.push_str(&format!("Seed: {}\n", seed));
        }
        report.push_str("==========================================\n\n");

        report.push_str("1. Simulation Overview\n");
        report.push_str(&format!("   • Total Ticks Executed: {}\n", self.ticks_executed));
        report.push_str(&format!(
            "   • Number of Parcels Generated: {}\n\n",
            self.counters.generated
        ));

        report.push_str("2. Parcel Statistics\n");
        report.push_str(&format!("   • Total Dispatched Parcels: {}\n", self.counters.dispatched));
        report.push_str(&format!(
            "   • Total Returned Parcels: {} ({:.1}% of dispatch attempts)\n",
            self.counters.returned,
            self.counters.misroute_percentage()
        ));
        report.push_str(&format!(
            "   • Total Parcels Discarded (Queue Overflow): {} ({:.1}%)\n",
            self.counters.discarded,
            self.counters.discard_percentage()
        ));
        report.push_str(&format!("   • Parcels in Queue at End: {}\n", self.final_buffer_size));
        report.push_str(&format!("   • Parcels in BST at End: {}\n", self.final_sorted_parcels));
        report.push_str(&format!(
            "   • Parcels in ReturnStack at End: {}\n\n",
            self.final_stack_size
        ));

        report.push_str("3. Destination Metrics\n");
        for bucket in &self.destination_counts {
            report.push_str(&format!("   • {}: {} parcels\n", bucket.destination, bucket.count));
        }
        report.push_str(&format!(
            "   • Most Frequently Targeted Destination: {}\n\n",
            self.highest_load_destination.as_deref().unwrap_or("None")
        ));

        report.push_str("4. Timing and Delay Metrics\n");
        report.push_str(&format!(
            "   • Average Processing Time: {:.2} ticks\n",
            self.delays.average_delay
        ));
        report.push_str(&format!(
            "   • Parcel With Longest Delay: {}\n",
            self.delays
                .longest_delay
                .map_or_else(|| "None".to_string(), |longest| longest.to_string())
        ));
        report.push_str(&format!(
            "   • Parcels Returned More Than Once: {}\n\n",
            self.delays.returned_more_than_once
        ));

        report.push_str("5. Data Structure Statistics\n");
        report.push_str(&format!(
            "   • Maximum Queue Size Observed: {}\n",
            self.counters.max_buffer_size
        ));
        report.push_str(&format!(
            "   • Maximum Stack Size Observed: {}\n",
            self.counters.max_stack_size
        ));
        report.push_str(&format!("   • Final Height of BST: {}\n", self.sorter_height));
        report.push_str(&format!(
            "   • Hash Table Load Factor: {:.2}\n",
            self.tracker_load_factor
        ));
        report.push_str(&format!("   • Number of Cities in BST: {}\n", self.sorter_node_count));

        report
    }

    /// Write the text report, stamped with the current time, to `path`
    pub fn write_to<P: AsRef<Path>>(&self, path: P) -> SimulationResult<()> {
        let path = path.as_ref();
        fs::write(path, self.render_text(Utc::now()))
            .map_err(|e| SimulationError::report_error(path, e))?;
        info!("Report written to {}", path.display());
        Ok(())
    }

    /// Serialize the report as pretty JSON
    pub fn to_json(&self) -> SimulationResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl fmt::Display for SimulationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render_text(Utc::now()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parcel::Parcel;
    use crate::types::{ParcelStatus, SizeClass};
    use chrono::TimeZone;

    fn tracked(tracker: &mut ParcelTracker, id: u64, arrival: Tick, dispatch: Option<Tick>) {
        let parcel = Parcel::new(ParcelId(id), "Ankara", 1, SizeClass::Small, arrival);
        tracker.insert(ParcelId(id), &parcel);
        if let Some(tick) = dispatch {
            tracker.update_status(ParcelId(id), ParcelStatus::Dispatched);
            tracker.set_dispatch_tick(ParcelId(id), tick);
        }
    }

    fn report() -> SimulationReport {
        SimulationReport {
            run_id: RunId::new(),
            seed: Some(42),
            ticks_executed: 10,
            counters: RunCounters {
                generated: 12,
                dispatched: 5,
                returned: 2,
                discarded: 1,
                max_buffer_size: 4,
                max_stack_size: 1,
            },
            final_buffer_size: 3,
            final_stack_size: 1,
            final_sorted_parcels: 2,
            destination_counts: vec![
                BucketCount { destination: "Istanbul".to_string(), count: 2 },
                BucketCount { destination: "Ankara".to_string(), count: 0 },
            ],
            highest_load_destination: Some("Istanbul".to_string()),
            delays: DelayStatistics {
                dispatched_records: 5,
                average_delay: 3.4,
                longest_delay: Some(LongestDelay { parcel_id: ParcelId(2), delay: 7 }),
                returned_more_than_once: 0,
            },
            sorter_height: 2,
            sorter_node_count: 2,
            tracked_parcels: 11,
            tracker_load_factor: 0.11,
        }
    }

    #[test]
    fn test_counters_track_maxima_and_percentages() {
        let mut counters = RunCounters::default();
        assert_eq!(counters.misroute_percentage(), 0.0);
        assert_eq!(counters.discard_percentage(), 0.0);

        counters.observe_sizes(3, 0);
        counters.observe_sizes(1, 2);
        assert_eq!(counters.max_buffer_size, 3);
        assert_eq!(counters.max_stack_size, 2);

        counters.dispatched = 3;
        counters.returned = 1;
        assert!((counters.misroute_percentage() - 25.0).abs() < 1e-9);
    }

    #[test]
    fn test_delay_statistics_are_exact() {
        let mut tracker = ParcelTracker::new();
        tracked(&mut tracker, 1, 1, Some(3));
        tracked(&mut tracker, 2, 2, Some(9));
        tracked(&mut tracker, 3, 4, None);
        tracker.increment_return_count(ParcelId(3));
        tracker.increment_return_count(ParcelId(3));
        tracker.increment_return_count(ParcelId(1));

        let stats = DelayStatistics::from_tracker(&tracker);
        assert_eq!(stats.dispatched_records, 2);
        assert!((stats.average_delay - 4.5).abs() < 1e-9);
        assert_eq!(stats.longest_delay, Some(LongestDelay { parcel_id: ParcelId(2), delay: 7 }));
        assert_eq!(stats.returned_more_than_once, 1);
    }

    #[test]
    fn test_longest_delay_tie_goes_to_smaller_id() {
        let mut tracker = ParcelTracker::new();
        for id in [40, 7, 19] {
            tracked(&mut tracker, id, 1, Some(6));
        }

        let stats = DelayStatistics::from_tracker(&tracker);
        assert_eq!(stats.longest_delay.unwrap().parcel_id, ParcelId(7));
    }

    #[test]
    fn test_no_dispatches_means_no_longest_delay() {
        let mut tracker = ParcelTracker::new();
        tracked(&mut tracker, 1, 1, None);

        let stats = DelayStatistics::from_tracker(&tracker);
        assert_eq!(stats.average_delay, 0.0);
        assert!(stats.longest_delay.is_none());
    }

    #[test]
    fn test_render_text_sections() {
        let generated_at = Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 0).unwrap();
        let text = report().render_text(generated_at);

        assert!(text.starts_with("ParcelSortX Simulation Report\n"));
        assert!(text.contains("Generated: 2024-03-01 12:30:00 UTC"));
        assert!(text.contains("Seed: 42"));
        for section in [
            "1. Simulation Overview",
            "2. Parcel Statistics",
            "3. Destination Metrics",
            "4. Timing and Delay Metrics",
            "5. Data Structure Statistics",
        ] {
            assert!(text.contains(section), "missing section {section}");
        }
        assert!(text.contains("   • Istanbul: 2 parcels"));
        assert!(text.contains("Most Frequently Targeted Destination: Istanbul"));
        assert!(text.contains("Average Processing Time: 3.40 ticks"));
        assert!(text.contains("Parcel With Longest Delay: P0002 (delay: 7 ticks)"));
        assert!(text.contains("Hash Table Load Factor: 0.11"));
    }

    #[test]
    fn test_render_text_without_load_or_dispatches() {
        let mut report = report();
        report.highest_load_destination = None;
        report.delays = DelayStatistics::default();

        let text = report.render_text(Utc::now());
        assert!(text.contains("Most Frequently Targeted Destination: None"));
        assert!(text.contains("Parcel With Longest Delay: None"));
    }

    #[test]
    fn test_conservation_and_summary() {
        let report = report();
        assert_eq!(report.in_flight(), 6);
        assert!(report.is_conserved());
        assert!(report.summary().starts_with("10 ticks: 12 generated"));
    }
}
