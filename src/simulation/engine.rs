//! Tick-driven simulation engine
//!
//! This module contains the SimulationEngine, which owns the five sorting
//! structures, the shared random number generator, and the run counters, and
//! advances them one tick at a time.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::io;
use tracing::{debug, info, instrument, warn};

use crate::parcel::{Parcel, ParcelDescriptor, ParcelGenerator};
use crate::simulation::{
    BucketCount, DelayStatistics, DispatchEvent, RotationEvent, RunCounters, SimulationReport,
    SimulationResult, SortEvent, TickEvents, TickLogWriter, TickObserver, TickSnapshot,
};
use crate::sorting::{
    ArrivalBuffer, DestinationSorter, EnqueueOutcome, ParcelTracker, ReturnStack, TerminalRotator,
};
use crate::types::{DispatchOutcome, ParcelStatus, RunId, SimulationConfig, SortSource, Tick};

/// Owns every piece of run state and executes ticks in order
#[derive(Debug)]
pub struct SimulationEngine {
    config: SimulationConfig,
    run_id: RunId,
    rng: StdRng,
    generator: ParcelGenerator,
    buffer: ArrivalBuffer,
    returns: ReturnStack,
    rotator: TerminalRotator,
    sorter: DestinationSorter,
    tracker: ParcelTracker,
    counters: RunCounters,
    current_tick: Tick,
}

impl SimulationEngine {
    /// Validate `config` and build a fresh engine at tick 0
    #[instrument(skip(config), fields(max_ticks = config.max_ticks, cities = config.city_list.len()))]
    pub fn new(config: SimulationConfig) -> SimulationResult<Self> {
        config.validate()?;

        let rng = if let Some(seed) = config.seed {
            info!("Using deterministic seed: {}", seed);
            StdRng::seed_from_u64(seed)
        } else {
            debug!("Using entropy-based random seed");
            StdRng::from_entropy()
        };

        let run_id = RunId::new();
        info!(
            "Initializing run {} with {} ticks, queue capacity {}, {} destinations",
            run_id,
            config.max_ticks,
            config.queue_capacity,
            config.city_list.len()
        );

        Ok(Self {
            run_id,
            rng,
            generator: ParcelGenerator::new(config.city_list.clone()),
            buffer: ArrivalBuffer::new(config.queue_capacity),
            returns: ReturnStack::new(),
            rotator: TerminalRotator::new(config.city_list.iter().cloned()),
            sorter: DestinationSorter::new(),
            tracker: ParcelTracker::new(),
            counters: RunCounters::default(),
            current_tick: 0,
            config,
        })
    }

    /// Execute exactly one tick and describe what happened
    ///
    /// The phases run in a fixed order: generate, sort one, rotate if due,
    /// dispatch one, then update the running maxima.
    pub fn step(&mut self) -> TickEvents {
        let tick = self.current_tick + 1;
        self.current_tick = tick;

        let (generated, discarded) = self.generate_parcels(tick);
        let sort = self.sort_one(tick);
        let rotation = self.rotate_if_due(tick);
        let dispatch = self.dispatch_one(tick);
        self.counters.observe_sizes(self.buffer.size(), self.returns.size());

        debug_assert!(self.conservation_holds());

        TickEvents {
            run_id: self.run_id,
            tick,
            generated,
            discarded,
            sort,
            rotation,
            dispatch,
            snapshot: self.snapshot(),
        }
    }

    /// Run every remaining tick and return the end-of-run report
    #[instrument(skip(self), fields(run_id = %self.run_id))]
    pub fn run(&mut self) -> SimulationReport {
        while !self.is_finished() {
            self.step();
        }
        let report = self.report();
        info!("Simulation complete: {}", report.summary());
        report
    }

    /// Run every remaining tick, feeding each tick's events to `observer`
    ///
    /// The first observer error is logged and the observer is detached; the
    /// remaining ticks still run.
    #[instrument(skip(self, observer), fields(run_id = %self.run_id))]
    pub fn run_with_observer(&mut self, observer: &mut dyn TickObserver) -> SimulationReport {
        let mut attached = observe(true, observer.on_run_start(self.run_id, &self.config));

        while !self.is_finished() {
            let events = self.step();
            if attached {
                attached = observe(attached, observer.on_tick(&events));
            }
        }

        let report = self.report();
        if attached {
            observe(attached, observer.on_run_end(&report));
        }
        info!("Simulation complete: {}", report.summary());
        report
    }

    /// Run every remaining tick, writing the tick log named in the configuration
    ///
    /// A log file that cannot be created is replaced by standard output. Without a
    /// configured log file this is [`run`](Self::run).
    pub fn run_with_tick_log(&mut self) -> SimulationReport {
        let format = self.config.log_format;
        let Some(path) = self.config.log_file.clone() else {
            return self.run();
        };

        match TickLogWriter::create(&path, format) {
            Ok(mut log) => self.run_with_observer(&mut log),
            Err(e) => {
                let cause = std::error::Error::source(&e).map(ToString::to_string);
                warn!(
                    "{}: {}; writing tick log to standard output",
                    e,
                    cause.unwrap_or_default()
                );
                let mut log = TickLogWriter::new(io::stdout().lock(), format);
                self.run_with_observer(&mut log)
            }
        }
    }

    /// Whether the configured number of ticks has been executed
    pub fn is_finished(&self) -> bool {
        self.current_tick >= self.config.max_ticks
    }

    /// Whether every generated parcel is in a structure, dispatched, or discarded
    pub fn conservation_holds(&self) -> bool {
        let in_flight =
            (self.buffer.size() + self.returns.size() + self.sorter.total_parcels()) as u64;
        in_flight + self.counters.dispatched + self.counters.discarded == self.counters.generated
    }

    /// Build the end-of-run report from the current state
    pub fn report(&self) -> SimulationReport {
        SimulationReport {
            run_id: self.run_id,
            seed: self.config.seed,
            ticks_executed: self.current_tick,
            counters: self.counters,
            final_buffer_size: self.buffer.size(),
            final_stack_size: self.returns.size(),
            final_sorted_parcels: self.sorter.total_parcels(),
            destination_counts: self.bucket_counts(),
            highest_load_destination: self.sorter.city_with_highest_load().map(str::to_string),
            delays: DelayStatistics::from_tracker(&self.tracker),
            sorter_height: self.sorter.height(),
            sorter_node_count: self.sorter.node_count(),
            tracked_parcels: self.tracker.len(),
            tracker_load_factor: self.tracker.load_factor(),
        }
    }

    /// Identifier of this run
    pub fn run_id(&self) -> RunId {
        self.run_id
    }

    /// Configuration the engine was built with
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Last executed tick; 0 before the first step
    pub fn current_tick(&self) -> Tick {
        self.current_tick
    }

    /// Counters accumulated so far
    pub fn counters(&self) -> &RunCounters {
        &self.counters
    }

    /// The arrival buffer
    pub fn arrival_buffer(&self) -> &ArrivalBuffer {
        &self.buffer
    }

    /// The return stack
    pub fn return_stack(&self) -> &ReturnStack {
        &self.returns
    }

    /// The terminal rotator
    pub fn terminal_rotator(&self) -> &TerminalRotator {
        &self.rotator
    }

    /// The destination sorter
    pub fn destination_sorter(&self) -> &DestinationSorter {
        &self.sorter
    }

    /// The parcel tracker
    pub fn parcel_tracker(&self) -> &ParcelTracker {
        &self.tracker
    }

    fn generate_parcels(&mut self, tick: Tick) -> (Vec<ParcelDescriptor>, Vec<ParcelDescriptor>) {
        let (min, max) = self.config.parcels_per_tick();
        let count = self.generator.draw_count(&mut self.rng, min, max);

        let mut generated = Vec::with_capacity(count);
        let mut discarded = Vec::new();

        for _ in 0..count {
            let Some(parcel) = self.generator.generate(&mut self.rng, tick) else {
                break;
            };
            self.counters.generated += 1;

            match self.buffer.enqueue(parcel.clone()) {
                EnqueueOutcome::Accepted => {
                    self.tracker.insert(parcel.id(), &parcel);
                    generated.push(parcel.descriptor());
                }
                EnqueueOutcome::Discarded(parcel) => {
                    self.counters.discarded += 1;
                    warn!(
                        tick,
                        "Queue overflow - discarding parcel {} to {}",
                        parcel.id(),
                        parcel.destination()
                    );
                    discarded.push(parcel.descriptor());
                }
            }
        }

        debug!(
            tick,
            generated = generated.len(),
            discarded = discarded.len(),
            queue_size = self.buffer.size(),
            "Generated parcels"
        );
        (generated, discarded)
    }

    fn sort_one(&mut self, tick: Tick) -> Option<SortEvent> {
        let (mut parcel, source) = if let Some(parcel) = self.returns.pop(tick) {
            (parcel, SortSource::ReturnStack)
        } else {
            (self.buffer.dequeue()?, SortSource::ArrivalBuffer)
        };

        let parcel_id = parcel.id();
        parcel.set_status(ParcelStatus::Sorted);
        self.tracker.update_status(parcel_id, ParcelStatus::Sorted);
        debug!(tick, %parcel_id, %source, destination = parcel.destination(), "Sorted parcel");
        self.sorter.insert_parcel(parcel);

        Some(SortEvent { source, parcel_id })
    }

    fn rotate_if_due(&mut self, tick: Tick) -> Option<RotationEvent> {
        let interval = self.config.terminal_rotation_interval;
        if tick == 1 || (tick - 1).checked_rem(interval) != Some(0) {
            return None;
        }

        let from = self.rotator.active_terminal()?.to_string();
        self.rotator.advance();
        let to = self.rotator.active_terminal()?.to_string();
        debug!(tick, %from, %to, "Rotated terminal");

        Some(RotationEvent { from, to })
    }

    fn dispatch_one(&mut self, tick: Tick) -> Option<DispatchEvent> {
        let destination = self.rotator.active_terminal()?.to_string();
        let parcel_id = self.sorter.front(&destination)?.id();

        let misrouted = self.rng.gen::<f64>() < self.config.misrouting_rate;
        let parcel = self.sorter.remove_parcel(&destination, parcel_id)?;

        let outcome = if misrouted {
            self.return_parcel(parcel, tick);
            DispatchOutcome::Returned
        } else {
            self.tracker.update_status(parcel_id, ParcelStatus::Dispatched);
            self.tracker.set_dispatch_tick(parcel_id, tick);
            self.counters.dispatched += 1;
            DispatchOutcome::Dispatched
        };
        debug!(tick, %parcel_id, %destination, %outcome, "Dispatch decision");

        Some(DispatchEvent { parcel_id, outcome, destination })
    }

    fn return_parcel(&mut self, mut parcel: Parcel, tick: Tick) {
        let parcel_id = parcel.id();
        parcel.set_status(ParcelStatus::Returned);
        self.tracker.update_status(parcel_id, ParcelStatus::Returned);
        self.tracker.increment_return_count(parcel_id);
        self.returns.push(parcel, tick);
        self.counters.returned += 1;
    }

    fn bucket_counts(&self) -> Vec<BucketCount> {
        self.config
            .distinct_cities()
            .into_iter()
            .map(|city| BucketCount {
                destination: city.to_string(),
                count: self.sorter.count_city_parcels(city),
            })
            .collect()
    }

    fn snapshot(&self) -> TickSnapshot {
        TickSnapshot {
            buffer_size: self.buffer.size(),
            buffer_capacity: self.buffer.capacity(),
            stack_size: self.returns.size(),
            active_terminal: self.rotator.active_terminal().map(str::to_string),
            buckets: self.bucket_counts(),
        }
    }
}

/// Keep an observer attached only while its callbacks succeed
fn observe(attached: bool, result: SimulationResult<()>) -> bool {
    match result {
        Ok(()) => attached,
        Err(e) => {
            warn!(category = e.category(), "Detaching tick observer: {}", e);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::{RecordingObserver, SimulationError};
    use crate::types::ConfigValidationError;

    fn config(seed: u64) -> SimulationConfig {
        SimulationConfig { max_ticks: 50, seed: Some(seed), ..Default::default() }
    }

    #[test]
    fn test_engine_rejects_invalid_config() {
        let config = SimulationConfig { city_list: Vec::new(), ..Default::default() };
        let error = SimulationEngine::new(config).unwrap_err();
        assert!(matches!(
            error,
            SimulationError::ConfigurationError(ConfigValidationError::EmptyCityList)
        ));
    }

    #[test]
    fn test_same_seed_same_run() {
        let mut first = SimulationEngine::new(config(7)).unwrap();
        let mut second = SimulationEngine::new(config(7)).unwrap();

        for _ in 0..50 {
            let a = first.step();
            let b = second.step();
            assert_eq!(a.generated, b.generated);
            assert_eq!(a.sort, b.sort);
            assert_eq!(a.dispatch, b.dispatch);
            assert_eq!(a.snapshot, b.snapshot);
        }
        assert_eq!(first.counters(), second.counters());
    }

    #[test]
    fn test_conservation_every_tick() {
        let config = SimulationConfig {
            max_ticks: 200,
            queue_capacity: 3,
            parcel_per_tick_min: 2,
            parcel_per_tick_max: 4,
            misrouting_rate: 0.3,
            seed: Some(11),
            ..Default::default()
        };
        let mut engine = SimulationEngine::new(config).unwrap();

        while !engine.is_finished() {
            let events = engine.step();
            assert!(engine.conservation_holds(), "conservation broken at tick {}", events.tick);
            assert!(events.snapshot.buffer_size <= 3);
        }
        assert!(engine.counters().discarded > 0);
    }

    #[test]
    fn test_rotation_happens_before_dispatch_on_schedule() {
        let config = SimulationConfig {
            max_ticks: 12,
            terminal_rotation_interval: 5,
            seed: Some(3),
            ..Default::default()
        };
        let mut engine = SimulationEngine::new(config).unwrap();
        let mut observer = RecordingObserver::default();
        engine.run_with_observer(&mut observer);

        let rotated: Vec<Tick> =
            observer.ticks.iter().filter(|t| t.rotation.is_some()).map(|t| t.tick).collect();
        assert_eq!(rotated, vec![6, 11]);

        let tick6 = &observer.ticks[5];
        let rotation = tick6.rotation.as_ref().unwrap();
        assert_eq!(rotation.from, "Istanbul");
        assert_eq!(rotation.to, "Ankara");
        assert_eq!(tick6.snapshot.active_terminal.as_deref(), Some("Ankara"));
        if let Some(dispatch) = &tick6.dispatch {
            assert_eq!(dispatch.destination, "Ankara");
        }
        assert!(observer.finished);
    }

    #[test]
    fn test_full_misrouting_never_dispatches() {
        let config = SimulationConfig {
            max_ticks: 40,
            misrouting_rate: 1.0,
            city_list: vec!["A".to_string()],
            seed: Some(5),
            ..Default::default()
        };
        let mut engine = SimulationEngine::new(config).unwrap();
        let report = engine.run();

        assert_eq!(report.counters.dispatched, 0);
        assert!(report.counters.returned > 0);
        assert!(engine
            .parcel_tracker()
            .records()
            .all(|(_, record)| record.status != ParcelStatus::Dispatched));
        assert!(report.delays.longest_delay.is_none());
    }

    #[test]
    fn test_zero_misrouting_never_returns() {
        let config = SimulationConfig { misrouting_rate: 0.0, ..config(9) };
        let mut engine = SimulationEngine::new(config).unwrap();
        let report = engine.run();

        assert_eq!(report.counters.returned, 0);
        assert!(report.counters.dispatched > 0);
        assert!(engine.return_stack().is_empty());
        assert_eq!(report.counters.max_stack_size, 0);
    }

    #[test]
    fn test_returned_parcel_waits_one_tick_before_resort() {
        let config = SimulationConfig {
            max_ticks: 30,
            misrouting_rate: 1.0,
            city_list: vec!["A".to_string()],
            seed: Some(1),
            ..Default::default()
        };
        let mut engine = SimulationEngine::new(config).unwrap();
        let mut observer = RecordingObserver::default();
        engine.run_with_observer(&mut observer);

        for window in observer.ticks.windows(2) {
            let (earlier, later) = (&window[0], &window[1]);
            if let Some(dispatch) = &earlier.dispatch {
                // The parcel returned last tick is on top of the stack and has cooled down
                let sort = later.sort.as_ref().unwrap();
                assert_eq!(sort.source, SortSource::ReturnStack);
                assert_eq!(sort.parcel_id, dispatch.parcel_id);
            }
        }
    }

    #[test]
    fn test_run_stops_at_max_ticks() {
        let mut engine = SimulationEngine::new(config(2)).unwrap();
        let report = engine.run();

        assert_eq!(report.ticks_executed, 50);
        assert_eq!(engine.current_tick(), 50);
        assert!(engine.is_finished());
        assert!(report.is_conserved());
        assert_eq!(
            report.tracked_parcels as u64,
            report.counters.generated - report.counters.discarded
        );
    }

    /// Fails on its third tick and counts how often it is called
    #[derive(Default)]
    struct FailingObserver {
        ticks_seen: u64,
        finished: bool,
    }

    impl TickObserver for FailingObserver {
        fn on_tick(&mut self, _events: &TickEvents) -> SimulationResult<()> {
            self.ticks_seen += 1;
            if self.ticks_seen == 3 {
                return Err(io::Error::new(io::ErrorKind::Other, "disk full").into());
            }
            Ok(())
        }

        fn on_run_end(&mut self, _report: &SimulationReport) -> SimulationResult<()> {
            self.finished = true;
            Ok(())
        }
    }

    #[test]
    fn test_observer_error_detaches_observer_and_run_completes() {
        let mut engine = SimulationEngine::new(config(6)).unwrap();
        let mut observer = FailingObserver::default();
        let report = engine.run_with_observer(&mut observer);

        assert_eq!(report.ticks_executed, 50);
        assert!(report.is_conserved());
        assert_eq!(observer.ticks_seen, 3);
        assert!(!observer.finished);
    }
}
