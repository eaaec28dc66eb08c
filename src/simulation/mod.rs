//! Simulation engine and its collaborators
//!
//! This module contains the tick-driven engine, the per-tick event types and
//! observer seam, the end-of-run statistics, the tick log writer, logging setup,
//! and error handling.
//!
//! # Overview
//!
//! - **SimulationEngine**: owns the sorting structures and executes ticks
//! - **TickEvents / TickObserver**: what a tick produced, and who hears about it
//! - **TickLogWriter**: observer writing the per-tick log as text or JSON lines
//! - **SimulationReport**: end-of-run query surface and text report
//! - **LoggingConfig**: global `tracing` subscriber setup
//! - **SimulationError**: error handling for engine construction and output
//!
//! # Usage Example
//!
//! ```rust
//! use parcel_sort_simulator::simulation::*;
//! use parcel_sort_simulator::types::*;
//!
//! let config = SimulationConfig {
//!     max_ticks: 20,
//!     seed: Some(42),
//!     ..Default::default()
//! };
//!
//! let mut engine = SimulationEngine::new(config).unwrap();
//! let mut log = TickLogWriter::new(Vec::new(), LogFormat::Text);
//! let report = engine.run_with_observer(&mut log);
//!
//! assert_eq!(report.ticks_executed, 20);
//! assert!(report.is_conserved());
//! ```

pub mod engine;
pub mod error;
pub mod events;
pub mod logging;
pub mod statistics;
pub mod tick_log;

// Re-export all public types for convenience
pub use engine::*;
pub use error::*;
pub use events::*;
pub use logging::*;
pub use statistics::*;
pub use tick_log::*;
