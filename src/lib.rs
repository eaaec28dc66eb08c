//! Parcel Sort Simulator
//!
//! A deterministic, tick-driven simulation of a parcel sorting network.
//!
//! # Overview
//!
//! Parcels arrive in random batches, wait in a bounded arrival buffer, are sorted
//! one per tick into per-destination buckets, and are dispatched one per tick
//! through a rotating active terminal. A dispatch can be misrouted, in which case
//! the parcel goes onto a return stack and is re-sorted after a one-tick cooldown.
//!
//! ## Key Features
//!
//! - **Five coordinated structures**: arrival buffer, return stack, terminal
//!   rotator, destination sorter and parcel tracker
//! - **Reproducible runs**: a single seeded random number generator drives every draw
//! - **Observable ticks**: each tick reports what it generated, sorted, rotated and dispatched
//! - **Reports**: end-of-run counters, delay aggregates and structure statistics
//! - **Configurable**: JSON or `KEY=VALUE` files plus command line overrides
//!
//! ## Quick Start
//!
//! ```rust
//! use parcel_sort_simulator::*;
//!
//! let config = SimulationConfig {
//!     max_ticks: 100,
//!     seed: Some(7),
//!     ..Default::default()
//! };
//!
//! let mut engine = SimulationEngine::new(config)?;
//! let report = engine.run();
//!
//! println!("{}", report.summary());
//! assert!(report.is_conserved());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Module Organization
//!
//! - [`types`]: Core types, identifiers, and configuration
//! - [`parcel`]: Parcels and the parcel generator
//! - [`sorting`]: The five sorting network structures
//! - [`simulation`]: Engine, tick events, reporting, logging and errors
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐    ┌─────────────┐    ┌──────────────────┐
//! │   Types     │    │   Parcel    │    │     Sorting      │
//! │             │    │             │    │                  │
//! │ Identifiers │◄───┤ Parcel      │◄───┤ ArrivalBuffer    │
//! │ Enums       │    │ Generator   │    │ ReturnStack      │
//! │ Config      │    │             │    │ TerminalRotator  │
//! └─────────────┘    └─────────────┘    │ DestinationSorter│
//!        ▲                  ▲           │ ParcelTracker    │
//!        │                  │           └──────────────────┘
//!        │           ┌─────────────┐             ▲
//!        └───────────┤ Simulation  ├─────────────┘
//!                    │             │
//!                    │ Engine      │
//!                    │ Events      │
//!                    │ Report      │
//!                    └─────────────┘
//! ```
#![warn(missing_docs, missing_debug_implementations, unreachable_pub)]

// Module declarations
pub mod parcel;
pub mod simulation;
pub mod sorting;
pub mod types;

// Core types and identifiers
pub use types::{
    // Configuration
    CliArgs,
    ConfigError,
    ConfigValidationError,
    // Enums
    DispatchOutcome,
    LogFormat,
    // Identifiers
    ParcelId,
    ParcelStatus,
    RunId,
    SimulationConfig,
    SizeClass,
    SortSource,
    Tick,
};

// Parcels
pub use parcel::{Parcel, ParcelDescriptor, ParcelGenerator};

// Sorting structures
pub use sorting::{
    ArrivalBuffer, DestinationSorter, EnqueueOutcome, ParcelRecord, ParcelTracker, ReturnStack,
    TerminalRotator,
};

// Simulation types and functionality
pub use simulation::{
    LoggingConfig, RunCounters, SimulationEngine, SimulationError, SimulationReport,
    SimulationResult, TickEvents, TickLogWriter, TickObserver,
};
