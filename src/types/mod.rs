//! Core types and identifiers for the parcel sorting simulator
//!
//! This module contains fundamental types, identifiers, and configuration structures
//! used throughout the simulation system.
//!
//! # Overview
//!
//! - **Identifiers**: sequential parcel IDs, UUID-based run IDs, and the tick type
//! - **Enums**: parcel status, size classes, sort sources, dispatch outcomes
//! - **Configuration**: simulation configuration with validation, file and CLI support
//!
//! # Usage Example
//!
//! ```rust
//! use parcel_sort_simulator::types::*;
//!
//! let id = ParcelId::new(1);
//! assert_eq!(id.to_string(), "P0001");
//!
//! let config = SimulationConfig {
//!     max_ticks: 50,
//!     city_list: vec!["Ankara".to_string(), "Izmir".to_string()],
//!     ..Default::default()
//! };
//! assert!(config.validate().is_ok());
//! ```

pub mod config;
pub mod enums;
pub mod identifiers;

// Re-export all public types for convenience
pub use config::*;
pub use enums::*;
pub use identifiers::*;
