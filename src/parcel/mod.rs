//! Parcel modeling and generation
//!
//! This module contains the parcel entity and the generator that creates new
//! parcels each tick.
//!
//! # Usage Example
//!
//! ```rust
//! use parcel_sort_simulator::parcel::*;
//! use parcel_sort_simulator::types::*;
//! use rand::SeedableRng;
//!
//! let mut rng = rand::rngs::StdRng::seed_from_u64(7);
//! let mut generator = ParcelGenerator::new(vec!["Ankara".to_string()]);
//!
//! let parcel = generator.generate(&mut rng, 1).unwrap();
//! assert_eq!(parcel.id(), ParcelId::new(1));
//! assert_eq!(parcel.destination(), "Ankara");
//! assert_eq!(parcel.status(), ParcelStatus::InQueue);
//! ```

pub mod generator;
#[allow(clippy::module_inception)]
pub mod parcel;

// Re-export all public types for convenience
pub use generator::{ParcelGenerator, MAX_PRIORITY};
pub use parcel::{Parcel, ParcelDescriptor};
