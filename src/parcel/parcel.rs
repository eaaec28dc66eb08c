//! Core parcel entity
//!
//! This module contains the Parcel struct and the lightweight descriptor carried in
//! tick events.

use crate::types::{ParcelId, ParcelStatus, SizeClass, Tick};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A parcel moving through the sorting network
///
/// Every field except `status` is fixed at generation time. Per-parcel metrics
/// (dispatch tick, return count) live in the
/// [`ParcelTracker`](crate::sorting::ParcelTracker).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parcel {
    id: ParcelId,
    destination: String,
    priority: u8,
    size: SizeClass,
    arrival_tick: Tick,
    status: ParcelStatus,
}

impl Parcel {
    /// Create a freshly arrived parcel with status [`ParcelStatus::InQueue`]
    pub fn new(
        id: ParcelId,
        destination: impl Into<String>,
        priority: u8,
        size: SizeClass,
        arrival_tick: Tick,
    ) -> Self {
        Self {
            id,
            destination: destination.into(),
            priority,
            size,
            arrival_tick,
            status: ParcelStatus::InQueue,
        }
    }

    /// Unique parcel identifier
    pub fn id(&self) -> ParcelId {
        self.id
    }

    /// Destination name the parcel must be dispatched to
    pub fn destination(&self) -> &str {
        &self.destination
    }

    /// Priority in `1..=3`
    pub fn priority(&self) -> u8 {
        self.priority
    }

    /// Size class
    pub fn size(&self) -> SizeClass {
        self.size
    }

    /// Tick at which the parcel was generated
    pub fn arrival_tick(&self) -> Tick {
        self.arrival_tick
    }

    /// Current lifecycle status
    pub fn status(&self) -> ParcelStatus {
        self.status
    }

    /// Move the parcel to a new lifecycle status
    pub fn set_status(&mut self, status: ParcelStatus) {
        self.status = status;
    }

    /// Lightweight copy of the immutable fields for event reporting
    pub fn descriptor(&self) -> ParcelDescriptor {
        ParcelDescriptor {
            id: self.id,
            destination: self.destination.clone(),
            priority: self.priority,
            size: self.size,
        }
    }
}

impl fmt::Display for Parcel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Parcel ID: {}, Destination: {}, Priority: {}, Size: {}, Arrival Tick: {}, Status: {}",
            self.id, self.destination, self.priority, self.size, self.arrival_tick, self.status
        )
    }
}

/// Immutable parcel fields reported when a parcel is generated
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParcelDescriptor {
    /// Parcel identifier
    pub id: ParcelId,
    /// Destination name
    pub destination: String,
    /// Priority in `1..=3`
    pub priority: u8,
    /// Size class
    pub size: SizeClass,
}

impl fmt::Display for ParcelDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {} (Priority {})", self.id, self.destination, self.priority)
    }
}
