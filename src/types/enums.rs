//! Enumeration types for the parcel sorting simulator
//!
//! This module contains the parcel lifecycle status, size classes, the sources and
//! outcomes reported in tick events, and the tick log output format.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lifecycle status of a parcel
///
/// The status always names the structure currently holding the parcel, or its
/// terminal disposition once it has left the system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ParcelStatus {
    /// Waiting in the arrival buffer
    InQueue,
    /// Waiting in a destination bucket
    Sorted,
    /// Delivered to its destination terminal
    Dispatched,
    /// Misrouted and waiting in the return stack
    Returned,
}

impl fmt::Display for ParcelStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParcelStatus::InQueue => write!(f, "In Queue"),
            ParcelStatus::Sorted => write!(f, "Sorted"),
            ParcelStatus::Dispatched => write!(f, "Dispatched"),
            ParcelStatus::Returned => write!(f, "Returned"),
        }
    }
}

impl FromStr for ParcelStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "in queue" | "inqueue" | "queued" => Ok(ParcelStatus::InQueue),
            "sorted" => Ok(ParcelStatus::Sorted),
            "dispatched" => Ok(ParcelStatus::Dispatched),
            "returned" => Ok(ParcelStatus::Returned),
            _ => Err(format!("Unknown parcel status: {}", s)),
        }
    }
}

/// Physical size class of a parcel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SizeClass {
    /// Envelopes and small boxes
    Small,
    /// Standard boxes
    Medium,
    /// Oversized items
    Large,
}

impl SizeClass {
    /// All size classes in draw order
    pub const ALL: [SizeClass; 3] = [SizeClass::Small, SizeClass::Medium, SizeClass::Large];

    /// Draw a uniformly random size class
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::ALL[rng.gen_range(0..Self::ALL.len())]
    }
}

impl fmt::Display for SizeClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SizeClass::Small => write!(f, "Small"),
            SizeClass::Medium => write!(f, "Medium"),
            SizeClass::Large => write!(f, "Large"),
        }
    }
}

impl FromStr for SizeClass {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "small" | "s" => Ok(SizeClass::Small),
            "medium" | "m" => Ok(SizeClass::Medium),
            "large" | "l" => Ok(SizeClass::Large),
            _ => Err(format!("Unknown size class: {}", s)),
        }
    }
}

/// Structure a parcel was taken from when it was sorted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortSource {
    /// Re-sorted after a misroute
    ReturnStack,
    /// First sort after arrival
    ArrivalBuffer,
}

impl fmt::Display for SortSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortSource::ReturnStack => write!(f, "ReturnStack"),
            SortSource::ArrivalBuffer => write!(f, "ArrivalBuffer"),
        }
    }
}

/// Result of a dispatch decision at the active terminal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DispatchOutcome {
    /// Left the network through the active terminal
    Dispatched,
    /// Misrouted and pushed onto the return stack
    Returned,
}

impl fmt::Display for DispatchOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DispatchOutcome::Dispatched => write!(f, "Dispatched"),
            DispatchOutcome::Returned => write!(f, "Returned"),
        }
    }
}

impl From<DispatchOutcome> for ParcelStatus {
    fn from(outcome: DispatchOutcome) -> Self {
        match outcome {
            DispatchOutcome::Dispatched => ParcelStatus::Dispatched,
            DispatchOutcome::Returned => ParcelStatus::Returned,
        }
    }
}

/// Format of the per-tick log file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines, one block per tick
    #[default]
    Text,
    /// One JSON object per tick
    Json,
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogFormat::Text => write!(f, "text"),
            LogFormat::Json => write!(f, "json"),
        }
    }
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(LogFormat::Text),
            "json" | "jsonl" => Ok(LogFormat::Json),
            _ => Err(format!("Unknown log format: {}", s)),
        }
    }
}
