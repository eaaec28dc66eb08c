//! Sorting network data structures
//!
//! The five structures coordinated by the
//! [`SimulationEngine`](crate::simulation::SimulationEngine):
//!
//! - **ArrivalBuffer**: bounded circular FIFO of parcels awaiting their first sort
//! - **ReturnStack**: LIFO of misrouted parcels with a one-tick cooldown
//! - **TerminalRotator**: cyclic sequence choosing the active terminal
//! - **DestinationSorter**: lexicographic tree of per-destination buckets
//! - **ParcelTracker**: fixed-size table of per-parcel status and metrics
//!
//! # Usage Example
//!
//! ```rust
//! use parcel_sort_simulator::parcel::Parcel;
//! use parcel_sort_simulator::sorting::*;
//! use parcel_sort_simulator::types::*;
//!
//! let mut buffer = ArrivalBuffer::new(1);
//! let parcel = Parcel::new(ParcelId::new(1), "Ankara", 1, SizeClass::Small, 1);
//! assert!(buffer.enqueue(parcel.clone()).is_accepted());
//! assert!(!buffer.enqueue(parcel).is_accepted());
//!
//! let mut stack = ReturnStack::new();
//! stack.push(buffer.dequeue().unwrap(), 5);
//! assert!(stack.pop(5).is_none());
//! assert!(stack.pop(6).is_some());
//! ```

pub mod arrival_buffer;
pub mod destination_sorter;
pub mod parcel_tracker;
pub mod return_stack;
pub mod terminal_rotator;

// Re-export all public types for convenience
pub use arrival_buffer::{ArrivalBuffer, EnqueueOutcome};
pub use destination_sorter::{DestinationSorter, InOrder};
pub use parcel_tracker::{ParcelRecord, ParcelTracker, TRACKER_TABLE_SIZE};
pub use return_stack::{ReturnEntry, ReturnStack};
pub use terminal_rotator::TerminalRotator;
