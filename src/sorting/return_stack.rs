//! Misroute return stack
//!
//! Unbounded LIFO of misrouted parcels. Each entry remembers the tick it was pushed
//! at, and the top entry only becomes poppable on a later tick.

use crate::parcel::Parcel;
use crate::types::Tick;

/// A misrouted parcel and the tick it was pushed at
#[derive(Debug, Clone, PartialEq)]
pub struct ReturnEntry {
    /// The misrouted parcel
    pub parcel: Parcel,
    /// Tick at which the parcel was pushed
    pub pushed_at: Tick,
}

impl ReturnEntry {
    /// Whether the entry may be popped during `current_tick`
    pub fn is_ready(&self, current_tick: Tick) -> bool {
        self.pushed_at < current_tick
    }
}

/// LIFO of misrouted parcels awaiting re-sort
#[derive(Debug, Clone, Default)]
pub struct ReturnStack {
    entries: Vec<ReturnEntry>,
}

impl ReturnStack {
    /// Create an empty stack
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a parcel misrouted during `tick`
    pub fn push(&mut self, parcel: Parcel, tick: Tick) {
        self.entries.push(ReturnEntry { parcel, pushed_at: tick });
    }

    /// Pop the top parcel if it was pushed before `current_tick`
    ///
    /// An entry pushed during the current tick is left in place and `None` is
    /// returned; the stack is not modified.
    pub fn pop(&mut self, current_tick: Tick) -> Option<Parcel> {
        if !self.entries.last()?.is_ready(current_tick) {
            return None;
        }
        self.entries.pop().map(|entry| entry.parcel)
    }

    /// The top entry, without removing it
    pub fn peek(&self) -> Option<&ReturnEntry> {
        self.entries.last()
    }

    /// Whether the stack holds no parcels
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of parcels on the stack
    pub fn size(&self) -> usize {
        self.entries.len()
    }

    /// Entries from top to bottom
    pub fn iter(&self) -> impl Iterator<Item = &ReturnEntry> + '_ {
        self.entries.iter().rev()
    }
}
