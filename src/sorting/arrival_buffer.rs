//! Bounded arrival buffer
//!
//! A fixed-capacity circular FIFO holding parcels that have arrived but have not
//! been sorted yet. The buffer never grows and never blocks: a parcel offered to a
//! full buffer is handed back to the caller as discarded.

use crate::parcel::Parcel;

/// Result of offering a parcel to the arrival buffer
#[must_use = "a discarded parcel must be counted by the caller"]
#[derive(Debug, Clone, PartialEq)]
pub enum EnqueueOutcome {
    /// The parcel is now at the back of the buffer
    Accepted,
    /// The buffer was full; the parcel is returned untouched
    Discarded(Parcel),
}

impl EnqueueOutcome {
    /// Whether the parcel was accepted
    pub fn is_accepted(&self) -> bool {
        matches!(self, EnqueueOutcome::Accepted)
    }
}

/// Bounded circular FIFO of parcels awaiting sorting
#[derive(Debug, Clone)]
pub struct ArrivalBuffer {
    slots: Vec<Option<Parcel>>,
    front: usize,
    count: usize,
}

impl ArrivalBuffer {
    /// Create an empty buffer holding at most `capacity` parcels
    pub fn new(capacity: usize) -> Self {
        Self { slots: vec![None; capacity], front: 0, count: 0 }
    }

    /// Append a parcel at the back, or hand it back if the buffer is full
    pub fn enqueue(&mut self, parcel: Parcel) -> EnqueueOutcome {
        if self.is_full() {
            return EnqueueOutcome::Discarded(parcel);
        }

        let rear = (self.front + self.count) % self.capacity();
        self.slots[rear] = Some(parcel);
        self.count += 1;
        EnqueueOutcome::Accepted
    }

    /// Remove and return the oldest parcel
    pub fn dequeue(&mut self) -> Option<Parcel> {
        if self.is_empty() {
            return None;
        }

        let parcel = self.slots[self.front].take();
        self.front = (self.front + 1) % self.capacity();
        self.count -= 1;

        if self.count == 0 {
            self.front = 0;
        }

        parcel
    }

    /// The oldest parcel, without removing it
    pub fn peek(&self) -> Option<&Parcel> {
        if self.is_empty() {
            return None;
        }
        self.slots[self.front].as_ref()
    }

    /// Whether the buffer holds `capacity` parcels
    pub fn is_full(&self) -> bool {
        self.count == self.capacity()
    }

    /// Whether the buffer holds no parcels
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Number of parcels currently buffered
    pub fn size(&self) -> usize {
        self.count
    }

    /// Maximum number of parcels the buffer can hold
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Parcels in FIFO order, oldest first
    pub fn iter(&self) -> impl Iterator<Item = &Parcel> + '_ {
        (0..self.count).filter_map(move |offset| {
            self.slots[(self.front + offset) % self.capacity()].as_ref()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ParcelId, SizeClass};

    fn parcel(id: u64) -> Parcel {
        Parcel::new(ParcelId(id), "Ankara", 1, SizeClass::Small, 1)
    }

    #[test]
    fn test_overflow_discards_and_keeps_size() {
        let mut buffer = ArrivalBuffer::new(2);

        assert!(buffer.enqueue(parcel(1)).is_accepted());
        assert!(buffer.enqueue(parcel(2)).is_accepted());
        assert_eq!(buffer.size(), 2);
        assert!(buffer.is_full());

        match buffer.enqueue(parcel(3)) {
            EnqueueOutcome::Discarded(p) => assert_eq!(p.id(), ParcelId(3)),
            EnqueueOutcome::Accepted => panic!("full buffer accepted a parcel"),
        }
        assert_eq!(buffer.size(), 2);

        assert_eq!(buffer.dequeue().unwrap().id(), ParcelId(1));
        assert_eq!(buffer.size(), 1);
    }

    #[test]
    fn test_fifo_order_across_wraparound() {
        let mut buffer = ArrivalBuffer::new(3);
        for id in 1..=3 {
            assert!(buffer.enqueue(parcel(id)).is_accepted());
        }
        assert_eq!(buffer.dequeue().unwrap().id(), ParcelId(1));
        assert_eq!(buffer.dequeue().unwrap().id(), ParcelId(2));

        // Rear wraps to the start of the backing storage
        assert!(buffer.enqueue(parcel(4)).is_accepted());
        assert!(buffer.enqueue(parcel(5)).is_accepted());

        let order: Vec<u64> = buffer.iter().map(|p| p.id().sequence()).collect();
        assert_eq!(order, vec![3, 4, 5]);

        assert_eq!(buffer.dequeue().unwrap().id(), ParcelId(3));
        assert_eq!(buffer.dequeue().unwrap().id(), ParcelId(4));
        assert_eq!(buffer.dequeue().unwrap().id(), ParcelId(5));
        assert!(buffer.dequeue().is_none());
    }

    #[test]
    fn test_empty_buffer_queries() {
        let mut buffer = ArrivalBuffer::new(4);
        assert!(buffer.is_empty());
        assert!(!buffer.is_full());
        assert!(buffer.peek().is_none());
        assert!(buffer.dequeue().is_none());
        assert_eq!(buffer.capacity(), 4);
    }

    #[test]
    fn test_peek_does_not_remove() {
        let mut buffer = ArrivalBuffer::new(2);
        assert!(buffer.enqueue(parcel(7)).is_accepted());
        assert_eq!(buffer.peek().unwrap().id(), ParcelId(7));
        assert_eq!(buffer.size(), 1);
    }

    #[test]
    fn test_indices_reset_when_drained() {
        let mut buffer = ArrivalBuffer::new(2);
        assert!(buffer.enqueue(parcel(1)).is_accepted());
        buffer.dequeue();
        assert_eq!(buffer.front, 0);
        assert!(buffer.enqueue(parcel(2)).is_accepted());
        assert_eq!(buffer.peek().unwrap().id(), ParcelId(2));
    }
}
