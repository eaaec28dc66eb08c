//! Parcel generation
//!
//! This module contains the generator that assigns sequential identifiers and draws
//! random parcel attributes from the engine's shared random number generator.

use rand::Rng;
use std::fmt;

use crate::parcel::Parcel;
use crate::types::{ParcelId, SizeClass, Tick};

/// Highest parcel priority; priorities are drawn uniformly from `1..=MAX_PRIORITY`
pub const MAX_PRIORITY: u8 = 3;

/// Generator for new parcels
///
/// The generator does not own a random number generator: the engine passes its
/// single seeded RNG in so that the draw order within a tick stays fixed
/// (count, then destination, priority and size for each parcel).
pub struct ParcelGenerator {
    cities: Vec<String>,
    next_id: ParcelId,
}

impl fmt::Debug for ParcelGenerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParcelGenerator")
            .field("cities", &self.cities.len())
            .field("next_id", &self.next_id)
            .finish()
    }
}

impl ParcelGenerator {
    /// Create a generator drawing destinations from `cities`
    pub fn new(cities: Vec<String>) -> Self {
        Self { cities, next_id: ParcelId::new(1) }
    }

    /// Draw the number of parcels arriving this tick, uniformly in `min..=max`
    ///
    /// The range must satisfy `min <= max`, which configuration validation enforces.
    pub fn draw_count<R: Rng + ?Sized>(&self, rng: &mut R, min: usize, max: usize) -> usize {
        rng.gen_range(min..=max.max(min))
    }

    /// Generate one parcel arriving at `tick`
    ///
    /// Returns `None` only if the generator has no destinations to draw from.
    pub fn generate<R: Rng + ?Sized>(&mut self, rng: &mut R, tick: Tick) -> Option<Parcel> {
        if self.cities.is_empty() {
            return None;
        }

        let id = self.next_id;
        self.next_id = id.next();

        let destination = &self.cities[rng.gen_range(0..self.cities.len())];
        let priority = rng.gen_range(1..=MAX_PRIORITY);
        let size = SizeClass::random(rng);

        Some(Parcel::new(id, destination.clone(), priority, size, tick))
    }

    /// Number of identifiers handed out so far
    pub fn issued(&self) -> u64 {
        self.next_id.sequence() - 1
    }

    /// Identifier the next generated parcel will receive
    pub fn peek_next_id(&self) -> ParcelId {
        self.next_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ParcelStatus;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn cities() -> Vec<String> {
        vec!["Ankara".to_string(), "Izmir".to_string()]
    }

    #[test]
    fn test_sequential_identifiers() {
        let mut generator = ParcelGenerator::new(cities());
        let mut rng = StdRng::seed_from_u64(1);

        let first = generator.generate(&mut rng, 1).unwrap();
        let second = generator.generate(&mut rng, 1).unwrap();

        assert_eq!(first.id(), ParcelId(1));
        assert_eq!(second.id(), ParcelId(2));
        assert_eq!(generator.issued(), 2);
        assert_eq!(generator.peek_next_id(), ParcelId(3));
    }

    #[test]
    fn test_generated_attributes_are_in_range() {
        let mut generator = ParcelGenerator::new(cities());
        let mut rng = StdRng::seed_from_u64(99);

        for tick in 1..=100 {
            let parcel = generator.generate(&mut rng, tick).unwrap();
            assert!(cities().iter().any(|c| c == parcel.destination()));
            assert!((1..=MAX_PRIORITY).contains(&parcel.priority()));
            assert_eq!(parcel.arrival_tick(), tick);
            assert_eq!(parcel.status(), ParcelStatus::InQueue);
        }
    }

    #[test]
    fn test_draw_count_bounds() {
        let generator = ParcelGenerator::new(cities());
        let mut rng = StdRng::seed_from_u64(5);

        for _ in 0..100 {
            let count = generator.draw_count(&mut rng, 2, 4);
            assert!((2..=4).contains(&count));
        }
        assert_eq!(generator.draw_count(&mut rng, 3, 3), 3);
        assert_eq!(generator.draw_count(&mut rng, 0, 0), 0);
    }

    #[test]
    fn test_no_cities_generates_nothing() {
        let mut generator = ParcelGenerator::new(Vec::new());
        let mut rng = StdRng::seed_from_u64(5);
        assert!(generator.generate(&mut rng, 1).is_none());
        assert_eq!(generator.issued(), 0);
    }

    #[test]
    fn test_same_seed_same_parcels() {
        let mut a = ParcelGenerator::new(cities());
        let mut b = ParcelGenerator::new(cities());
        let mut rng_a = StdRng::seed_from_u64(42);
        let mut rng_b = StdRng::seed_from_u64(42);

        for tick in 1..=20 {
            assert_eq!(a.generate(&mut rng_a, tick), b.generate(&mut rng_b, tick));
        }
    }
}
