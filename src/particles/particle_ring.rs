use std::ops::Range;
use crate::particles::particle::Particle;

/// Shape of the live region inside the ring.
///
/// ```text
/// Contiguous:  0 ---- ALIVE ========= DEAD ---- MAX
/// Wrapped:     0 ==== DEAD ---------- ALIVE === MAX
/// Saturated:   0 ========= ALIVE/DEAD ========= MAX
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LiveRegion {
    Empty,
    Contiguous(Range<usize>),
    Wrapped { tail: Range<usize>, head: Range<usize> },
    Saturated { start: usize },
}

impl LiveRegion {
    /// The live slots as two ranges, oldest first. Iterating the first range and then the
    /// second visits every live slot once in spawn order.
    pub fn ranges(&self, capacity: usize) -> (Range<usize>, Range<usize>) {
        match self {
            LiveRegion::Empty => (0..0, 0..0),
            LiveRegion::Contiguous(range) => (range.clone(), 0..0),
            LiveRegion::Wrapped { tail, head } => (tail.clone(), head.clone()),
            LiveRegion::Saturated { start } => (*start..capacity, 0..*start),
        }
    }
}

/// Fixed-capacity circular store of particles.
///
/// New particles are written at `first_dead`, old ones retire from `first_alive`, and both
/// cursors wrap modulo the capacity. Slots are never moved.
#[derive(Debug, Clone, PartialEq)]
pub struct ParticleRing {
    particles: Box<[Particle]>,
    first_alive: usize,
    first_dead: usize,
    living_count: usize,
}

impl ParticleRing {
    pub fn new(capacity: usize) -> Self {
        debug_assert!(capacity > 0, "a particle ring needs at least one slot");
        Self {
            particles: vec![Particle::default(); capacity].into_boxed_slice(),
            first_alive: 0,
            first_dead: 0,
            living_count: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.particles.len()
    }

    pub fn living_count(&self) -> usize {
        self.living_count
    }

    pub fn first_alive(&self) -> usize {
        self.first_alive
    }

    pub fn first_dead(&self) -> usize {
        self.first_dead
    }

    pub fn is_empty(&self) -> bool {
        self.living_count == 0
    }

    pub fn is_full(&self) -> bool {
        self.living_count == self.capacity()
    }

    /// Every slot, live or not.
    pub fn slots(&self) -> &[Particle] {
        &self.particles
    }

    /// Writes `particle` into the first dead slot.
    ///
    /// Returns `false` and leaves the ring untouched when it is full.
    pub fn push(&mut self, particle: Particle) -> bool {
        if self.is_full() {
            return false;
        }

        self.particles[self.first_dead] = particle;
        self.first_dead = (self.first_dead + 1) % self.capacity();
        self.living_count += 1;
        true
    }

    /// Retires the oldest live particle. Does nothing on an empty ring.
    pub fn retire_oldest(&mut self) {
        if self.is_empty() {
            return;
        }

        self.first_alive = (self.first_alive + 1) % self.capacity();
        self.living_count -= 1;
    }

    pub fn live_region(&self) -> LiveRegion {
        if self.living_count == 0 {
            LiveRegion::Empty
        } else if self.first_alive < self.first_dead {
            LiveRegion::Contiguous(self.first_alive..self.first_dead)
        } else if self.first_dead < self.first_alive {
            LiveRegion::Wrapped {
                tail: self.first_alive..self.capacity(),
                head: 0..self.first_dead,
            }
        } else {
            LiveRegion::Saturated { start: self.first_alive }
        }
    }

    /// The live particles as two slices, oldest first, like `VecDeque::as_slices`.
    pub fn live_slices(&self) -> (&[Particle], &[Particle]) {
        let (older, newer) = self.live_region().ranges(self.capacity());
        (&self.particles[older], &self.particles[newer])
    }

    /// Live particles in spawn order.
    pub fn iter_live(&self) -> impl Iterator<Item = &Particle> {
        let (older, newer) = self.live_slices();
        older.iter().chain(newer.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use rand::{Rng, SeedableRng};
    use rand::rngs::StdRng;

    fn particle(t: f32) -> Particle {
        Particle::new(t, Vec3::splat(t))
    }

    fn assert_invariants(ring: &ParticleRing) {
        assert!(ring.living_count() <= ring.capacity());
        assert!(ring.first_alive() < ring.capacity());
        assert!(ring.first_dead() < ring.capacity());
        let cursors_meet = ring.first_alive() == ring.first_dead();
        let empty_or_full = ring.living_count() == 0 || ring.living_count() == ring.capacity();
        assert_eq!(cursors_meet, empty_or_full);
    }

    #[test]
    fn push_advances_first_dead_and_wraps() {
        let mut ring = ParticleRing::new(3);
        assert!(ring.push(particle(0.0)));
        assert!(ring.push(particle(1.0)));
        assert_eq!(ring.first_dead(), 2);
        assert!(ring.push(particle(2.0)));
        assert_eq!(ring.first_dead(), 0);
        assert!(ring.is_full());
        assert_invariants(&ring);
    }

    #[test]
    fn push_on_full_ring_is_ignored() {
        let mut ring = ParticleRing::new(4);
        for i in 0..4 {
            assert!(ring.push(particle(i as f32)));
        }
        ring.retire_oldest();
        ring.push(particle(4.0));
        assert!(ring.is_full());

        let before = ring.clone();
        assert!(!ring.push(particle(99.0)));
        assert_eq!(ring, before);
    }

    #[test]
    fn retire_on_empty_ring_is_ignored() {
        let mut ring = ParticleRing::new(2);
        ring.retire_oldest();
        assert_eq!(ring.living_count(), 0);
        assert_eq!(ring.first_alive(), 0);
    }

    #[test]
    fn live_region_covers_the_three_wrap_states() {
        let mut ring = ParticleRing::new(4);
        assert_eq!(ring.live_region(), LiveRegion::Empty);

        ring.push(particle(0.0));
        ring.push(particle(1.0));
        ring.push(particle(2.0));
        ring.retire_oldest();
        assert_eq!(ring.live_region(), LiveRegion::Contiguous(1..3));

        ring.retire_oldest();
        ring.push(particle(3.0));
        ring.push(particle(4.0));
        assert_eq!(ring.live_region(), LiveRegion::Wrapped { tail: 2..4, head: 0..1 });

        ring.push(particle(5.0));
        assert_eq!(ring.live_region(), LiveRegion::Saturated { start: 2 });
        assert_eq!(ring.live_region().ranges(4), (2..4, 0..2));
    }

    #[test]
    fn live_slices_start_at_the_oldest_particle() {
        let mut ring = ParticleRing::new(5);
        for i in 0..5 {
            ring.push(particle(i as f32));
        }
        ring.retire_oldest();
        ring.retire_oldest();
        ring.retire_oldest();
        ring.push(particle(5.0));

        let (older, newer) = ring.live_slices();
        assert_eq!(older, &[particle(3.0), particle(4.0)]);
        assert_eq!(newer, &[particle(5.0)]);

        let times: Vec<f32> = ring.iter_live().map(|p| p.emit_time).collect();
        assert_eq!(times, vec![3.0, 4.0, 5.0]);
    }

    #[test]
    fn random_push_and_retire_keep_invariants_and_order() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut ring = ParticleRing::new(8);
        let mut next_time = 0.0;

        for _ in 0..2_000 {
            if rng.random_bool(0.55) {
                if ring.push(particle(next_time)) {
                    next_time += 1.0;
                }
            } else {
                ring.retire_oldest();
            }
            assert_invariants(&ring);

            let live: Vec<f32> = ring.iter_live().map(|p| p.emit_time).collect();
            assert_eq!(live.len(), ring.living_count());
            assert!(live.windows(2).all(|w| w[0] < w[1]));
        }
    }
}
