use glam::Vec3;
use rand::{Rng, SeedableRng};
use rand::rngs::StdRng;
use crate::particles::emitter_config::{CatchUpPolicy, EmitterConfig};
use crate::particles::particle::Particle;
use crate::particles::particle_ring::ParticleRing;

/// Ages, retires and spawns the particles of one emitter. Knows nothing about the GPU.
#[derive(Debug, Clone)]
pub struct ParticleLifecycle {
    ring: ParticleRing,
    max_particle_lifetime: f32,
    seconds_between_emission: f32,
    time_since_last_emit: f32,
    catch_up: CatchUpPolicy,
    rng: StdRng,
}

impl ParticleLifecycle {
    pub fn new(config: &EmitterConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        Self {
            ring: ParticleRing::new(config.max_particles),
            max_particle_lifetime: config.max_particle_lifetime,
            seconds_between_emission: config.seconds_between_emission(),
            time_since_last_emit: 0.0,
            catch_up: config.catch_up,
            rng,
        }
    }

    /// Spawns one particle around `anchor`, offset by up to one unit on each axis.
    /// A full ring drops the particle.
    pub fn emit(&mut self, current_time: f32, anchor: Vec3) {
        if self.ring.is_full() {
            log::trace!("Emitter saturated at {} particles, dropping spawn", self.ring.capacity());
            return;
        }

        let jitter = Vec3::new(
            self.rng.random_range(-1.0..=1.0),
            self.rng.random_range(-1.0..=1.0),
            self.rng.random_range(-1.0..=1.0),
        );
        self.ring.push(Particle::new(current_time, anchor + jitter));
    }

    /// Retires the oldest particle if the one in `slot` has outlived its lifetime.
    ///
    /// Lifetimes are uniform and particles are spawned in time order, so expired slots
    /// always sit at the front of the live region.
    fn update_one(&mut self, current_time: f32, slot: usize) {
        let age = self.ring.slots()[slot].age(current_time);
        if age >= self.max_particle_lifetime {
            self.ring.retire_oldest();
        }
    }

    pub fn update(&mut self, delta_time: f32, current_time: f32, anchor: Vec3) {
        if !self.ring.is_empty() {
            // Retiring moves first_alive, so the slots to visit are fixed up front.
            let (older, newer) = self.ring.live_region().ranges(self.ring.capacity());
            for slot in older.chain(newer) {
                self.update_one(current_time, slot);
            }
        }

        self.time_since_last_emit += delta_time;
        if self.time_since_last_emit <= self.seconds_between_emission {
            return;
        }

        match self.catch_up {
            CatchUpPolicy::ResetToZero => {
                self.emit(current_time, anchor);
                self.time_since_last_emit = 0.0;
            }
            CatchUpPolicy::SubtractInterval => self.catch_up_owed(current_time, anchor),
        }
    }

    /// Emits every spawn the schedule owes in one go and keeps the leftover time, which
    /// ends up in `(0, seconds_between_emission]`. Spawns that do not fit are dropped.
    fn catch_up_owed(&mut self, current_time: f32, anchor: Vec3) {
        // f64 so a long stall at a high rate still leaves a usable remainder.
        let interval = self.seconds_between_emission as f64;
        let accumulated = self.time_since_last_emit as f64;
        let owed = ((accumulated / interval).ceil() - 1.0).max(1.0);
        let free_slots = (self.ring.capacity() - self.ring.living_count()) as f64;

        for _ in 0..owed.min(free_slots) as usize {
            self.emit(current_time, anchor);
        }
        if owed > free_slots {
            log::trace!("Emitter saturated, dropping {} owed spawns", owed - free_slots);
        }

        self.time_since_last_emit = (accumulated - owed * interval).clamp(0.0, interval) as f32;
    }

    /// Replaces the store with an empty one of `max_particles` slots.
    pub fn reallocate(&mut self, max_particles: usize) {
        self.ring = ParticleRing::new(max_particles);
        self.time_since_last_emit = 0.0;
    }

    pub fn ring(&self) -> &ParticleRing {
        &self.ring
    }

    pub fn time_since_last_emit(&self) -> f32 {
        self.time_since_last_emit
    }

    pub fn max_particle_lifetime(&self) -> f32 {
        self.max_particle_lifetime
    }
}
