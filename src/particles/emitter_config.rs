use glam::{Vec3, Vec4};

/// What happens to the emission timer after a particle is emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CatchUpPolicy {
    /// The timer restarts from zero, so a frame emits at most one particle no matter how
    /// long it was.
    #[default]
    ResetToZero,
    /// One emission interval is taken off the timer, so a long frame emits every particle
    /// the schedule owes.
    SubtractInterval,
}

/// Everything needed to build an emitter.
#[derive(Debug, Clone, PartialEq)]
pub struct EmitterConfig {
    pub max_particles: usize,
    pub particles_per_second: u32,
    pub max_particle_lifetime: f32,
    pub start_position: Vec3,
    pub direction: Vec3,
    pub start_size: f32,
    pub end_size: f32,
    pub start_color: Vec4,
    pub end_color: Vec4,
    pub catch_up: CatchUpPolicy,
    /// Seed for the spawn jitter. `None` seeds from the operating system.
    pub seed: Option<u64>,
}

impl EmitterConfig {
    pub fn new(max_particles: usize, particles_per_second: u32, max_particle_lifetime: f32) -> Self {
        Self {
            max_particles,
            particles_per_second,
            max_particle_lifetime,
            ..Default::default()
        }
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(self.max_particles > 0, "an emitter needs room for at least one particle");
        anyhow::ensure!(
            u32::try_from(self.max_particles.saturating_mul(6)).is_ok(),
            "{} particles do not fit in a 32-bit index buffer",
            self.max_particles
        );
        anyhow::ensure!(self.particles_per_second > 0, "emission rate must be positive");
        anyhow::ensure!(
            self.max_particle_lifetime.is_finite() && self.max_particle_lifetime > 0.0,
            "particle lifetime must be a positive number of seconds, got {}",
            self.max_particle_lifetime
        );
        Ok(())
    }

    pub fn seconds_between_emission(&self) -> f32 {
        1.0 / self.particles_per_second as f32
    }
}

impl Default for EmitterConfig {
    fn default() -> Self {
        Self {
            max_particles: 100,
            particles_per_second: 10,
            max_particle_lifetime: 5.0,
            start_position: Vec3::ZERO,
            direction: Vec3::X,
            start_size: 1.0,
            end_size: 1.0,
            start_color: Vec4::ONE,
            end_color: Vec4::ONE,
            catch_up: CatchUpPolicy::default(),
            seed: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(EmitterConfig::default().validate().is_ok());
        assert_eq!(EmitterConfig::default().catch_up, CatchUpPolicy::ResetToZero);
    }

    #[test]
    fn rejects_empty_capacity_and_zero_rate() {
        assert!(EmitterConfig::new(0, 10, 1.0).validate().is_err());
        assert!(EmitterConfig::new(10, 0, 1.0).validate().is_err());
    }

    #[test]
    fn rejects_non_positive_lifetime() {
        assert!(EmitterConfig::new(10, 10, 0.0).validate().is_err());
        assert!(EmitterConfig::new(10, 10, -1.0).validate().is_err());
        assert!(EmitterConfig::new(10, 10, f32::NAN).validate().is_err());
    }

    #[test]
    fn interval_is_the_reciprocal_of_the_rate() {
        assert_eq!(EmitterConfig::new(4, 2, 1.0).seconds_between_emission(), 0.5);
    }
}
