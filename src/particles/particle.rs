use glam::Vec3;

/// One spawned particle. Its age is always derived from `emit_time`.
///
/// Mirrors the `Particle` struct in `emitter.wgsl`, which reads the position as
/// three scalars to avoid `vec3` padding.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Particle {
    pub emit_time: f32,
    pub start_position: [f32; 3],
}

impl Particle {
    pub fn new(emit_time: f32, start_position: Vec3) -> Self {
        Self {
            emit_time,
            start_position: start_position.to_array(),
        }
    }

    pub fn start_position(&self) -> Vec3 {
        Vec3::from_array(self.start_position)
    }

    pub fn age(&self, current_time: f32) -> f32 {
        current_time - self.emit_time
    }
}

pub const PARTICLE_SIZE: usize = std::mem::size_of::<Particle>();
