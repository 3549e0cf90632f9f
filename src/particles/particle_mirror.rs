use bytemuck::Zeroable;
use crate::particles::particle::{Particle, PARTICLE_SIZE};
use crate::particles::particle_ring::ParticleRing;
use crate::renderer::wgpu_context::WgpuContext;
use crate::utils::gpu_buffer::GpuBuffer;

/// Corner order of the two triangles that make up one particle quad.
pub const QUAD_PATTERN: [u32; 6] = [0, 1, 2, 0, 2, 3];
pub const INDICES_PER_PARTICLE: usize = QUAD_PATTERN.len();
pub const VERTICES_PER_PARTICLE: u32 = 4;

/// Index list for `max_particles` quads. Particle `i` uses vertices `4i..4i+4`.
pub fn quad_indices(max_particles: usize) -> Vec<u32> {
    (0..max_particles as u32)
        .flat_map(|i| QUAD_PATTERN.map(|corner| i * VERTICES_PER_PARTICLE + corner))
        .collect()
}

/// Device-side copy of an emitter's particles and the index buffer used to draw them.
///
/// The particle buffer holds the live region packed from offset 0, oldest first. Slots past
/// the live count keep whatever was last written there; the draw call never reaches them.
pub struct ParticleMirror {
    particles: GpuBuffer<Particle>,
    indices: GpuBuffer<u32>,
}

impl ParticleMirror {
    pub fn new(wgpu_context: &WgpuContext, max_particles: usize) -> Self {
        log::debug!(
            "Allocating particle mirror for {} particles ({} indices)",
            max_particles,
            max_particles * INDICES_PER_PARTICLE
        );

        let particles = GpuBuffer::new(
            wgpu_context,
            "Particle Mirror Buffer",
            vec![Particle::zeroed(); max_particles],
            wgpu::BufferUsages::STORAGE,
        );
        let indices = GpuBuffer::new(
            wgpu_context,
            "Particle Index Buffer",
            quad_indices(max_particles),
            wgpu::BufferUsages::INDEX,
        );

        Self { particles, indices }
    }

    /// Copies the live region of `ring` to the device, compacted to start at slot 0.
    ///
    /// Returns the number of particles written.
    pub fn sync(&self, wgpu_context: &WgpuContext, ring: &ParticleRing) -> usize {
        debug_assert_eq!(ring.capacity(), self.capacity());

        let living_count = ring.living_count();
        let (older, newer) = ring.live_slices();
        let written = self.particles.write_exclusive(wgpu_context, living_count, |bytes| {
            // Wrapped rings come out in two pieces: first_alive..end, then 0..first_dead.
            let split = older.len() * PARTICLE_SIZE;
            let end = split + newer.len() * PARTICLE_SIZE;
            bytes[..split].copy_from_slice(bytemuck::cast_slice(older));
            bytes[split..end].copy_from_slice(bytemuck::cast_slice(newer));
        });

        if written { living_count } else { 0 }
    }

    /// Reads the whole particle buffer back from the device.
    pub fn download(&mut self, wgpu_context: &WgpuContext) -> Result<&[Particle], wgpu::BufferAsyncError> {
        self.particles.download(wgpu_context).map(|data| data.as_slice())
    }

    /// Reads the index buffer back from the device.
    pub fn download_indices(&mut self, wgpu_context: &WgpuContext) -> Result<&[u32], wgpu::BufferAsyncError> {
        self.indices.download(wgpu_context).map(|data| data.as_slice())
    }

    pub fn capacity(&self) -> usize {
        self.particles.len()
    }

    pub fn particle_buffer(&self) -> &wgpu::Buffer {
        self.particles.buffer()
    }

    pub fn index_buffer(&self) -> &wgpu::Buffer {
        self.indices.buffer()
    }

    pub fn indices(&self) -> &[u32] {
        self.indices.data()
    }
}
