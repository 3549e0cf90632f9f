use std::rc::Rc;
use glam::{Vec3, Vec4};
use crate::particles::emitter_config::EmitterConfig;
use crate::particles::emitter_uniforms::EmitterUniforms;
use crate::particles::particle::Particle;
use crate::particles::particle_lifecycle::ParticleLifecycle;
use crate::particles::particle_material::ParticleMaterial;
use crate::particles::particle_mirror::{ParticleMirror, INDICES_PER_PARTICLE};
use crate::particles::particle_ring::ParticleRing;
use crate::renderer::camera::ViewProjection;
use crate::renderer::transform::Transform;
use crate::renderer::wgpu_context::WgpuContext;

/// A fixed-capacity particle emitter and its GPU mirror.
///
/// Each frame runs `update`, then `draw`, which syncs the live particles to the device
/// before recording the draw call.
pub struct Emitter {
    lifecycle: ParticleLifecycle,
    mirror: ParticleMirror,
    max_particles: usize,
    particles_per_second: u32,
    max_particle_lifetime: f32,
    direction: Vec3,
    start_size: f32,
    end_size: f32,
    start_color: Vec4,
    end_color: Vec4,
    transform: Transform,
    material: Rc<ParticleMaterial>,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

impl Emitter {
    pub fn new(wgpu_context: &WgpuContext, material: Rc<ParticleMaterial>, config: EmitterConfig) -> anyhow::Result<Self> {
        config.validate()?;

        let lifecycle = ParticleLifecycle::new(&config);
        let mirror = ParticleMirror::new(wgpu_context, config.max_particles);

        let uniform_buffer = wgpu_context.get_device().create_buffer(&wgpu::BufferDescriptor {
            label: Some("Emitter Uniform Buffer"),
            size: size_of::<EmitterUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let bind_group = Self::create_bind_group(wgpu_context, &material, &mirror, &uniform_buffer);

        log::info!(
            "Created emitter: {} particles max, {} per second, {}s lifetime",
            config.max_particles,
            config.particles_per_second,
            config.max_particle_lifetime
        );

        Ok(Self {
            lifecycle,
            mirror,
            max_particles: config.max_particles,
            particles_per_second: config.particles_per_second,
            max_particle_lifetime: config.max_particle_lifetime,
            direction: config.direction,
            start_size: config.start_size,
            end_size: config.end_size,
            start_color: config.start_color,
            end_color: config.end_color,
            transform: Transform::new(config.start_position),
            material,
            uniform_buffer,
            bind_group,
        })
    }

    fn create_bind_group(
        wgpu_context: &WgpuContext,
        material: &ParticleMaterial,
        mirror: &ParticleMirror,
        uniform_buffer: &wgpu::Buffer,
    ) -> wgpu::BindGroup {
        wgpu_context.get_device().create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Emitter Bind Group"),
            layout: material.bind_group_layout(),
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: uniform_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: mirror.particle_buffer().as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::TextureView(material.texture_view()),
                },
                wgpu::BindGroupEntry {
                    binding: 3,
                    resource: wgpu::BindingResource::Sampler(material.sampler()),
                },
            ],
        })
    }

    /// Retires expired particles, then emits new ones at the configured rate.
    pub fn update(&mut self, delta_time: f32, current_time: f32) {
        self.lifecycle.update(delta_time, current_time, self.transform.get_position());
    }

    /// Copies the live particles into the mirror buffer. Returns how many were written.
    pub fn sync_to_device(&self, wgpu_context: &WgpuContext) -> usize {
        self.mirror.sync(wgpu_context, self.lifecycle.ring())
    }

    /// Syncs the mirror and records an indexed draw of the live particles into `render_pass`.
    ///
    /// The queue writes land before the pass's command buffer runs, provided the caller
    /// submits the encoder after this call. Returns the number of indices drawn.
    pub fn draw(
        &self,
        wgpu_context: &WgpuContext,
        render_pass: &mut wgpu::RenderPass,
        camera: &impl ViewProjection,
        current_time: f32,
    ) -> u32 {
        self.sync_to_device(wgpu_context);

        let uniforms = EmitterUniforms::new(
            camera.view(),
            camera.projection(),
            current_time,
            self.direction,
            self.max_particle_lifetime,
            self.start_size,
            self.end_size,
            self.start_color,
            self.end_color,
        );
        wgpu_context.get_queue().write_buffer(&self.uniform_buffer, 0, bytemuck::cast_slice(&[uniforms]));

        let index_count = self.index_count();
        if index_count == 0 {
            return 0;
        }

        render_pass.set_pipeline(self.material.render_pipeline());
        render_pass.set_index_buffer(self.mirror.index_buffer().slice(..), wgpu::IndexFormat::Uint32);
        render_pass.set_bind_group(0, &self.bind_group, &[]);
        render_pass.draw_indexed(0..index_count, 0, 0..1);

        index_count
    }

    /// Indices the next draw will issue: six per living particle.
    pub fn index_count(&self) -> u32 {
        (self.living_count() * INDICES_PER_PARTICLE) as u32
    }

    /// Replaces the particle store and the GPU mirror with empty ones of the new capacity.
    pub fn set_max_particles(&mut self, wgpu_context: &WgpuContext, max_particles: usize) -> anyhow::Result<()> {
        EmitterConfig::new(max_particles, self.particles_per_second, self.max_particle_lifetime).validate()?;

        self.lifecycle.reallocate(max_particles);
        self.mirror = ParticleMirror::new(wgpu_context, max_particles);
        self.bind_group = Self::create_bind_group(wgpu_context, &self.material, &self.mirror, &self.uniform_buffer);
        self.max_particles = max_particles;

        log::info!("Emitter resized to {} particles", max_particles);
        Ok(())
    }

    /// Reads the mirror buffer back from the device.
    pub fn download_mirror(&mut self, wgpu_context: &WgpuContext) -> Result<&[Particle], wgpu::BufferAsyncError> {
        self.mirror.download(wgpu_context)
    }

    pub fn download_indices(&mut self, wgpu_context: &WgpuContext) -> Result<&[u32], wgpu::BufferAsyncError> {
        self.mirror.download_indices(wgpu_context)
    }

    pub fn max_particles(&self) -> usize {
        self.max_particles
    }

    pub fn particles_per_second(&self) -> u32 {
        self.particles_per_second
    }

    pub fn living_count(&self) -> usize {
        self.lifecycle.ring().living_count()
    }

    pub fn ring(&self) -> &ParticleRing {
        self.lifecycle.ring()
    }

    pub fn index_data(&self) -> &[u32] {
        self.mirror.indices()
    }

    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    pub fn transform_mut(&mut self) -> &mut Transform {
        &mut self.transform
    }

    pub fn material(&self) -> &Rc<ParticleMaterial> {
        &self.material
    }

    pub fn set_material(&mut self, wgpu_context: &WgpuContext, material: Rc<ParticleMaterial>) {
        self.bind_group = Self::create_bind_group(wgpu_context, &material, &self.mirror, &self.uniform_buffer);
        self.material = material;
    }
}
