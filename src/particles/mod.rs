pub mod emitter;
pub mod emitter_config;
pub mod emitter_uniforms;
pub mod particle;
pub mod particle_lifecycle;
pub mod particle_material;
pub mod particle_mirror;
pub mod particle_ring;
