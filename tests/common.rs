// Not every test file will use every function.
#![allow(dead_code)]

use std::rc::Rc;
use ring_emitter::particles::emitter::Emitter;
use ring_emitter::particles::emitter_config::EmitterConfig;
use ring_emitter::particles::particle_material::ParticleMaterial;
use ring_emitter::particles::particle_ring::LiveRegion;
use ring_emitter::renderer::wgpu_context::WgpuContext;

pub const TARGET_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8UnormSrgb;

// A struct to hold all the common objects for a test.
pub struct TestSetup {
    pub wgpu_context: WgpuContext,
    pub material: Rc<ParticleMaterial>,
}

// The main setup function.
pub async fn setup() -> TestSetup {
    let _ = env_logger::builder().is_test(true).try_init();

    let wgpu_context = WgpuContext::new_for_test().await.unwrap();
    let material = Rc::new(ParticleMaterial::new(&wgpu_context, TARGET_FORMAT, None));

    TestSetup {
        wgpu_context,
        material,
    }
}

pub fn create_test_emitter(setup: &TestSetup, max_particles: usize, particles_per_second: u32, lifetime: f32) -> Emitter {
    let config = EmitterConfig {
        seed: Some(1234),
        ..EmitterConfig::new(max_particles, particles_per_second, lifetime)
    };
    Emitter::new(&setup.wgpu_context, setup.material.clone(), config).unwrap()
}

/// Runs fixed-length frames until the ring reaches a region matching `predicate`.
/// Returns the simulated time.
pub fn advance_until(emitter: &mut Emitter, delta_time: f32, predicate: impl Fn(&LiveRegion) -> bool) -> f32 {
    let mut current_time = 0.0;
    for _ in 0..1_000 {
        current_time += delta_time;
        emitter.update(delta_time, current_time);
        if predicate(&emitter.ring().live_region()) {
            return current_time;
        }
    }
    panic!("ring never reached the requested state");
}
