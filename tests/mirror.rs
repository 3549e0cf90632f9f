mod common;

use ring_emitter::particles::emitter::Emitter;
use ring_emitter::particles::particle::Particle;
use ring_emitter::particles::particle_ring::LiveRegion;
use ring_emitter::renderer::wgpu_context::WgpuContext;

fn assert_mirror_matches_ring(emitter: &mut Emitter, wgpu_context: &WgpuContext) {
    let expected: Vec<Particle> = emitter.ring().iter_live().copied().collect();
    let living_count = emitter.living_count();

    // ACT
    let written = emitter.sync_to_device(wgpu_context);
    let mirror = emitter.download_mirror(wgpu_context).unwrap();

    // ASSERT
    assert_eq!(written, living_count);
    assert_eq!(&mirror[..living_count], expected.as_slice());
}

#[test]
fn test_mirror_copies_contiguous_region() {
    // SETUP
    let setup = pollster::block_on(common::setup());
    let wgpu_context = &setup.wgpu_context;
    let mut emitter = common::create_test_emitter(&setup, 8, 10, 0.5);

    common::advance_until(&mut emitter, 0.15, |region| {
        matches!(region, LiveRegion::Contiguous(range) if range.start > 0 && range.len() > 1)
    });

    assert_mirror_matches_ring(&mut emitter, wgpu_context);
}

#[test]
fn test_mirror_unwraps_wrapped_region_oldest_first() {
    // SETUP
    let setup = pollster::block_on(common::setup());
    let wgpu_context = &setup.wgpu_context;
    let mut emitter = common::create_test_emitter(&setup, 4, 10, 0.4);

    common::advance_until(&mut emitter, 0.15, |region| {
        matches!(region, LiveRegion::Wrapped { tail, head } if !tail.is_empty() && !head.is_empty())
    });

    assert_mirror_matches_ring(&mut emitter, wgpu_context);

    // The oldest particle lands at slot 0 of the mirror.
    let oldest = emitter.ring().slots()[emitter.ring().first_alive()];
    let mirror = emitter.download_mirror(wgpu_context).unwrap();
    assert_eq!(mirror[0], oldest);
}

#[test]
fn test_mirror_copies_saturated_ring_starting_at_first_alive() {
    // SETUP
    let setup = pollster::block_on(common::setup());
    let wgpu_context = &setup.wgpu_context;
    let mut emitter = common::create_test_emitter(&setup, 4, 10, 1.0);

    common::advance_until(&mut emitter, 0.15, |region| {
        matches!(region, LiveRegion::Saturated { start } if *start != 0)
    });
    assert_eq!(emitter.living_count(), emitter.max_particles());

    assert_mirror_matches_ring(&mut emitter, wgpu_context);

    let mirror = emitter.download_mirror(wgpu_context).unwrap();
    let emit_times: Vec<f32> = mirror.iter().map(|p| p.emit_time).collect();
    assert!(emit_times.windows(2).all(|w| w[0] < w[1]), "{emit_times:?}");
}

#[test]
fn test_empty_emitter_writes_nothing() {
    // SETUP
    let setup = pollster::block_on(common::setup());
    let wgpu_context = &setup.wgpu_context;
    let mut emitter = common::create_test_emitter(&setup, 4, 10, 1.0);

    // ACT
    let written = emitter.sync_to_device(wgpu_context);
    let mirror = emitter.download_mirror(wgpu_context).unwrap();

    // ASSERT
    assert_eq!(written, 0);
    assert!(mirror.iter().all(|p| *p == Particle::default()));
}

#[test]
fn test_index_buffer_on_device_holds_two_triangles_per_particle() {
    // SETUP
    let setup = pollster::block_on(common::setup());
    let mut emitter = common::create_test_emitter(&setup, 10, 10, 1.0);

    // ACT
    let indices = emitter.download_indices(&setup.wgpu_context).unwrap();

    // ASSERT
    assert_eq!(indices.len(), 60);
    for (i, quad) in indices.chunks(6).enumerate() {
        let base = 4 * i as u32;
        assert_eq!(quad, &[base, base + 1, base + 2, base, base + 2, base + 3]);
    }
}
