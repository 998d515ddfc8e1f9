use proptest::prelude::*;
use rand::{rngs::StdRng, SeedableRng};

use vortex::{
    fade_in_out, flow::FlowModule, NoiseField, ParticleStore, Viewport, VortexConfig,
    VortexEngine, PARTICLE_FIELDS,
};

// ==================================================================================
// Long-running scenarios
// ==================================================================================

#[test]
fn single_particle_survives_a_thousand_ticks() {
    let config = VortexConfig {
        particle_count: 1,
        ..Default::default()
    };
    let mut engine = VortexEngine::seeded(config, 1000).unwrap();
    engine.resize(Viewport::new(100, 100));
    engine.reset();

    for _ in 0..1000 {
        engine.step();

        let p = engine.particles().get(0).unwrap();
        assert!(p.position.is_finite());
        assert!((0.0..=100.0).contains(&p.position.x), "x = {}", p.position.x);
        assert!((0.0..=100.0).contains(&p.position.y), "y = {}", p.position.y);
        assert!(p.life >= 0.0 && p.life <= p.ttl, "life {} ttl {}", p.life, p.ttl);
    }
    assert_eq!(engine.tick(), 1000);
}

#[test]
fn buffer_length_is_fixed_for_the_whole_run() {
    let config = VortexConfig {
        particle_count: 64,
        ..Default::default()
    };
    let mut engine = VortexEngine::seeded(config, 17).unwrap();
    engine.resize(Viewport::new(90, 60));
    engine.reset();

    let start = engine.particles().as_floats().as_ptr();
    for i in 0..300 {
        if i % 50 == 0 {
            engine.resize(Viewport::new(90 + i, 60 + i / 2));
        }
        engine.step();
        assert_eq!(engine.particles().as_floats().len(), 64 * PARTICLE_FIELDS);
    }
    assert_eq!(engine.particles().as_floats().as_ptr(), start);
}

#[test]
fn respawned_slots_start_fresh_inside_the_viewport() {
    let config = VortexConfig {
        particle_count: 200,
        ..Default::default()
    };
    let viewport = Viewport::new(150, 120);
    let mut rng = StdRng::seed_from_u64(33);
    let mut store = ParticleStore::new(config.particle_count);
    store.init_all(&config, &viewport, &mut rng);

    let mut flow = FlowModule::new(NoiseField::with_seed(33));
    let mut trails = Vec::with_capacity(config.particle_count);

    for _ in 0..400 {
        let lives: Vec<f32> = store.iter().map(|p| p.life).collect();
        flow.step(&mut store, &config, &viewport, &mut rng, &mut trails);

        for (p, life) in store.iter().zip(lives) {
            assert!(viewport.contains(p.position));
            // Either aged by one tick or respawned
            assert!(p.life == life + 1.0 || p.life == 0.0);
            assert!(p.life <= p.ttl);
        }
    }
}

#[test]
fn trail_capacity_is_reused() {
    let config = VortexConfig {
        particle_count: 25,
        ..Default::default()
    };
    let viewport = Viewport::new(80, 80);
    let mut rng = StdRng::seed_from_u64(44);
    let mut store = ParticleStore::new(config.particle_count);
    store.init_all(&config, &viewport, &mut rng);

    let mut flow = FlowModule::new(NoiseField::with_seed(44));
    let mut trails = Vec::with_capacity(config.particle_count);
    let capacity = trails.capacity();

    for _ in 0..100 {
        flow.step(&mut store, &config, &viewport, &mut rng, &mut trails);
        assert_eq!(trails.len(), 25);
    }
    assert_eq!(trails.capacity(), capacity);
}

// ==================================================================================
// Properties
// ==================================================================================

proptest! {
    #[test]
    fn fade_is_zero_at_both_ends_and_one_in_the_middle(m in 0.001f32..10_000.0) {
        prop_assert_eq!(fade_in_out(0.0, m), 0.0);
        prop_assert!(fade_in_out(m, m).abs() < 1e-6);
        prop_assert!((fade_in_out(0.5 * m, m) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn fade_stays_within_unit_range(t in 0.0f32..500.0, m in 1.0f32..500.0) {
        let alpha = fade_in_out(t, m);
        prop_assert!((0.0..=1.0 + 1e-6).contains(&alpha));
    }

    #[test]
    fn noise_samples_are_bounded(
        seed in any::<u32>(),
        x in -1.0e4f32..1.0e4,
        y in -1.0e4f32..1.0e4,
        t in 0.0f32..1.0e3,
    ) {
        let field = NoiseField::with_seed(seed);
        let v = field.sample(x, y, t);
        prop_assert!((-1.0..=1.0).contains(&v));
    }

    #[test]
    fn respawning_one_slot_never_touches_another(
        count in 2usize..64,
        pick in any::<prop::sample::Index>(),
        seed in any::<u64>(),
    ) {
        let config = VortexConfig { particle_count: count, ..Default::default() };
        let viewport = Viewport::new(640, 360);
        let mut rng = StdRng::seed_from_u64(seed);
        let mut store = ParticleStore::new(count);
        store.init_all(&config, &viewport, &mut rng);

        let slot = pick.index(count);
        let before = store.as_floats().to_vec();
        store.init_slot(slot, &config, &viewport, &mut rng);

        for (i, chunk) in store.as_floats().chunks(PARTICLE_FIELDS).enumerate() {
            if i != slot {
                prop_assert_eq!(chunk, &before[i * PARTICLE_FIELDS..(i + 1) * PARTICLE_FIELDS]);
            }
        }
    }

    #[test]
    fn particles_stay_in_any_viewport(
        width in 0u32..400,
        height in 0u32..400,
        seed in any::<u64>(),
    ) {
        let config = VortexConfig { particle_count: 40, ..Default::default() };
        let viewport = Viewport::new(width, height);
        let mut rng = StdRng::seed_from_u64(seed);
        let mut store = ParticleStore::new(config.particle_count);
        store.init_all(&config, &viewport, &mut rng);

        let mut flow = FlowModule::new(NoiseField::with_seed(seed as u32));
        let mut trails = Vec::new();
        for _ in 0..50 {
            flow.step(&mut store, &config, &viewport, &mut rng, &mut trails);
        }

        for p in store.iter() {
            prop_assert!(viewport.contains(p.position));
            prop_assert!(p.life <= p.ttl);
        }
    }
}
