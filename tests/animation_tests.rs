//! Orbit animation tests
//!
//! Tests for:
//! - Holder revolution and body spin composing into the world transform
//! - Planet / moon step selection by name
//! - Order sensitivity of pre-multiplied rotations (checked on the graph
//!   directly, since the driver rotates about a single axis)
//! - Phased mode, seek and reset
//! - Registration errors and draw emission

use std::sync::Arc;

use glam::{Mat4, Vec3};
use orrery::animation::{AnimationMode, AnimationSettings, DrawItem, OrbitAnimator, SpinClass};
use orrery::errors::OrreryError;
use orrery::resources::{MeshData, SphereOptions, create_sphere};
use orrery::scene::{Geometry, NodeHandle, SceneGraph};

const EPSILON: f32 = 1e-5;

fn mesh() -> Arc<MeshData> {
    Arc::new(create_sphere(&SphereOptions {
        radius: 1.0,
        width_segments: 8,
        height_segments: 4,
    }))
}

/// root → `{prefix}_hold` (R_y(phase) * T(distance)) → `{prefix}_geo`
fn add_body(scene: &mut SceneGraph, prefix: &str, distance: f32, phase: f32) -> (NodeHandle, NodeHandle) {
    let holder = scene
        .build_node(&format!("{prefix}_hold"))
        .with_translation(distance, 0.0, 0.0)
        .with_rotation_y(phase)
        .build()
        .unwrap();
    let geo = scene
        .build_node(&format!("{prefix}_geo"))
        .with_parent(holder)
        .with_geometry(Geometry::new(Vec3::ONE, mesh()))
        .build()
        .unwrap();
    (holder, geo)
}

fn settings(mode: AnimationMode) -> AnimationSettings {
    AnimationSettings {
        mode,
        ..AnimationSettings::default()
    }
}

// ============================================================================
// Composition
// ============================================================================

#[test]
fn one_frame_composes_orbit_and_spin() {
    let step = 0.1;
    let mut scene = SceneGraph::new("Scene");
    let (holder, geo) = add_body(&mut scene, "earth", 13.0, 1.0);

    let mut animator = OrbitAnimator::new(AnimationSettings {
        planet_orbit_step: step,
        spin_step: step,
        ..AnimationSettings::default()
    });
    animator.register(&scene, geo).unwrap();

    let mut draws: Vec<DrawItem> = Vec::new();
    animator.step(&mut scene, &mut draws);

    let initial = Mat4::from_rotation_y(1.0) * Mat4::from_translation(Vec3::new(13.0, 0.0, 0.0));
    let expected_holder = Mat4::from_rotation_y(step) * initial;
    let expected_world = expected_holder * Mat4::from_rotation_y(step);

    assert!(scene.local_transform(holder).unwrap().abs_diff_eq(expected_holder, EPSILON));
    assert!(scene.world_transform(geo).unwrap().abs_diff_eq(expected_world, EPSILON));

    assert_eq!(draws.len(), 1);
    assert_eq!(draws[0].node, geo);
    assert!(draws[0].model.abs_diff_eq(expected_world, EPSILON));

    let angle: f32 = 1.0 + step;
    let expected_position = Vec3::new(13.0 * angle.cos(), 0.0, -13.0 * angle.sin());
    assert!((scene.world_position(geo).unwrap() - expected_position).length() < 1e-4);
}

#[test]
fn k_frames_equal_product_of_deltas() {
    let mut scene = SceneGraph::new("Scene");
    let (holder, geo) = add_body(&mut scene, "mars", 16.0, 2.9);
    let initial_holder = scene.local_transform(holder).unwrap();
    let initial_geo = scene.local_transform(geo).unwrap();

    let settings = AnimationSettings::default();
    let mut animator = OrbitAnimator::new(settings.clone());
    animator.register(&scene, geo).unwrap();

    let frames = 25;
    for _ in 0..frames {
        animator.advance(&mut scene);
    }
    assert_eq!(animator.frame(), frames);

    let mut expected_holder = initial_holder;
    let mut expected_geo = initial_geo;
    for _ in 0..frames {
        expected_holder = Mat4::from_rotation_y(settings.planet_orbit_step) * expected_holder;
        expected_geo = Mat4::from_rotation_y(settings.spin_step) * expected_geo;
    }

    assert!(scene.local_transform(holder).unwrap().abs_diff_eq(expected_holder, 1e-4));
    assert!(scene.local_transform(geo).unwrap().abs_diff_eq(expected_geo, 1e-4));
}

#[test]
fn sun_at_origin_stays_at_origin() {
    let mut scene = SceneGraph::new("Scene");
    let (_, geo) = add_body(&mut scene, "sun", 0.0, 0.0);
    let mut animator = OrbitAnimator::default();
    animator.register(&scene, geo).unwrap();

    for _ in 0..100 {
        animator.advance(&mut scene);
    }
    assert!(scene.world_position(geo).unwrap().length() < EPSILON);
}

#[test]
fn holder_rotation_precedes_local_offset() {
    // Revolution must carry the offset around the parent, not spin in place.
    let mut scene = SceneGraph::new("Scene");
    let (_, geo) = add_body(&mut scene, "venus", 9.0, 0.0);
    let mut animator = OrbitAnimator::new(AnimationSettings {
        planet_orbit_step: std::f32::consts::FRAC_PI_2,
        spin_step: 0.0,
        ..AnimationSettings::default()
    });
    animator.register(&scene, geo).unwrap();
    animator.advance(&mut scene);

    let position = scene.world_position(geo).unwrap();
    assert!((position - Vec3::new(0.0, 0.0, -9.0)).length() < 1e-4);
}

#[test]
fn graph_pre_multiplies_are_order_sensitive() {
    let a = Mat4::from_rotation_x(0.7);
    let b = Mat4::from_rotation_z(0.4);

    let mut forward = SceneGraph::new("Scene");
    let (fh, _) = add_body(&mut forward, "p", 5.0, 0.0);
    forward.pre_multiply_local(fh, a).unwrap();
    forward.pre_multiply_local(fh, b).unwrap();

    let mut reverse = SceneGraph::new("Scene");
    let (rh, _) = add_body(&mut reverse, "p", 5.0, 0.0);
    reverse.pre_multiply_local(rh, b).unwrap();
    reverse.pre_multiply_local(rh, a).unwrap();

    let f = forward.local_transform(fh).unwrap();
    let r = reverse.local_transform(rh).unwrap();
    assert!(f.abs_diff_eq(b * a * Mat4::from_translation(Vec3::X * 5.0), EPSILON));
    assert!(!f.abs_diff_eq(r, 1e-3));
}

// ============================================================================
// Classification
// ============================================================================

#[test]
fn moon_three_levels_deep_uses_moon_step() {
    let mut scene = SceneGraph::new("Scene");
    let (earth_hold, _) = add_body(&mut scene, "earth", 13.0, 1.0);
    let moon_hold = scene
        .build_node("earthmoon_hold")
        .with_parent(earth_hold)
        .with_translation(2.0, 0.0, 0.0)
        .build()
        .unwrap();
    let moon = scene
        .build_node("earthmoon_geo")
        .with_parent(moon_hold)
        .with_scale(0.4)
        .with_geometry(Geometry::new(Vec3::splat(0.7), mesh()))
        .build()
        .unwrap();
    assert_eq!(scene.get_node(moon).unwrap().depth(), 3);

    let settings = AnimationSettings::default();
    let mut animator = OrbitAnimator::new(settings.clone());
    animator.register(&scene, moon).unwrap();
    assert_eq!(animator.class_of(moon), Some(SpinClass::Moon));

    let earth_before = scene.local_transform(earth_hold).unwrap();
    let moon_before = scene.local_transform(moon_hold).unwrap();
    animator.advance(&mut scene);

    let expected = Mat4::from_rotation_y(settings.moon_orbit_step) * moon_before;
    assert!(scene.local_transform(moon_hold).unwrap().abs_diff_eq(expected, EPSILON));
    // Only the moon was registered; the planet holder is untouched.
    assert_eq!(scene.local_transform(earth_hold).unwrap(), earth_before);
}

#[test]
fn classification_is_fixed_at_registration() {
    let mut scene = SceneGraph::new("Scene");
    let (_, geo) = add_body(&mut scene, "earth", 13.0, 0.0);
    let mut animator = OrbitAnimator::default();
    animator.register(&scene, geo).unwrap();

    scene.get_node_mut(geo).unwrap().set_name("earthmoon_geo");
    assert_eq!(animator.class_of(geo), Some(SpinClass::Planet));
}

// ============================================================================
// Registration
// ============================================================================

#[test]
fn register_requires_geometry() {
    let mut scene = SceneGraph::new("Scene");
    let (holder, _) = add_body(&mut scene, "earth", 13.0, 0.0);
    let mut animator = OrbitAnimator::default();

    let err = animator.register(&scene, holder).unwrap_err();
    assert!(matches!(err, OrreryError::MissingGeometry(name) if name == "earth_hold"));
}

#[test]
fn register_requires_holder() {
    let mut scene = SceneGraph::new("Scene");
    let loose = scene.create_node("loose_geo");
    scene
        .set_geometry(loose, Geometry::new(Vec3::ONE, mesh()))
        .unwrap();
    let mut animator = OrbitAnimator::default();

    let err = animator.register(&scene, loose).unwrap_err();
    assert!(matches!(err, OrreryError::MissingHolder(name) if name == "loose_geo"));
    assert!(animator.is_empty());
}

#[test]
fn duplicate_registration_is_ignored() {
    let mut scene = SceneGraph::new("Scene");
    let (_, geo) = add_body(&mut scene, "earth", 13.0, 0.0);
    let mut animator = OrbitAnimator::default();
    animator.register(&scene, geo).unwrap();
    animator.register(&scene, geo).unwrap();
    assert_eq!(animator.len(), 1);
}

#[test]
fn draws_follow_registration_order() {
    let mut scene = SceneGraph::new("Scene");
    let (_, a) = add_body(&mut scene, "a", 5.0, 0.0);
    let (_, b) = add_body(&mut scene, "b", 9.0, 0.0);
    let mut animator = OrbitAnimator::default();
    animator.register_all(&scene, &[b, a]).unwrap();

    let mut draws: Vec<DrawItem> = Vec::new();
    animator.step(&mut scene, &mut draws);

    let order: Vec<_> = draws.iter().map(|d| d.node).collect();
    assert_eq!(order, vec![b, a]);
    assert_eq!(animator.bodies().collect::<Vec<_>>(), vec![b, a]);
}

#[test]
fn removed_body_is_skipped() {
    let mut scene = SceneGraph::new("Scene");
    let (holder, a) = add_body(&mut scene, "a", 5.0, 0.0);
    let (_, b) = add_body(&mut scene, "b", 9.0, 0.0);
    let mut animator = OrbitAnimator::default();
    animator.register_all(&scene, &[a, b]).unwrap();

    scene.remove_node(holder);
    let mut draws: Vec<DrawItem> = Vec::new();
    animator.step(&mut scene, &mut draws);

    assert_eq!(draws.len(), 1);
    assert_eq!(draws[0].node, b);
}

#[test]
fn extract_does_not_advance() {
    let mut scene = SceneGraph::new("Scene");
    let (_, geo) = add_body(&mut scene, "a", 5.0, 0.0);
    let mut animator = OrbitAnimator::default();
    animator.register(&scene, geo).unwrap();

    let before = scene.world_transform(geo).unwrap();
    let mut draws: Vec<DrawItem> = Vec::new();
    animator.extract(&scene, &mut draws);

    assert_eq!(animator.frame(), 0);
    assert_eq!(draws[0].model, before);
}

#[test]
fn normal_matrix_of_rigid_motion_keeps_rotation() {
    let item = DrawItem {
        node: NodeHandle::default(),
        model: Mat4::from_rotation_y(0.5) * Mat4::from_translation(Vec3::new(3.0, 0.0, 0.0)),
        color: Vec3::ONE,
        mesh: mesh(),
    };
    let normal = item.normal_matrix(Mat4::IDENTITY);
    let n = normal.transform_vector3(Vec3::X);
    let expected = Mat4::from_rotation_y(0.5).transform_vector3(Vec3::X);
    assert!((n - expected).length() < EPSILON);
}

// ============================================================================
// Phased mode
// ============================================================================

#[test]
fn phased_mode_matches_incremental_mode() {
    let mut inc_scene = SceneGraph::new("Scene");
    let (_, inc_geo) = add_body(&mut inc_scene, "earth", 13.0, 1.0);
    let mut incremental = OrbitAnimator::new(settings(AnimationMode::Incremental));
    incremental.register(&inc_scene, inc_geo).unwrap();

    let mut ph_scene = SceneGraph::new("Scene");
    let (_, ph_geo) = add_body(&mut ph_scene, "earth", 13.0, 1.0);
    let mut phased = OrbitAnimator::new(settings(AnimationMode::Phased));
    phased.register(&ph_scene, ph_geo).unwrap();

    for _ in 0..200 {
        incremental.advance(&mut inc_scene);
        phased.advance(&mut ph_scene);
    }

    let a = inc_scene.world_transform(inc_geo).unwrap();
    let b = ph_scene.world_transform(ph_geo).unwrap();
    assert!(a.abs_diff_eq(b, 1e-3));
}

#[test]
fn seek_matches_stepping() -> anyhow::Result<()> {
    let mut scene = SceneGraph::new("Scene");
    let (_, geo) = add_body(&mut scene, "earth", 13.0, 1.0);
    let mut animator = OrbitAnimator::new(settings(AnimationMode::Phased));
    animator.register(&scene, geo)?;

    for _ in 0..100 {
        animator.advance(&mut scene);
    }
    let stepped = scene.world_transform(geo).unwrap();

    animator.seek(&mut scene, 30)?;
    assert_eq!(animator.frame(), 30);
    for _ in 0..70 {
        animator.advance(&mut scene);
    }
    assert_eq!(animator.frame(), 100);
    assert!(scene.world_transform(geo).unwrap().abs_diff_eq(stepped, 1e-4));

    animator.seek(&mut scene, 100)?;
    assert!(scene.world_transform(geo).unwrap().abs_diff_eq(stepped, 1e-4));
    Ok(())
}

#[test]
fn reset_restores_registration_state() -> anyhow::Result<()> {
    let mut scene = SceneGraph::new("Scene");
    let (holder, geo) = add_body(&mut scene, "earth", 13.0, 1.0);
    let holder_before = scene.local_transform(holder).unwrap();
    let geo_before = scene.local_transform(geo).unwrap();

    let mut animator = OrbitAnimator::new(settings(AnimationMode::Phased));
    animator.register(&scene, geo)?;
    for _ in 0..50 {
        animator.advance(&mut scene);
    }
    animator.reset(&mut scene)?;

    assert_eq!(animator.frame(), 0);
    assert!(scene.local_transform(holder).unwrap().abs_diff_eq(holder_before, EPSILON));
    assert!(scene.local_transform(geo).unwrap().abs_diff_eq(geo_before, EPSILON));
    Ok(())
}

#[test]
fn seek_requires_phased_mode() {
    let mut scene = SceneGraph::new("Scene");
    let (_, geo) = add_body(&mut scene, "earth", 13.0, 1.0);
    let mut animator = OrbitAnimator::default();
    animator.register(&scene, geo).unwrap();

    assert!(matches!(
        animator.seek(&mut scene, 10),
        Err(OrreryError::SeekUnsupported)
    ));
    assert!(matches!(animator.reset(&mut scene), Err(OrreryError::SeekUnsupported)));
}

#[test]
fn phased_mode_composes_orbit_and_spin_on_shared_node() {
    // earth_geo is both a spinning body and the holder of moon_geo.
    fn build(mode: AnimationMode) -> (SceneGraph, OrbitAnimator, NodeHandle) {
        let mut scene = SceneGraph::new("Scene");
        let (_, earth) = add_body(&mut scene, "earth", 13.0, 1.0);
        let moon = scene
            .build_node("moon_geo")
            .with_parent(earth)
            .with_translation(2.0, 0.0, 0.0)
            .with_geometry(Geometry::new(Vec3::ONE, mesh()))
            .build()
            .unwrap();
        let mut animator = OrbitAnimator::new(settings(mode));
        animator.register_all(&scene, &[earth, moon]).unwrap();
        (scene, animator, moon)
    }

    let (mut inc_scene, mut incremental, inc_moon) = build(AnimationMode::Incremental);
    let (mut ph_scene, mut phased, ph_moon) = build(AnimationMode::Phased);

    for _ in 0..100 {
        let mut inc_draws: Vec<DrawItem> = Vec::new();
        let mut ph_draws: Vec<DrawItem> = Vec::new();
        incremental.step(&mut inc_scene, &mut inc_draws);
        phased.step(&mut ph_scene, &mut ph_draws);
        for (a, b) in inc_draws.iter().zip(&ph_draws) {
            assert!(a.model.abs_diff_eq(b.model, 1e-3));
        }
    }

    let stepped = ph_scene.world_transform(ph_moon).unwrap();
    assert!(inc_scene.world_transform(inc_moon).unwrap().abs_diff_eq(stepped, 1e-3));

    phased.seek(&mut ph_scene, 40).unwrap();
    phased.seek(&mut ph_scene, 100).unwrap();
    assert!(ph_scene.world_transform(ph_moon).unwrap().abs_diff_eq(stepped, 1e-4));
}

#[test]
fn phased_playback_keeps_moving_after_long_runs() -> anyhow::Result<()> {
    let far_frame = 50_000_000;
    let mut scene = SceneGraph::new("Scene");
    let (_, geo) = add_body(&mut scene, "earth", 13.0, 0.0);
    let mut animator = OrbitAnimator::new(settings(AnimationMode::Phased));
    animator.register(&scene, geo)?;

    animator.seek(&mut scene, far_frame)?;
    let before = scene.world_position(geo).unwrap();
    let spin_before = scene.local_transform(geo).unwrap();

    for _ in 0..1000 {
        animator.advance(&mut scene);
    }
    let after = scene.world_position(geo).unwrap();

    // 1 rad of orbit at radius 13
    assert!((after - before).length() > 10.0);
    assert!(!scene.local_transform(geo).unwrap().abs_diff_eq(spin_before, 1e-3));

    let stepped = scene.world_transform(geo).unwrap();
    animator.seek(&mut scene, far_frame + 1000)?;
    assert!(scene.world_transform(geo).unwrap().abs_diff_eq(stepped, 1e-2));
    Ok(())
}
