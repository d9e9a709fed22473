use cloth_core::constraints::stretch::solve_stretch_limits;
use cloth_core::particle::ParticleSet;
use cloth_core::spring::{Spring, SpringKind};
use glam::Vec3;

fn setup(b: Vec3) -> (ParticleSet, Vec<Spring>) {
    let particles = ParticleSet::from_positions(vec![Vec3::ZERO, b], 1.0);
    let springs = vec![Spring::new(0, 1, 1.0, 50.0, 0.2, SpringKind::Structural)];
    (particles, springs)
}

fn distance(particles: &ParticleSet) -> f32 {
    (particles.position[1] - particles.position[0]).length()
}

#[test]
fn test_overstretched_spring_returns_to_band() {
    // 50% further past the band edge than allowed
    let (mut particles, springs) = setup(Vec3::new(1.15, 0.0, 0.0));
    let corrected = solve_stretch_limits(&springs, &mut particles, 0.1);

    assert_eq!(corrected, 1);
    assert!((distance(&particles) - 1.1).abs() < 1e-5, "distance = {}", distance(&particles));
    // split evenly around the midpoint
    let mid = (particles.position[0] + particles.position[1]) * 0.5;
    assert!((mid - Vec3::new(0.575, 0.0, 0.0)).length() < 1e-5);
}

#[test]
fn test_compressed_spring_returns_to_band() {
    let (mut particles, springs) = setup(Vec3::new(0.0, 0.8, 0.0));
    solve_stretch_limits(&springs, &mut particles, 0.1);
    assert!((distance(&particles) - 0.9).abs() < 1e-5, "distance = {}", distance(&particles));
}

#[test]
fn test_spring_inside_band_untouched() {
    let (mut particles, springs) = setup(Vec3::new(0.0, 0.0, 1.05));
    let corrected = solve_stretch_limits(&springs, &mut particles, 0.1);
    assert_eq!(corrected, 0);
    assert_eq!(particles.position[1], Vec3::new(0.0, 0.0, 1.05));
}

#[test]
fn test_anchored_endpoint_keeps_position() {
    let (mut particles, springs) = setup(Vec3::new(2.0, 0.0, 0.0));
    particles.anchored[0] = true;
    solve_stretch_limits(&springs, &mut particles, 0.1);

    assert_eq!(particles.position[0], Vec3::ZERO);
    assert!((particles.position[1].x - 1.1).abs() < 1e-5, "free end at {}", particles.position[1]);
}

#[test]
fn test_anchored_second_endpoint() {
    let (mut particles, springs) = setup(Vec3::new(2.0, 0.0, 0.0));
    particles.anchored[1] = true;
    solve_stretch_limits(&springs, &mut particles, 0.1);

    assert_eq!(particles.position[1], Vec3::new(2.0, 0.0, 0.0));
    assert!((particles.position[0].x - 0.9).abs() < 1e-5, "free end at {}", particles.position[0]);
}

#[test]
fn test_both_anchored_skipped() {
    let (mut particles, springs) = setup(Vec3::new(3.0, 0.0, 0.0));
    particles.anchored = vec![true, true];
    let corrected = solve_stretch_limits(&springs, &mut particles, 0.1);
    assert_eq!(corrected, 0);
    assert_eq!(particles.position[1], Vec3::new(3.0, 0.0, 0.0));
}

#[test]
fn test_coincident_endpoints_skipped() {
    let (mut particles, springs) = setup(Vec3::ZERO);
    let corrected = solve_stretch_limits(&springs, &mut particles, 0.1);
    assert_eq!(corrected, 0);
    assert!(particles.position.iter().all(|p| p.is_finite()));
}

#[test]
fn test_chain_converges_with_iterations() {
    // 0 -- 1 -- 2 with the middle particle dragged far off
    let mut particles = ParticleSet::from_positions(
        vec![Vec3::ZERO, Vec3::new(1.0, -3.0, 0.0), Vec3::new(2.0, 0.0, 0.0)],
        1.0,
    );
    particles.anchored[0] = true;
    particles.anchored[2] = true;
    let springs = vec![
        Spring::new(0, 1, 1.0, 50.0, 0.2, SpringKind::Structural),
        Spring::new(1, 2, 1.0, 50.0, 0.2, SpringKind::Structural),
    ];

    for _ in 0..20 {
        solve_stretch_limits(&springs, &mut particles, 0.1);
    }
    for s in &springs {
        let d = (particles.position[s.b as usize] - particles.position[s.a as usize]).length();
        assert!(d <= 1.1 + 1e-3, "spring {}-{} still stretched to {}", s.a, s.b, d);
    }
}
