use sub_physics::{DepthDynamics, LinearConstants, LinearState, Quat, Vec3};

fn sub_at(depth: f32) -> DepthDynamics {
    DepthDynamics::with_state(LinearConstants::default(), LinearState::at_depth(depth))
}

#[test]
fn balance_point_is_fixed_by_hull_constants() {
    let c = LinearConstants::default();
    // ρ·V = 1599 kg displaced, hull 1394 kg, so 205 kg of water = 0.2 m³
    let neutral = c.neutral_ballast_volume();
    assert!((neutral - 0.2).abs() < 1e-4, "neutral = {}", neutral);

    for (ballast, rising) in [(0.0, true), (0.1, true), (0.19, true), (0.21, false), (0.5, false), (1.0, false)] {
        let mut sub = sub_at(50.0);
        sub.advance(ballast, 0.0, Quat::IDENTITY);
        let a = sub.state().acceleration.y;
        assert_eq!(a > 0.0, rising, "ballast {} gave a.y = {}", ballast, a);
    }
}

#[test]
fn rest_at_neutral_ballast_is_idempotent() {
    let mut sub = sub_at(50.0);
    let neutral = sub.neutral_ballast_volume();
    let start = *sub.state();
    for _ in 0..200 {
        sub.advance(neutral, 0.0, Quat::IDENTITY);
    }
    // Rounding between weight and buoyancy leaves a residual speed too small to move the hull
    let end = sub.state();
    assert_eq!(end.position, start.position);
    assert!(end.velocity.length() < 1e-4, "velocity {:?}", end.velocity);
    assert!(!end.suspended);
}

#[test]
fn vertical_velocity_decays_at_neutral_ballast() {
    let state = LinearState {
        velocity: Vec3::new(0.0, -1.0, 0.0),
        ..LinearState::at_depth(50.0)
    };
    let mut sub = DepthDynamics::with_state(LinearConstants::default(), state);
    let neutral = sub.neutral_ballast_volume();
    let mut prev = sub.state().velocity.y;
    for _ in 0..200 {
        sub.advance(neutral, 0.0, Quat::IDENTITY);
        let v = sub.state().velocity.y;
        assert!(v <= 0.0, "drag flipped the sign: {}", v);
        assert!(v.abs() <= prev.abs(), "drag amplified motion: {} -> {}", prev, v);
        prev = v;
    }
    assert!(prev.abs() < 1.0);
}

#[test]
fn horizontal_velocity_decays_without_thrust() {
    let state = LinearState {
        velocity: Vec3::new(2.0, 0.0, -1.0),
        ..LinearState::at_depth(50.0)
    };
    let mut sub = DepthDynamics::with_state(LinearConstants::default(), state);
    let neutral = sub.neutral_ballast_volume();
    let mut prev = sub.state().velocity;
    for _ in 0..300 {
        sub.advance(neutral, 0.0, Quat::IDENTITY);
        let v = sub.state().velocity;
        assert!(v.x > 0.0 && v.x < prev.x, "x: {} -> {}", prev.x, v.x);
        assert!(v.z < 0.0 && v.z > prev.z, "z: {} -> {}", prev.z, v.z);
        prev = v;
    }
}
