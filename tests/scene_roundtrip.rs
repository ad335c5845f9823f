use ballroom_engine::{scene, Ball, Vec2, WorldCore};

fn sample_world() -> WorldCore {
    let gravity = Vec2::DOWN * 9.8;
    WorldCore::new(
        Vec2::new(-4.0, -3.0),
        Vec2::new(4.0, 3.0),
        vec![
            Ball::new(0.2, 1.0, Vec2::new(-1.0, 0.5), Vec2::ONE, gravity),
            Ball::new(0.3, 2.5, Vec2::new(1.0, -0.5), Vec2::new(-0.25, 0.0), gravity),
        ],
    )
}

#[test]
fn snapshot_round_trips() {
    let world = sample_world();
    let json = scene::to_json(&world);
    let restored = scene::from_json(&json).expect("snapshot should parse back");
    assert_eq!(restored, world);
}

#[test]
fn snapshot_uses_camel_case_keys() {
    let json = scene::to_json(&sample_world());
    assert!(json.contains("\"lowerBound\""));
    assert!(json.contains("\"upperBound\""));
    assert!(json.contains("\"balls\""));
    assert!(json.contains("\"acceleration\""));
}

#[test]
fn malformed_json_is_rejected() {
    assert!(scene::from_json("not json").is_err());
    assert!(scene::from_json("{}").is_err());
}

#[test]
fn non_positive_shape_parameters_are_rejected() {
    let json = r#"{
        "lowerBound": {"x": -5.0, "y": -5.0},
        "upperBound": {"x": 5.0, "y": 5.0},
        "balls": [{
            "radius": 0.0,
            "density": 1.0,
            "position": {"x": 0.0, "y": 0.0},
            "velocity": {"x": 0.0, "y": 0.0},
            "acceleration": {"x": 0.0, "y": 0.0}
        }]
    }"#;
    let err = scene::from_json(json).expect_err("zero radius should be rejected");
    assert!(err.contains("radius"), "unexpected error: {err}");
    assert!(err.contains("ball 0"), "unexpected error: {err}");
}

#[test]
fn out_of_range_numbers_are_rejected() {
    // Either the parser refuses the literal or the finiteness check does.
    let json = r#"{
        "lowerBound": {"x": -5.0, "y": -5.0},
        "upperBound": {"x": 5.0, "y": 5.0},
        "balls": [{
            "radius": 0.5,
            "density": 1.0,
            "position": {"x": 1e999, "y": 0.0},
            "velocity": {"x": 0.0, "y": 0.0},
            "acceleration": {"x": 0.0, "y": 0.0}
        }]
    }"#;
    assert!(scene::from_json(json).is_err());
}

#[test]
fn inverted_bounds_are_rejected() {
    let json = r#"{
        "lowerBound": {"x": 5.0, "y": -5.0},
        "upperBound": {"x": -5.0, "y": 5.0},
        "balls": []
    }"#;
    assert!(scene::from_json(json).is_err());
}
