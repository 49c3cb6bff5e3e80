// Host-side tests for the simplex noise field and its curl.

use flow_core::NoiseField;

#[test]
fn sample_is_deterministic_for_same_seed() {
    let a = NoiseField::new(42);
    let b = NoiseField::new(42);
    for i in 0..200 {
        let x = i as f32 * 0.137 - 7.0;
        let y = i as f32 * -0.091 + 3.0;
        let first = a.sample(x, y);
        assert_eq!(first, a.sample(x, y), "repeat call changed at ({x}, {y})");
        assert_eq!(first, b.sample(x, y), "second field differs at ({x}, {y})");
    }
}

#[test]
fn sample_stays_within_unit_range() {
    let field = NoiseField::default();
    let mut min = f32::MAX;
    let mut max = f32::MIN;
    for ix in 0..120 {
        for iy in 0..120 {
            let v = field.sample(ix as f32 * 0.173 - 10.0, iy as f32 * 0.119 - 7.0);
            assert!(v.is_finite());
            assert!((-1.0..=1.0).contains(&v), "out of range: {v}");
            min = min.min(v);
            max = max.max(v);
        }
    }
    // not a constant field
    assert!(max - min > 0.5, "suspiciously flat noise: [{min}, {max}]");
}

#[test]
fn different_seeds_give_different_fields() {
    let a = NoiseField::new(42);
    let b = NoiseField::new(7);
    let differing = (0..100)
        .filter(|i| {
            let x = *i as f32 * 0.31 + 0.5;
            let y = *i as f32 * 0.17 + 0.25;
            (a.sample(x, y) - b.sample(x, y)).abs() > 1e-6
        })
        .count();
    assert!(differing > 50, "only {differing} of 100 samples differed");
}

#[test]
fn negative_coordinates_wrap_into_table() {
    let field = NoiseField::default();
    // lattice cells far from the origin in both directions stay finite
    for &(x, y) in &[(-300.5, -12.25), (512.75, -1024.0), (-0.001, 255.999)] {
        assert!(field.sample(x, y).is_finite());
        let c = field.curl(x, y, 1.5);
        assert!(c.x.is_finite() && c.y.is_finite());
    }
}

#[test]
fn curl_is_rotated_gradient() {
    let field = NoiseField::default();
    let e = 0.001_f32;
    for &(x, y, t) in &[(0.3, 0.7, 0.0), (2.1, -1.4, 0.25), (-3.3, 5.5, 1.0)] {
        let c = field.curl(x, y, t);
        let dn_dy = (field.sample(x, y + e + t) - field.sample(x, y - e + t)) / (2.0 * e);
        let dn_dx = (field.sample(x + e, y + t) - field.sample(x - e, y + t)) / (2.0 * e);
        assert!((c.x - dn_dy).abs() < 1e-4);
        assert!((c.y + dn_dx).abs() < 1e-4);
    }
}

#[test]
fn curl_is_deterministic_and_time_varying() {
    let field = NoiseField::default();
    let a = field.curl(1.25, 0.5, 0.0);
    assert_eq!(a, field.curl(1.25, 0.5, 0.0));
    let moved = (1..20)
        .map(|k| field.curl(1.25, 0.5, k as f32 * 0.1))
        .any(|c| (c - a).length() > 1e-3);
    assert!(moved, "curl should drift as time advances");
}
