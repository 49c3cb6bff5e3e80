// Host-side tests for gesture recognition from hand landmarks.

use flow_core::*;
use glam::{Vec2, Vec3};

/// A relaxed hand: fingers curled (tips below their bases), thumb and index
/// well apart, wrist at `wrist_y`.
fn hand(wrist_y: f32) -> Vec<Landmark> {
    let mut lm = vec![Vec3::new(0.5, 0.5, 0.0); LANDMARK_COUNT];
    lm[WRIST] = Vec3::new(0.5, wrist_y, 0.0);
    for (&tip, &base) in FINGERTIPS.iter().zip(FINGER_BASES.iter()) {
        lm[base] = Vec3::new(0.5, 0.5, 0.0);
        lm[tip] = Vec3::new(0.5, 0.6, 0.0);
    }
    lm[THUMB_TIP] = Vec3::new(0.3, 0.6, 0.0);
    lm[INDEX_TIP] = Vec3::new(0.4, 0.6, 0.0);
    lm
}

fn with_pinch_gap(mut lm: Vec<Landmark>, gap: f32) -> Vec<Landmark> {
    lm[THUMB_TIP] = lm[INDEX_TIP] + Vec3::new(gap, 0.0, 0.0);
    lm
}

#[test]
fn pinch_latch_has_hysteresis_with_strict_thresholds() {
    let mut pinch = PinchDetector::new(PINCH_ON, PINCH_OFF);
    let sequence = [
        (0.100, false),
        (0.045, false), // equal to engage threshold does not engage
        (0.040, true),
        (0.050, true), // between thresholds holds
        (0.064, true),
        (0.065, false), // equal to release threshold releases
        (0.050, false), // between thresholds does not re-engage
        (0.044, true),
    ];
    for (i, (distance, expected)) in sequence.into_iter().enumerate() {
        assert_eq!(pinch.update(distance), expected, "step {i} at {distance}");
    }
    pinch.reset();
    assert!(!pinch.is_pinching());
}

#[test]
fn cursor_is_mirrored_and_scaled_to_viewport() {
    let mut rec = GestureRecognizer::default();
    let lm = hand(0.8);
    let state = rec.recognize(Some(&lm), Vec2::new(1000.0, 500.0));
    assert!(state.detected);
    assert!((state.cursor_x - 0.6).abs() < 1e-6);
    assert!((state.cursor_y - 0.6).abs() < 1e-6);
    assert!((state.screen_x - 600.0).abs() < 1e-3);
    assert!((state.screen_y - 300.0).abs() < 1e-3);
    assert_eq!(state.screen(), Vec2::new(state.screen_x, state.screen_y));
    let points = state.landmarks.as_ref().expect("landmarks kept for preview");
    assert_eq!(points.len(), LANDMARK_COUNT);
    assert_eq!(points[INDEX_TIP], Vec2::new(0.4, 0.6));
}

#[test]
fn pinch_is_tracked_across_frames() {
    let mut rec = GestureRecognizer::default();
    let view = Vec2::new(800.0, 600.0);
    assert!(!rec.recognize(Some(&with_pinch_gap(hand(0.8), 0.1)), view).is_pinching);
    assert!(rec.recognize(Some(&with_pinch_gap(hand(0.8), 0.02)), view).is_pinching);
    // loosening into the hysteresis band keeps the pinch
    assert!(rec.recognize(Some(&with_pinch_gap(hand(0.8), 0.055)), view).is_pinching);
    assert!(rec.is_pinching());
    assert!(!rec.recognize(Some(&with_pinch_gap(hand(0.8), 0.09)), view).is_pinching);
}

#[test]
fn open_palm_requires_every_fingertip_above_its_base() {
    let mut lm = hand(0.8);
    assert!(!is_open_palm(&lm));
    for (&tip, &base) in FINGERTIPS.iter().zip(FINGER_BASES.iter()) {
        lm[base].y = 0.5;
        lm[tip].y = 0.3;
    }
    assert!(is_open_palm(&lm));
    // one curled finger breaks it
    lm[FINGERTIPS[3]].y = 0.55;
    assert!(!is_open_palm(&lm));
}

#[test]
fn wrist_velocity_uses_the_recent_window() {
    let mut rec = GestureRecognizer::default();
    let view = Vec2::new(800.0, 600.0);
    let mut last = HandState::lost();
    for k in 0..10 {
        last = rec.recognize(Some(&hand(0.9 - 0.01 * k as f32)), view);
    }
    assert_eq!(rec.wrist_samples(), WRIST_HISTORY);
    assert!((last.wrist_velocity_y + 0.01).abs() < 1e-5, "{}", last.wrist_velocity_y);
}

#[test]
fn wrist_velocity_forgets_samples_older_than_the_window() {
    let mut wrist = WristTracker::new(4);
    let mut v = 0.0;
    for y in [0.0, 0.0, 0.0, 0.0, 0.4, 0.8] {
        v = wrist.push(y);
    }
    assert_eq!(wrist.len(), 4);
    // window is [0, 0, 0.4, 0.8]
    assert!((v - 0.8 / 3.0).abs() < 1e-6, "velocity {}", v);
}

#[test]
fn short_landmark_lists_are_handled_by_the_helpers() {
    let short = vec![Vec3::ZERO; 12];
    assert!(!is_open_palm(&short));
    assert_eq!(pinch_distance(&short), Some(0.0));
    assert_eq!(pinch_distance(&short[..4]), None);
    assert!(!is_open_palm(&[]));

    let lm = hand(0.8);
    let d = pinch_distance(&lm).unwrap();
    assert!((d - 0.1).abs() < 1e-6, "{}", d);
}

#[test]
fn wrist_velocity_is_zero_with_one_sample() {
    let mut wrist = WristTracker::new(WRIST_HISTORY);
    assert!(wrist.is_empty());
    assert_eq!(wrist.push(0.7), 0.0);
    assert_eq!(wrist.len(), 1);
    assert!((wrist.push(0.74) - 0.04).abs() < 1e-6);
    wrist.clear();
    assert_eq!(wrist.velocity(), 0.0);
}

#[test]
fn no_hand_yields_lost_state() {
    let mut rec = GestureRecognizer::default();
    let state = rec.recognize(None, Vec2::new(800.0, 600.0));
    assert_eq!(state, HandState::lost());
    assert!(!state.detected);
    assert!(state.landmarks.is_none());
    assert!(!state.is_pinching);
}

#[test]
fn truncated_landmark_list_counts_as_no_hand() {
    let mut rec = GestureRecognizer::default();
    let lm = hand(0.5);
    let state = rec.recognize(Some(&lm[..12]), Vec2::new(800.0, 600.0));
    assert!(!state.detected);
    assert_eq!(rec.wrist_samples(), 0);
}

#[test]
fn lost_frames_keep_pinch_memory_until_reset() {
    let mut rec = GestureRecognizer::default();
    let view = Vec2::new(800.0, 600.0);
    rec.recognize(Some(&with_pinch_gap(hand(0.8), 0.01)), view);
    rec.recognize(None, view);
    assert!(rec.is_pinching());
    assert_eq!(rec.wrist_samples(), 1);

    rec.reset();
    assert!(!rec.is_pinching());
    assert_eq!(rec.wrist_samples(), 0);
}
