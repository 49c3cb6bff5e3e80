// Host-side tests for constants and their relationships.

use flow_core::*;

#[test]
#[allow(clippy::assertions_on_constants)]
fn pinch_thresholds_form_a_hysteresis_band() {
    // release must be looser than engage or the latch would chatter
    assert!(PINCH_ON < PINCH_OFF);
    assert!(PINCH_ON > 0.0);
    assert!(WRIST_HISTORY >= 2);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn pool_sizes_shrink_with_capability() {
    assert!(PARTICLES_HIGH > PARTICLES_MEDIUM);
    assert!(PARTICLES_MEDIUM > PARTICLES_LOW);
    assert!(PARTICLES_LOW > 0);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn scroll_coupling_stays_in_range() {
    assert!(SCROLL_SMOOTHING > 0.0 && SCROLL_SMOOTHING <= 1.0);
    // trail fill must never fully clear the canvas
    assert!(TRAIL_FADE_BASE + TRAIL_FADE_SPAN < 1.0);
    assert!(SCROLL_PUSH_MIN_ENERGY < 1.0);
    assert!(FADE_FRACTION > 0.0 && FADE_FRACTION < 0.5);
    assert!(ACCENT_PROBABILITY > 0.0 && ACCENT_PROBABILITY < 1.0);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn stroke_palette_is_valid() {
    assert!(NEUTRAL_GREY_SPAN > 0);
    assert!(NEUTRAL_GREY_MIN as u32 + NEUTRAL_GREY_SPAN as u32 <= 256);
    assert!(NEUTRAL_ALPHA_BASE + NEUTRAL_ALPHA_SPAN <= 1.0);
}

#[test]
fn landmark_indices_fit_the_hand_topology() {
    for &i in FINGERTIPS.iter().chain(FINGER_BASES.iter()) {
        assert!(i < LANDMARK_COUNT);
    }
    assert!(FINGERTIPS.contains(&THUMB_TIP));
    assert!(FINGERTIPS.contains(&INDEX_TIP));
    for (tip, base) in FINGERTIPS.iter().zip(FINGER_BASES.iter()) {
        assert!(base < tip);
    }
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn cursor_ring_sizes_are_ordered() {
    assert!(RING_PINCH < RING_IDLE);
    assert!(RING_IDLE < RING_OPEN_PALM);
    assert_eq!(SECTION_IDS.len(), 5);
    assert_eq!(SECTION_IDS[0], "intro");
}

#[test]
fn webgl_probe_tries_webgl2_first() {
    assert_eq!(WEBGL_CONTEXT_KINDS[0], "webgl2");
    assert!(WEBGL_CONTEXT_KINDS.contains(&"webgl"));
    assert!(WEBGL_CONTEXT_KINDS.contains(&"experimental-webgl"));
}
