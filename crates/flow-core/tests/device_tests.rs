// Host-side tests for capability detection, the cursor ring, and the poem
// payload handling.

use flow_core::poem::{parse_payload, pick_fallback, FALLBACKS};
use flow_core::*;

fn profile(cores: Option<u32>, memory_gb: Option<f32>, is_mobile: bool) -> DeviceProfile {
    DeviceProfile {
        cores,
        memory_gb,
        is_mobile,
        has_webgl: true,
    }
}

#[test]
fn capability_tiers_follow_device_resources() {
    assert_eq!(classify(&profile(Some(8), Some(8.0), false)), Capability::High);
    assert_eq!(classify(&profile(Some(16), Some(32.0), false)), Capability::High);
    assert_eq!(classify(&profile(Some(4), Some(8.0), false)), Capability::Medium);
    assert_eq!(classify(&profile(Some(8), Some(4.0), false)), Capability::Medium);
    assert_eq!(classify(&profile(Some(8), Some(8.0), true)), Capability::Medium);
    assert_eq!(classify(&profile(Some(2), Some(8.0), true)), Capability::Low);
    assert_eq!(classify(&profile(Some(8), Some(2.0), false)), Capability::Low);
    // desktop with few cores is not demoted to low
    assert_eq!(classify(&profile(Some(2), Some(8.0), false)), Capability::Medium);
}

#[test]
fn missing_webgl_is_always_low() {
    let mut p = profile(Some(16), Some(32.0), false);
    p.has_webgl = false;
    assert_eq!(classify(&p), Capability::Low);
}

#[test]
fn unreported_resources_default_to_four() {
    assert_eq!(classify(&profile(None, None, false)), Capability::Medium);
    assert_eq!(classify(&profile(None, None, true)), Capability::Medium);
    assert_eq!(classify(&profile(Some(0), Some(0.0), false)), Capability::Medium);
}

#[test]
fn mobile_user_agents_are_recognised() {
    assert!(is_mobile_user_agent(
        "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X) AppleWebKit/605.1.15"
    ));
    assert!(is_mobile_user_agent(
        "Mozilla/5.0 (Linux; Android 14; Pixel 8) AppleWebKit/537.36"
    ));
    assert!(!is_mobile_user_agent(
        "Mozilla/5.0 (X11; Linux x86_64; rv:128.0) Gecko/20100101 Firefox/128.0"
    ));
}

#[test]
fn tier_maps_to_pool_size() {
    let params = FlowParams::default();
    assert_eq!(Capability::High.particle_count(&params), PARTICLES_HIGH);
    assert_eq!(Capability::Medium.particle_count(&params), PARTICLES_MEDIUM);
    assert_eq!(Capability::Low.particle_count(&params), PARTICLES_LOW);
    assert_eq!(Capability::Medium.as_str(), "medium");
}

fn running() -> TrackingStatus {
    TrackingStatus {
        enabled: true,
        loading: false,
        tracking: true,
    }
}

#[test]
fn cursor_ring_is_centred_and_sized_by_gesture() {
    let mut hand = HandState {
        screen_x: 400.0,
        screen_y: 300.0,
        detected: true,
        ..HandState::default()
    };
    let idle = cursor_ring(running(), Some(&hand)).expect("ring shown");
    assert_eq!(idle.size, RING_IDLE);
    assert_eq!((idle.left, idle.top), (384.0, 284.0));
    assert_eq!(idle.opacity, 0.7);

    hand.is_open_palm = true;
    assert_eq!(ring_size(&hand), RING_OPEN_PALM);

    // pinch wins over an open palm
    hand.is_pinching = true;
    let pinched = cursor_ring(running(), Some(&hand)).expect("ring shown");
    assert_eq!(pinched.size, RING_PINCH);
    assert_eq!(pinched.opacity, 1.0);
    assert!(pinched.dot > idle.dot);
}

#[test]
fn cursor_ring_hidden_without_tracking_or_hand() {
    let hand = HandState {
        detected: true,
        ..HandState::default()
    };
    assert!(cursor_ring(TrackingStatus::default(), Some(&hand)).is_none());
    assert!(cursor_ring(running(), None).is_none());
    assert!(cursor_ring(running(), Some(&HandState::lost())).is_none());
}

#[test]
fn toggle_offered_only_on_capable_devices() {
    assert!(toggle_visible(false, false));
    assert!(!toggle_visible(true, false));
    assert!(!toggle_visible(false, true));
    assert_eq!(toggle_label(running()), "Disable hand tracking");
    assert_eq!(toggle_label(TrackingStatus::default()), "Enable hand tracking");
}

#[test]
fn poem_payload_parsing() {
    assert_eq!(
        parse_payload(r#"{"text":"light\nbends"}"#),
        Ok("light\nbends".to_string())
    );
    assert_eq!(parse_payload(r#"{"text":"   "}"#), Err(PoemError::Empty));
    assert_eq!(parse_payload(r#"{"other":1}"#), Err(PoemError::Empty));
    assert!(matches!(
        parse_payload("<html>502</html>"),
        Err(PoemError::Malformed(_))
    ));
}

#[test]
fn fallback_pick_covers_the_list() {
    assert_eq!(pick_fallback(0.0), FALLBACKS[0]);
    assert_eq!(pick_fallback(0.999), FALLBACKS[FALLBACKS.len() - 1]);
    assert_eq!(pick_fallback(1.0), FALLBACKS[FALLBACKS.len() - 1]);
    assert_eq!(pick_fallback(0.5), FALLBACKS[4]);
}
