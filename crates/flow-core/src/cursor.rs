//! On-screen affordances for hand tracking that carry no platform types.

use crate::constants::{RING_IDLE, RING_OPEN_PALM, RING_PINCH};
use crate::gesture::HandState;
use crate::session::TrackingStatus;

/// Placement of the virtual cursor ring, in viewport CSS px.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CursorRing {
    /// Top-left corner so the ring is centred on the cursor.
    pub left: f32,
    pub top: f32,
    pub size: f32,
    pub opacity: f32,
    pub dot: f32,
}

#[inline]
pub fn ring_size(state: &HandState) -> f32 {
    if state.is_pinching {
        RING_PINCH
    } else if state.is_open_palm {
        RING_OPEN_PALM
    } else {
        RING_IDLE
    }
}

/// `None` hides the ring.
pub fn cursor_ring(status: TrackingStatus, state: Option<&HandState>) -> Option<CursorRing> {
    if !status.enabled || !status.tracking {
        return None;
    }
    let state = state.filter(|s| s.detected)?;
    let size = ring_size(state);
    Some(CursorRing {
        left: state.screen_x - size / 2.0,
        top: state.screen_y - size / 2.0,
        size,
        opacity: if state.is_pinching { 1.0 } else { 0.7 },
        dot: if state.is_pinching { 6.0 } else { 4.0 },
    })
}

/// The enable toggle is offered only where the effect runs comfortably.
#[inline]
pub fn toggle_visible(low_capability: bool, reduced_motion: bool) -> bool {
    !low_capability && !reduced_motion
}

#[inline]
pub fn toggle_label(status: TrackingStatus) -> &'static str {
    if status.enabled {
        "Disable hand tracking"
    } else {
        "Enable hand tracking"
    }
}
