//! Hand-landmark gesture recognition.
//!
//! Turns one frame of landmarks (MediaPipe's 21-point hand topology, all
//! coordinates normalized to the video frame) into a [`HandState`]. Pinch
//! and wrist velocity keep memory across frames; everything else is derived
//! from the current frame alone.

use crate::constants::*;
use glam::{Vec2, Vec3};
use std::collections::VecDeque;

pub type Landmark = Vec3;

#[derive(Clone, Debug, PartialEq)]
pub struct GestureParams {
    /// Pinch engages below this thumb–index distance.
    pub pinch_on: f32,
    /// An engaged pinch releases at or above this distance.
    pub pinch_off: f32,
    pub wrist_history: usize,
}

impl Default for GestureParams {
    fn default() -> Self {
        Self {
            pinch_on: PINCH_ON,
            pinch_off: PINCH_OFF,
            wrist_history: WRIST_HISTORY,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct HandState {
    /// Index fingertip, x mirrored, normalized `[0, 1]`.
    pub cursor_x: f32,
    pub cursor_y: f32,
    /// Cursor in viewport CSS pixels.
    pub screen_x: f32,
    pub screen_y: f32,
    pub is_pinching: bool,
    pub is_open_palm: bool,
    /// Positive when the wrist moves down the frame.
    pub wrist_velocity_y: f32,
    pub landmarks: Option<Vec<Vec2>>,
    pub detected: bool,
}

impl HandState {
    /// The state emitted for a frame with no hand in view.
    pub fn lost() -> Self {
        Self::default()
    }

    pub fn screen(&self) -> Vec2 {
        Vec2::new(self.screen_x, self.screen_y)
    }
}

/// Two-threshold pinch latch. Both comparisons are strict: a distance equal
/// to `on` does not engage, a distance equal to `off` releases.
#[derive(Clone, Copy, Debug)]
pub struct PinchDetector {
    on: f32,
    off: f32,
    pinching: bool,
}

impl PinchDetector {
    pub fn new(on: f32, off: f32) -> Self {
        debug_assert!(on <= off, "pinch release threshold must not be tighter than engage");
        Self {
            on,
            off,
            pinching: false,
        }
    }

    pub fn update(&mut self, distance: f32) -> bool {
        self.pinching = if self.pinching {
            distance < self.off
        } else {
            distance < self.on
        };
        self.pinching
    }

    pub fn is_pinching(&self) -> bool {
        self.pinching
    }

    pub fn reset(&mut self) {
        self.pinching = false;
    }
}

/// Fixed-capacity FIFO of wrist heights with a finite-difference velocity.
#[derive(Clone, Debug)]
pub struct WristTracker {
    history: VecDeque<f32>,
    capacity: usize,
}

impl WristTracker {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(2);
        Self {
            history: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, y: f32) -> f32 {
        if self.history.len() == self.capacity {
            self.history.pop_front();
        }
        self.history.push_back(y);
        self.velocity()
    }

    /// `(newest - oldest) / (len - 1)`; zero until two samples exist.
    pub fn velocity(&self) -> f32 {
        match (self.history.front(), self.history.back()) {
            (Some(first), Some(last)) if self.history.len() >= 2 => {
                (last - first) / (self.history.len() - 1) as f32
            }
            _ => 0.0,
        }
    }

    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    pub fn clear(&mut self) {
        self.history.clear();
    }
}

/// All fingertips above (smaller y than) their base joints. A hand with
/// missing landmarks is never an open palm.
pub fn is_open_palm(landmarks: &[Landmark]) -> bool {
    landmarks.len() >= LANDMARK_COUNT
        && FINGERTIPS
            .iter()
            .zip(FINGER_BASES.iter())
            .all(|(&tip, &base)| landmarks[tip].y < landmarks[base].y)
}

/// Thumb tip to index tip, in 3D; `None` when either landmark is missing.
pub fn pinch_distance(landmarks: &[Landmark]) -> Option<f32> {
    let thumb = landmarks.get(THUMB_TIP)?;
    let index = landmarks.get(INDEX_TIP)?;
    Some(thumb.distance(*index))
}

#[derive(Clone, Debug)]
pub struct GestureRecognizer {
    pinch: PinchDetector,
    wrist: WristTracker,
}

impl Default for GestureRecognizer {
    fn default() -> Self {
        Self::new(&GestureParams::default())
    }
}

impl GestureRecognizer {
    pub fn new(params: &GestureParams) -> Self {
        Self {
            pinch: PinchDetector::new(params.pinch_on, params.pinch_off),
            wrist: WristTracker::new(params.wrist_history),
        }
    }

    /// Build the state for one frame. `hand` is the first detected hand, if
    /// any; a hand with too few landmarks counts as no hand.
    pub fn recognize(&mut self, hand: Option<&[Landmark]>, viewport: Vec2) -> HandState {
        let landmarks = match hand {
            Some(lm) if lm.len() >= LANDMARK_COUNT => lm,
            Some(lm) => {
                log::debug!("[tracking] ignoring hand with {} landmarks", lm.len());
                return HandState::lost();
            }
            None => return HandState::lost(),
        };

        // user-facing camera: mirror x so moving right moves the cursor right
        let cursor_x = 1.0 - landmarks[INDEX_TIP].x;
        let cursor_y = landmarks[INDEX_TIP].y;
        let is_pinching = match pinch_distance(landmarks) {
            Some(d) => self.pinch.update(d),
            None => self.pinch.is_pinching(),
        };
        let wrist_velocity_y = self.wrist.push(landmarks[WRIST].y);

        HandState {
            cursor_x,
            cursor_y,
            screen_x: cursor_x * viewport.x,
            screen_y: cursor_y * viewport.y,
            is_pinching,
            is_open_palm: is_open_palm(landmarks),
            wrist_velocity_y,
            landmarks: Some(landmarks.iter().map(|l| l.truncate()).collect()),
            detected: true,
        }
    }

    pub fn reset(&mut self) {
        self.pinch.reset();
        self.wrist.clear();
    }

    pub fn is_pinching(&self) -> bool {
        self.pinch.is_pinching()
    }

    pub fn wrist_samples(&self) -> usize {
        self.wrist.len()
    }
}
