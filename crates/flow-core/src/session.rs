//! Hand-tracking session lifecycle.
//!
//! A [`HandTracker`] owns the camera and the landmark model while running
//! and nothing otherwise. Acquisition is asynchronous on every real
//! platform, so starting is split in two: [`HandTracker::begin_start`] hands
//! out a ticket, the front-end awaits its resources, and
//! [`HandTracker::finish_start`] installs them only if the ticket is still
//! current. A `stop()` in between invalidates the ticket, and the late
//! resources are released on arrival instead of leaking.

use crate::error::TrackingError;
use crate::gesture::{GestureParams, GestureRecognizer, HandState, Landmark};
use glam::Vec2;

/// A camera-like source of decoded video frames.
pub trait FrameSource {
    /// Whether a decoded frame is ready for detection right now.
    fn has_frame(&self) -> bool;
    /// Stop every track and detach the stream.
    fn release(&mut self);
}

/// A hand-landmark model bound to one kind of frame source.
pub trait LandmarkDetector {
    type Source: FrameSource;

    /// Landmarks of the first hand in the current frame, if any.
    fn detect(&mut self, source: &Self::Source, timestamp_ms: f64) -> Option<Vec<Landmark>>;
    fn close(&mut self);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StartTicket(u64);

/// Flags the UI reflects: the toggle, the spinner, the preview.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TrackingStatus {
    pub enabled: bool,
    pub loading: bool,
    pub tracking: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Starting,
    Running,
}

enum Slot<D: LandmarkDetector> {
    Idle,
    Starting(u64),
    Running { source: D::Source, detector: D },
}

pub struct HandTracker<D: LandmarkDetector> {
    slot: Slot<D>,
    generation: u64,
    recognizer: GestureRecognizer,
    last_error: Option<TrackingError>,
}

impl<D: LandmarkDetector> Default for HandTracker<D> {
    fn default() -> Self {
        Self::new(&GestureParams::default())
    }
}

impl<D: LandmarkDetector> HandTracker<D> {
    pub fn new(params: &GestureParams) -> Self {
        Self {
            slot: Slot::Idle,
            generation: 0,
            recognizer: GestureRecognizer::new(params),
            last_error: None,
        }
    }

    pub fn phase(&self) -> Phase {
        match self.slot {
            Slot::Idle => Phase::Idle,
            Slot::Starting(_) => Phase::Starting,
            Slot::Running { .. } => Phase::Running,
        }
    }

    pub fn status(&self) -> TrackingStatus {
        match self.slot {
            Slot::Idle => TrackingStatus::default(),
            Slot::Starting(_) => TrackingStatus {
                loading: true,
                ..TrackingStatus::default()
            },
            Slot::Running { .. } => TrackingStatus {
                enabled: true,
                loading: false,
                tracking: true,
            },
        }
    }

    pub fn last_error(&self) -> Option<&TrackingError> {
        self.last_error.as_ref()
    }

    pub fn source(&self) -> Option<&D::Source> {
        match &self.slot {
            Slot::Running { source, .. } => Some(source),
            _ => None,
        }
    }

    /// Idle → Starting. `None` when a session is already starting or running.
    pub fn begin_start(&mut self) -> Option<StartTicket> {
        if !matches!(self.slot, Slot::Idle) {
            log::debug!("[tracking] start ignored in {:?}", self.phase());
            return None;
        }
        self.generation = self.generation.wrapping_add(1);
        self.slot = Slot::Starting(self.generation);
        self.last_error = None;
        log::info!("[tracking] starting (generation {})", self.generation);
        Some(StartTicket(self.generation))
    }

    /// Whether an in-flight start should keep acquiring resources.
    pub fn is_current(&self, ticket: StartTicket) -> bool {
        matches!(self.slot, Slot::Starting(g) if g == ticket.0)
    }

    /// Install acquired resources, or record the failure.
    ///
    /// A stale ticket means `stop()` ran while the caller was awaiting; the
    /// resources are released here and `Cancelled` is returned.
    pub fn finish_start(
        &mut self,
        ticket: StartTicket,
        acquired: Result<(D::Source, D), TrackingError>,
    ) -> Result<(), TrackingError> {
        if !self.is_current(ticket) {
            if let Ok((source, detector)) = acquired {
                release(source, detector);
            }
            log::info!("[tracking] discarded stale start (generation {})", ticket.0);
            return Err(TrackingError::Cancelled);
        }
        match acquired {
            Ok((source, detector)) => {
                self.recognizer.reset();
                self.slot = Slot::Running { source, detector };
                log::info!("[tracking] running");
                Ok(())
            }
            Err(e) => {
                self.slot = Slot::Idle;
                log::warn!("[tracking] start failed: {}", e);
                self.last_error = Some(e.clone());
                Err(e)
            }
        }
    }

    /// Release everything and return to Idle. Returns whether anything was
    /// stopped; stopping an idle tracker is a no-op.
    pub fn stop(&mut self) -> bool {
        let prev = std::mem::replace(&mut self.slot, Slot::Idle);
        self.recognizer.reset();
        match prev {
            Slot::Idle => false,
            Slot::Starting(g) => {
                // invalidate the outstanding ticket
                self.generation = self.generation.wrapping_add(1);
                log::info!("[tracking] start {} cancelled", g);
                true
            }
            Slot::Running { source, detector } => {
                self.generation = self.generation.wrapping_add(1);
                release(source, detector);
                log::info!("[tracking] stopped");
                true
            }
        }
    }

    /// One detection cycle. `None` when not running or no new frame is
    /// decoded yet; the caller reschedules either way while running.
    pub fn tick(&mut self, timestamp_ms: f64, viewport: Vec2) -> Option<HandState> {
        let Slot::Running { source, detector } = &mut self.slot else {
            return None;
        };
        if !source.has_frame() {
            return None;
        }
        let hand = detector.detect(source, timestamp_ms);
        Some(self.recognizer.recognize(hand.as_deref(), viewport))
    }
}

impl<D: LandmarkDetector> Drop for HandTracker<D> {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Release a camera/model pair, e.g. after a partial or cancelled start.
pub fn release<D: LandmarkDetector>(mut source: D::Source, mut detector: D) {
    source.release();
    detector.close();
}
