// Host-side tests for the hand-tracking session lifecycle, using fake
// camera and model resources that count their releases.

use flow_core::*;
use glam::{Vec2, Vec3};
use std::cell::Cell;
use std::rc::Rc;

#[derive(Default)]
struct Counters {
    tracks_stopped: Cell<u32>,
    models_closed: Cell<u32>,
    detections: Cell<u32>,
}

struct FakeCamera {
    ready: Rc<Cell<bool>>,
    counters: Rc<Counters>,
}

impl FrameSource for FakeCamera {
    fn has_frame(&self) -> bool {
        self.ready.get()
    }

    fn release(&mut self) {
        self.counters
            .tracks_stopped
            .set(self.counters.tracks_stopped.get() + 1);
    }
}

struct FakeModel {
    hand: Option<Vec<Landmark>>,
    counters: Rc<Counters>,
}

impl LandmarkDetector for FakeModel {
    type Source = FakeCamera;

    fn detect(&mut self, _source: &FakeCamera, _timestamp_ms: f64) -> Option<Vec<Landmark>> {
        self.counters.detections.set(self.counters.detections.get() + 1);
        self.hand.clone()
    }

    fn close(&mut self) {
        self.counters
            .models_closed
            .set(self.counters.models_closed.get() + 1);
    }
}

struct Rig {
    counters: Rc<Counters>,
    ready: Rc<Cell<bool>>,
}

impl Rig {
    fn new() -> Self {
        Self {
            counters: Rc::new(Counters::default()),
            ready: Rc::new(Cell::new(true)),
        }
    }

    fn resources(&self, hand: Option<Vec<Landmark>>) -> (FakeCamera, FakeModel) {
        (
            FakeCamera {
                ready: self.ready.clone(),
                counters: self.counters.clone(),
            },
            FakeModel {
                hand,
                counters: self.counters.clone(),
            },
        )
    }
}

fn pointing_hand() -> Vec<Landmark> {
    let mut lm = vec![Vec3::new(0.5, 0.5, 0.0); LANDMARK_COUNT];
    lm[THUMB_TIP] = Vec3::new(0.2, 0.5, 0.0);
    lm[INDEX_TIP] = Vec3::new(0.25, 0.5, 0.0);
    lm
}

const VIEW: Vec2 = Vec2::new(1000.0, 800.0);

#[test]
fn successful_start_reports_running() {
    let rig = Rig::new();
    let mut tracker: HandTracker<FakeModel> = HandTracker::default();
    assert_eq!(tracker.status(), TrackingStatus::default());

    let ticket = tracker.begin_start().expect("idle tracker starts");
    assert_eq!(tracker.phase(), Phase::Starting);
    assert!(tracker.status().loading);
    assert!(!tracker.status().enabled);
    assert!(tracker.is_current(ticket));

    tracker
        .finish_start(ticket, Ok(rig.resources(None)))
        .expect("install");
    assert_eq!(tracker.phase(), Phase::Running);
    assert_eq!(
        tracker.status(),
        TrackingStatus {
            enabled: true,
            loading: false,
            tracking: true
        }
    );
    assert!(tracker.source().is_some());
}

#[test]
fn second_start_while_starting_or_running_is_ignored() {
    let rig = Rig::new();
    let mut tracker: HandTracker<FakeModel> = HandTracker::default();
    let ticket = tracker.begin_start().expect("first start");
    assert!(tracker.begin_start().is_none());
    tracker
        .finish_start(ticket, Ok(rig.resources(None)))
        .expect("install");
    assert!(tracker.begin_start().is_none());
    assert_eq!(tracker.phase(), Phase::Running);
}

#[test]
fn stop_during_start_releases_late_resources() {
    let rig = Rig::new();
    let mut tracker: HandTracker<FakeModel> = HandTracker::default();
    let ticket = tracker.begin_start().expect("start");

    assert!(tracker.stop());
    assert!(!tracker.is_current(ticket));
    assert_eq!(tracker.phase(), Phase::Idle);

    // the camera and model resolve after the user already turned tracking off
    let result = tracker.finish_start(ticket, Ok(rig.resources(None)));
    assert_eq!(result, Err(TrackingError::Cancelled));
    assert_eq!(rig.counters.tracks_stopped.get(), 1);
    assert_eq!(rig.counters.models_closed.get(), 1);
    assert!(tracker.source().is_none());
    assert_eq!(tracker.status(), TrackingStatus::default());
}

#[test]
fn failed_start_clears_every_flag() {
    let mut tracker: HandTracker<FakeModel> = HandTracker::default();
    let ticket = tracker.begin_start().expect("start");
    let err = tracker
        .finish_start(ticket, Err(TrackingError::PermissionDenied))
        .unwrap_err();
    assert_eq!(err, TrackingError::PermissionDenied);
    assert_eq!(tracker.phase(), Phase::Idle);
    assert_eq!(tracker.status(), TrackingStatus::default());
    assert_eq!(tracker.last_error(), Some(&TrackingError::PermissionDenied));

    // a retry is allowed and clears the stale error
    assert!(tracker.begin_start().is_some());
    assert!(tracker.last_error().is_none());
}

#[test]
fn stop_is_idempotent() {
    let rig = Rig::new();
    let mut tracker: HandTracker<FakeModel> = HandTracker::default();
    assert!(!tracker.stop());

    let ticket = tracker.begin_start().expect("start");
    tracker
        .finish_start(ticket, Ok(rig.resources(None)))
        .expect("install");
    assert!(tracker.stop());
    assert!(!tracker.stop());
    assert_eq!(rig.counters.tracks_stopped.get(), 1);
    assert_eq!(rig.counters.models_closed.get(), 1);
    assert!(tracker.source().is_none());
}

#[test]
fn tick_waits_for_a_decoded_frame() {
    let rig = Rig::new();
    let mut tracker: HandTracker<FakeModel> = HandTracker::default();
    assert!(tracker.tick(0.0, VIEW).is_none(), "idle tracker never detects");

    let ticket = tracker.begin_start().expect("start");
    tracker
        .finish_start(ticket, Ok(rig.resources(Some(pointing_hand()))))
        .expect("install");

    rig.ready.set(false);
    assert!(tracker.tick(16.0, VIEW).is_none());
    assert_eq!(rig.counters.detections.get(), 0);

    rig.ready.set(true);
    let state = tracker.tick(32.0, VIEW).expect("frame ready");
    assert!(state.detected);
    assert!((state.screen_x - 750.0).abs() < 1e-3);
    assert!((state.screen_y - 400.0).abs() < 1e-3);
    assert_eq!(rig.counters.detections.get(), 1);
}

#[test]
fn tick_without_a_hand_reports_lost() {
    let rig = Rig::new();
    let mut tracker: HandTracker<FakeModel> = HandTracker::default();
    let ticket = tracker.begin_start().expect("start");
    tracker
        .finish_start(ticket, Ok(rig.resources(None)))
        .expect("install");
    let state = tracker.tick(16.0, VIEW).expect("frame ready");
    assert_eq!(state, HandState::lost());
}

#[test]
fn restart_after_stop_gets_a_fresh_ticket() {
    let rig = Rig::new();
    let mut tracker: HandTracker<FakeModel> = HandTracker::default();
    let first = tracker.begin_start().expect("start");
    tracker.stop();
    let second = tracker.begin_start().expect("restart");
    assert_ne!(first, second);
    assert!(!tracker.is_current(first));

    // the superseded start resolving late must not clobber the new one
    assert_eq!(
        tracker.finish_start(first, Ok(rig.resources(None))),
        Err(TrackingError::Cancelled)
    );
    assert_eq!(tracker.phase(), Phase::Starting);
    tracker
        .finish_start(second, Ok(rig.resources(None)))
        .expect("install");
    assert_eq!(tracker.phase(), Phase::Running);
    assert_eq!(rig.counters.tracks_stopped.get(), 1);
}

#[test]
fn dropping_a_running_tracker_releases_resources() {
    let rig = Rig::new();
    {
        let mut tracker: HandTracker<FakeModel> = HandTracker::default();
        let ticket = tracker.begin_start().expect("start");
        tracker
            .finish_start(ticket, Ok(rig.resources(None)))
            .expect("install");
    }
    assert_eq!(rig.counters.tracks_stopped.get(), 1);
    assert_eq!(rig.counters.models_closed.get(), 1);
}
