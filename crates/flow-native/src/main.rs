use anyhow::Context;
use flow_core::{
    Capability, FlowField, FlowParams, FrameSource, GestureParams, HandTracker, InputBridge,
    InputSample, Landmark, LandmarkDetector, PointerKind, PointerMode, PointerTarget,
    SectionLayout, SectionNavigator, FINGERTIPS, FINGER_BASES, INDEX_TIP, LANDMARK_COUNT,
    THUMB_TIP, WRIST,
};
use glam::{Vec2, Vec3};
use instant::{Duration, Instant};
use std::str::FromStr;

const VIEWPORT: Vec2 = Vec2::new(1280.0, 720.0);
const FRAME_MS: f64 = 1000.0 / 60.0;

fn env_or<T: FromStr>(name: &str, default: T) -> anyhow::Result<T>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{} must be a number, got {:?}", name, raw)),
        Err(_) => Ok(default),
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let frames: u32 = env_or("FLOW_FRAMES", 600)?;
    let seed: u64 = env_or("FLOW_SEED", 42)?;
    log::info!("flow-native: {} frames, seed {}", frames, seed);

    run_flow(frames, seed);
    run_hand_script();
    Ok(())
}

/// Drive the particle field with a pointer orbit and a scroll burst.
fn run_flow(frames: u32, seed: u64) {
    let mut field = FlowField::new(FlowParams::default(), Capability::High, false, seed);
    field.resize(VIEWPORT.x, VIEWPORT.y);

    let mut progress = 0.0_f32;
    let mut total_segments = 0usize;
    let mut peak_energy = 0.0_f32;
    for i in 0..frames {
        let t = i as f32 / 60.0;
        let scrolling = (120..180).contains(&i);
        if scrolling {
            progress = (progress + 0.005).min(1.0);
        }
        let input = InputSample {
            pointer: Some(VIEWPORT * 0.5 + Vec2::new(t.cos(), t.sin()) * 200.0),
            pointer_mode: if (300..360).contains(&i) {
                PointerMode::Repel
            } else {
                PointerMode::Attract
            },
            scroll_progress: progress,
            scroll_velocity: if scrolling { 55.0 } else { 0.0 },
        };
        let Some(out) = field.frame(&input) else {
            log::warn!("[flow] field inactive at frame {}", i);
            break;
        };
        total_segments += out.segments.len();
        peak_energy = peak_energy.max(out.frame.scroll_energy);
        if i % 60 == 0 {
            log::info!(
                "[flow] frame={} segments={} energy={:.3} trail={:.3} speed={:.2}",
                i,
                out.segments.len(),
                out.frame.scroll_energy,
                out.trail_fade,
                out.frame.speed_multiplier
            );
        }
        field.recycle(out.segments);
    }
    log::info!(
        "[flow] done: {} segments drawn, peak energy {:.3}, t={:.4}",
        total_segments,
        peak_energy,
        field.elapsed_time()
    );
}

/// One scripted camera frame: where the index tip is, wrist height, pinch.
#[derive(Clone, Copy)]
struct Pose {
    index: Vec2,
    wrist_y: f32,
    pinch: bool,
}

fn landmarks(pose: Pose) -> Vec<Landmark> {
    let mut lm = vec![Vec3::new(pose.index.x, pose.wrist_y - 0.2, 0.0); LANDMARK_COUNT];
    lm[WRIST] = Vec3::new(pose.index.x, pose.wrist_y, 0.0);
    for (&tip, &base) in FINGERTIPS.iter().zip(FINGER_BASES.iter()) {
        lm[base] = Vec3::new(pose.index.x, pose.wrist_y - 0.15, 0.0);
        // curled: tips below their bases
        lm[tip] = Vec3::new(pose.index.x, pose.wrist_y - 0.1, 0.0);
    }
    lm[INDEX_TIP] = pose.index.extend(0.0);
    let gap = if pose.pinch { 0.02 } else { 0.12 };
    lm[THUMB_TIP] = (pose.index + Vec2::new(gap, 0.0)).extend(0.0);
    lm
}

struct ScriptedCamera;

impl FrameSource for ScriptedCamera {
    fn has_frame(&self) -> bool {
        true
    }

    fn release(&mut self) {
        log::info!("[tracking] scripted camera released");
    }
}

struct ScriptedDetector {
    poses: Vec<Option<Pose>>,
    cursor: usize,
}

impl LandmarkDetector for ScriptedDetector {
    type Source = ScriptedCamera;

    fn detect(&mut self, _source: &ScriptedCamera, _timestamp_ms: f64) -> Option<Vec<Landmark>> {
        let pose = self.poses.get(self.cursor).copied().flatten();
        self.cursor += 1;
        pose.map(landmarks)
    }

    fn close(&mut self) {
        log::info!("[tracking] scripted model closed");
    }
}

fn script() -> Vec<Option<Pose>> {
    let mut poses = Vec::new();
    // hover across the page
    for k in 0..30 {
        poses.push(Some(Pose {
            index: Vec2::new(0.8 - k as f32 * 0.02, 0.4),
            wrist_y: 0.8,
            pinch: false,
        }));
    }
    // pinch and release
    for k in 0..10 {
        poses.push(Some(Pose {
            index: Vec2::new(0.2, 0.4),
            wrist_y: 0.8,
            pinch: k < 5,
        }));
    }
    // wrist swipe down
    for k in 0..10 {
        poses.push(Some(Pose {
            index: Vec2::new(0.5, 0.5),
            wrist_y: 0.6 + k as f32 * 0.03,
            pinch: false,
        }));
    }
    // hand leaves the frame
    poses.extend([None, None]);
    poses
}

/// Element ids laid out as three columns, for hit testing.
fn hit_test(x: f32, _y: f32) -> Option<&'static str> {
    match (x / VIEWPORT.x * 3.0) as i32 {
        0 => Some("nav-left"),
        1 => Some("project-card"),
        2 => Some("nav-right"),
        _ => None,
    }
}

fn run_hand_script() {
    let mut tracker: HandTracker<ScriptedDetector> = HandTracker::new(&GestureParams::default());
    let Some(ticket) = tracker.begin_start() else {
        return;
    };
    let poses = script();
    let frames = poses.len();
    let detector = ScriptedDetector { poses, cursor: 0 };
    if let Err(e) = tracker.finish_start(ticket, Ok((ScriptedCamera, detector))) {
        log::error!("[tracking] scripted start failed: {}", e);
        return;
    }

    let mut bridge: InputBridge<&'static str> = InputBridge::new();
    let mut nav = SectionNavigator::default();
    let mut scroll_y = 0.0_f64;
    let anchors: Vec<Option<f64>> = (0..nav.sections().len())
        .map(|i| Some(i as f64 * 800.0))
        .collect();
    let t0 = Instant::now();

    for i in 0..frames {
        let ts = i as f64 * FRAME_MS;
        let Some(state) = tracker.tick(ts, VIEWPORT) else {
            continue;
        };
        for ev in bridge.process(&state, hit_test) {
            if let PointerTarget::Element(id) = ev.target {
                if ev.kind != PointerKind::Move {
                    log::info!(
                        "[bridge] {} {} at ({:.0}, {:.0})",
                        ev.kind.dom_type(),
                        id,
                        ev.x,
                        ev.y
                    );
                }
            }
        }
        let now = t0 + Duration::from_millis(ts as u64);
        let layout = SectionLayout {
            scroll_y,
            viewport_height: VIEWPORT.y as f64,
            anchors: anchors.clone(),
        };
        if let Some(cmd) = nav.update(&state, now, || layout) {
            scroll_y = anchors[cmd.to].unwrap_or(scroll_y);
            log::info!("[nav] scrolled to #{} (y={})", cmd.section, scroll_y);
        }
    }
    tracker.stop();
}
