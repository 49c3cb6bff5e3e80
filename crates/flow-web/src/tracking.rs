//! Webcam hand tracking: MediaPipe bindings, camera acquisition, and the
//! controller that drives the per-frame detection loop.
//!
//! The lifecycle itself lives in [`flow_core::HandTracker`]; this module only
//! supplies the browser resources and forwards each [`HandState`] to the
//! pointer bridge, section navigation and the on-screen affordances.

use crate::dispatch;
use crate::dom;
use crate::input::SharedInput;
use crate::overlay::{self, Guide};
use crate::preview::Preview;
use flow_core::{
    cursor_ring, toggle_visible, FrameSource, GestureParams, HandState, HandTracker, InputBridge,
    Landmark, LandmarkDetector, NavigationParams, Phase, PointerMode, SectionNavigator,
    StartTicket, TrackingError,
};
use glam::{Vec2, Vec3};
use instant::Instant;
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

pub const MODEL_ASSET_PATH: &str = "https://storage.googleapis.com/mediapipe-models/hand_landmarker/hand_landmarker/float16/1/hand_landmarker.task";
pub const VISION_WASM_ROOT: &str =
    "https://cdn.jsdelivr.net/npm/@mediapipe/tasks-vision@latest/wasm";

/// `HTMLMediaElement.HAVE_CURRENT_DATA`
const HAVE_CURRENT_DATA: u16 = 2;

#[wasm_bindgen(module = "/js/hand_landmarker.js")]
extern "C" {
    #[wasm_bindgen(catch, js_name = createHandLandmarker)]
    async fn create_hand_landmarker(
        wasm_root: &str,
        model_asset_path: &str,
        delegate: &str,
    ) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch, js_name = detectHand)]
    fn detect_hand(
        landmarker: &JsValue,
        video: &web::HtmlVideoElement,
        timestamp_ms: f64,
    ) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(js_name = closeHandLandmarker)]
    fn close_hand_landmarker(landmarker: &JsValue);
}

#[derive(Clone, Debug)]
pub struct TrackerConfig {
    pub model_asset_path: String,
    pub wasm_root: String,
    pub delegate: String,
    pub camera_width: u32,
    pub camera_height: u32,
    pub facing_mode: String,
    pub gesture: GestureParams,
    pub navigation: NavigationParams,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            model_asset_path: MODEL_ASSET_PATH.to_string(),
            wasm_root: VISION_WASM_ROOT.to_string(),
            delegate: "GPU".to_string(),
            camera_width: 320,
            camera_height: 240,
            facing_mode: "user".to_string(),
            gesture: GestureParams::default(),
            navigation: NavigationParams::default(),
        }
    }
}

/// Camera stream playing into a detached `<video>`.
pub struct VideoSource {
    pub video: web::HtmlVideoElement,
    stream: web::MediaStream,
}

fn stop_tracks(stream: &web::MediaStream) {
    for track in stream.get_tracks().iter() {
        if let Ok(track) = track.dyn_into::<web::MediaStreamTrack>() {
            track.stop();
        }
    }
}

impl FrameSource for VideoSource {
    fn has_frame(&self) -> bool {
        self.video.ready_state() >= HAVE_CURRENT_DATA
    }

    fn release(&mut self) {
        stop_tracks(&self.stream);
        self.video.set_src_object(None);
    }
}

pub struct MediaPipeDetector {
    handle: JsValue,
    closed: bool,
}

impl MediaPipeDetector {
    fn new(handle: JsValue) -> Self {
        Self {
            handle,
            closed: false,
        }
    }
}

impl LandmarkDetector for MediaPipeDetector {
    type Source = VideoSource;

    fn detect(&mut self, source: &VideoSource, timestamp_ms: f64) -> Option<Vec<Landmark>> {
        if self.closed {
            return None;
        }
        let raw = match detect_hand(&self.handle, &source.video, timestamp_ms) {
            Ok(v) => v,
            Err(e) => {
                log::warn!("[tracking] detection failed: {}", js_message(&e));
                return None;
            }
        };
        let flat = raw.dyn_into::<js_sys::Float32Array>().ok()?;
        let values = flat.to_vec();
        Some(
            values
                .chunks_exact(3)
                .map(|c| Vec3::new(c[0], c[1], c[2]))
                .collect(),
        )
    }

    fn close(&mut self) {
        if !self.closed {
            close_hand_landmarker(&self.handle);
            self.closed = true;
        }
    }
}

fn js_message(e: &JsValue) -> String {
    e.dyn_ref::<js_sys::Error>()
        .map(|err| String::from(err.message()))
        .or_else(|| e.as_string())
        .unwrap_or_else(|| format!("{:?}", e))
}

fn camera_error(e: JsValue) -> TrackingError {
    let name = js_sys::Reflect::get(&e, &JsValue::from_str("name"))
        .ok()
        .and_then(|v| v.as_string())
        .unwrap_or_default();
    match name.as_str() {
        "NotAllowedError" | "SecurityError" => TrackingError::PermissionDenied,
        _ => TrackingError::CameraUnavailable(js_message(&e)),
    }
}

async fn open_camera(
    document: &web::Document,
    config: &TrackerConfig,
) -> Result<VideoSource, TrackingError> {
    let window =
        web::window().ok_or_else(|| TrackingError::CameraUnavailable("no window".to_string()))?;
    let devices = window
        .navigator()
        .media_devices()
        .map_err(|e| TrackingError::CameraUnavailable(js_message(&e)))?;

    let video_opts = js_sys::Object::new();
    let _ = js_sys::Reflect::set(&video_opts, &"width".into(), &config.camera_width.into());
    let _ = js_sys::Reflect::set(&video_opts, &"height".into(), &config.camera_height.into());
    let _ = js_sys::Reflect::set(
        &video_opts,
        &"facingMode".into(),
        &config.facing_mode.as_str().into(),
    );
    let constraints = web::MediaStreamConstraints::new();
    constraints.set_video(&video_opts);

    let promise = devices
        .get_user_media_with_constraints(&constraints)
        .map_err(camera_error)?;
    let stream: web::MediaStream = JsFuture::from(promise)
        .await
        .map_err(camera_error)?
        .dyn_into()
        .map_err(|_| TrackingError::CameraUnavailable("not a media stream".to_string()))?;

    let video = match document
        .create_element("video")
        .ok()
        .and_then(|el| el.dyn_into::<web::HtmlVideoElement>().ok())
    {
        Some(v) => v,
        None => {
            stop_tracks(&stream);
            return Err(TrackingError::CameraUnavailable(
                "could not create video element".to_string(),
            ));
        }
    };
    let _ = video.set_attribute("playsinline", "true");
    video.set_muted(true);
    video.set_src_object(Some(&stream));

    let mut source = VideoSource { video, stream };
    let played = match source.video.play() {
        Ok(p) => JsFuture::from(p).await.map(|_| ()),
        Err(e) => Err(e),
    };
    if let Err(e) = played {
        source.release();
        return Err(TrackingError::CameraUnavailable(js_message(&e)));
    }
    Ok(source)
}

struct Inner {
    window: web::Window,
    document: web::Document,
    config: TrackerConfig,
    tracker: RefCell<HandTracker<MediaPipeDetector>>,
    bridge: RefCell<InputBridge<web::Element>>,
    nav: RefCell<SectionNavigator>,
    input: Rc<RefCell<SharedInput>>,
    hand: RefCell<Option<HandState>>,
    preview: Option<Preview>,
    guide: Guide,
    low_capability: bool,
    reduced_motion: Cell<bool>,
    raf_id: Cell<Option<i32>>,
    tick: RefCell<Option<Closure<dyn FnMut(f64)>>>,
}

/// Owns the tracking session and everything that reacts to it.
#[derive(Clone)]
pub struct TrackingController {
    inner: Rc<Inner>,
}

impl TrackingController {
    pub fn new(
        window: web::Window,
        document: web::Document,
        input: Rc<RefCell<SharedInput>>,
        config: TrackerConfig,
        low_capability: bool,
        reduced_motion: bool,
    ) -> Self {
        let inner = Rc::new(Inner {
            preview: Preview::find(&document),
            tracker: RefCell::new(HandTracker::new(&config.gesture)),
            bridge: RefCell::new(InputBridge::new()),
            nav: RefCell::new(SectionNavigator::new(config.navigation.clone())),
            window,
            document,
            config,
            input,
            hand: RefCell::new(None),
            guide: Guide::default(),
            low_capability,
            reduced_motion: Cell::new(reduced_motion),
            raf_id: Cell::new(None),
            tick: RefCell::new(None),
        });
        let weak: Weak<Inner> = Rc::downgrade(&inner);
        *inner.tick.borrow_mut() = Some(Closure::wrap(Box::new(move |ts: f64| {
            if let Some(inner) = weak.upgrade() {
                TrackingController { inner }.on_tick(ts);
            }
        }) as Box<dyn FnMut(f64)>));

        let controller = Self { inner };
        controller.render_ui();
        controller
    }

    pub fn wire_controls(&self) {
        let this = self.clone();
        dom::add_click_listener(&self.inner.document, overlay::TOGGLE_ID, move || this.toggle());
        let this = self.clone();
        dom::add_click_listener(&self.inner.document, overlay::GUIDE_DISMISS_ID, move || {
            this.inner.guide.hide(&this.inner.window, &this.inner.document)
        });
    }

    pub fn toggle(&self) {
        let phase = self.inner.tracker.borrow().phase();
        match phase {
            Phase::Idle => self.start(),
            Phase::Starting | Phase::Running => self.stop(),
        }
    }

    pub fn start(&self) {
        if self.inner.reduced_motion.get() || self.inner.low_capability {
            log::debug!("[tracking] start ignored on this device");
            return;
        }
        let Some(ticket) = self.inner.tracker.borrow_mut().begin_start() else {
            return;
        };
        self.render_ui();
        let this = self.clone();
        spawn_local(async move { this.acquire(ticket).await });
    }

    async fn acquire(&self, ticket: StartTicket) {
        let cfg = &self.inner.config;
        let mut detector =
            match create_hand_landmarker(&cfg.wasm_root, &cfg.model_asset_path, &cfg.delegate)
                .await
            {
                Ok(handle) => MediaPipeDetector::new(handle),
                Err(e) => {
                    self.finish(ticket, Err(TrackingError::ModelLoad(js_message(&e))));
                    return;
                }
            };
        // stopped while the model was loading: do not open the camera at all
        if !self.inner.tracker.borrow().is_current(ticket) {
            detector.close();
            self.finish(ticket, Err(TrackingError::Cancelled));
            return;
        }
        let acquired = match open_camera(&self.inner.document, cfg).await {
            Ok(source) => Ok((source, detector)),
            Err(e) => {
                detector.close();
                Err(e)
            }
        };
        self.finish(ticket, acquired);
    }

    fn finish(
        &self,
        ticket: StartTicket,
        acquired: Result<(VideoSource, MediaPipeDetector), TrackingError>,
    ) {
        let result = self.inner.tracker.borrow_mut().finish_start(ticket, acquired);
        match result {
            Ok(()) => {
                *self.inner.hand.borrow_mut() = None;
                self.inner.guide.show(&self.inner.window, &self.inner.document);
                self.schedule();
            }
            Err(TrackingError::Cancelled) => log::debug!("[tracking] start superseded"),
            Err(e) => log::error!("[tracking] hand tracking failed: {}", e),
        }
        self.render_ui();
    }

    /// Synchronous teardown: the pending detection frame is cancelled before
    /// the camera and model are released.
    pub fn stop(&self) {
        let inner = &self.inner;
        if let Some(id) = inner.raf_id.take() {
            let _ = inner.window.cancel_animation_frame(id);
        }
        inner.tracker.borrow_mut().stop();
        inner.bridge.borrow_mut().reset();
        inner.nav.borrow_mut().reset();
        *inner.hand.borrow_mut() = None;
        inner.input.borrow_mut().pointer_mode = PointerMode::Attract;
        inner.guide.hide(&inner.window, &inner.document);
        self.render_ui();
    }

    pub fn set_reduced_motion(&self, reduced: bool) {
        self.inner.reduced_motion.set(reduced);
        if reduced {
            self.stop();
        } else {
            self.render_ui();
        }
    }

    fn schedule(&self) {
        let inner = &self.inner;
        if inner.raf_id.get().is_some() {
            return;
        }
        let id = match inner.tick.borrow().as_ref() {
            Some(cb) => inner
                .window
                .request_animation_frame(cb.as_ref().unchecked_ref())
                .ok(),
            None => None,
        };
        inner.raf_id.set(id);
    }

    fn is_running(&self) -> bool {
        self.inner.tracker.borrow().phase() == Phase::Running
    }

    fn on_tick(&self, timestamp_ms: f64) {
        self.inner.raf_id.set(None);
        if !self.is_running() {
            return;
        }
        let (w, h) = dom::viewport_size(&self.inner.window);
        let state = self
            .inner
            .tracker
            .borrow_mut()
            .tick(timestamp_ms, Vec2::new(w as f32, h as f32));
        if let Some(state) = state {
            self.on_hand(state);
        }
        // a synthetic click may have turned tracking off
        if self.is_running() {
            self.schedule();
        }
    }

    fn on_hand(&self, state: HandState) {
        let inner = &self.inner;
        inner.input.borrow_mut().pointer_mode = if state.detected && state.is_open_palm {
            PointerMode::Repel
        } else {
            PointerMode::Attract
        };

        let events = {
            let doc = &inner.document;
            inner
                .bridge
                .borrow_mut()
                .process(&state, |x, y| doc.element_from_point(x, y))
        };
        dispatch::dispatch_pointer_events(&inner.window, &events);
        if !self.is_running() {
            return;
        }

        let sections = &inner.config.navigation.sections;
        let cmd = inner.nav.borrow_mut().update(&state, Instant::now(), || {
            dom::section_layout(&inner.window, &inner.document, sections)
        });
        if let Some(cmd) = cmd {
            dispatch::scroll_to_section(&inner.document, &cmd);
        }

        if let Some(preview) = &inner.preview {
            if let Some(source) = inner.tracker.borrow().source() {
                preview.draw(&source.video, state.landmarks.as_deref());
            }
        }
        *inner.hand.borrow_mut() = Some(state);
        self.render_cursor();
    }

    fn render_cursor(&self) {
        let status = self.inner.tracker.borrow().status();
        let hand = self.inner.hand.borrow();
        overlay::render_cursor(&self.inner.document, cursor_ring(status, hand.as_ref()));
    }

    fn render_ui(&self) {
        let inner = &self.inner;
        let status = inner.tracker.borrow().status();
        let visible = toggle_visible(inner.low_capability, inner.reduced_motion.get());
        overlay::render_toggle(&inner.document, status, visible);
        if let Some(preview) = &inner.preview {
            preview.set_visible(status.tracking);
        }
        self.render_cursor();
    }
}
