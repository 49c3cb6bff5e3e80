// Shared tuning constants used by both web and native front-ends.
//
// These are defaults; the `*Params` structs carry the values actually used at
// runtime so a front-end can override any of them.

// Noise
pub const NOISE_SEED: u32 = 42;
pub const CURL_EPSILON: f32 = 0.001;

// Particle spawning
pub const PARTICLE_SPEED_MIN: f32 = 0.15;
pub const PARTICLE_SPEED_SPAN: f32 = 0.35;
pub const PARTICLE_LIFE_MIN: f32 = 200.0; // frames
pub const PARTICLE_LIFE_SPAN: f32 = 400.0; // frames
pub const ACCENT_PROBABILITY: f32 = 0.12;
pub const FADE_FRACTION: f32 = 0.1; // share of life spent fading in, and again fading out

// Pool sizes per capability tier
pub const PARTICLES_HIGH: usize = 2500;
pub const PARTICLES_MEDIUM: usize = 1200;
pub const PARTICLES_LOW: usize = 500;

// Scroll coupling
pub const SCROLL_SMOOTHING: f32 = 0.08; // new = old + α*(raw - old)
pub const SCROLL_ENERGY_DIVISOR: f32 = 40.0; // px/event that counts as full energy
pub const TRAIL_FADE_BASE: f32 = 0.04;
pub const TRAIL_FADE_SPAN: f32 = 0.06;
pub const NOISE_SCALE_BASE: f32 = 0.002;
pub const NOISE_SCALE_SPAN: f32 = 0.001;
pub const TIME_STEP_BASE: f32 = 0.0003;
pub const TIME_STEP_SPAN: f32 = 0.002;
pub const SPEED_MULT_SPAN: f32 = 1.2;
pub const ACCENT_BOOST_SPAN: f32 = 0.4;
pub const SCROLL_PUSH_MIN_ENERGY: f32 = 0.05;
pub const SCROLL_PUSH_GAIN: f32 = 1.5;

// Pointer attraction
pub const POINTER_RADIUS: f32 = 350.0; // CSS px
pub const POINTER_GAIN: f32 = 2.0;

// Stroke styling
pub const ACCENT_RGB: [u8; 3] = [230, 57, 70];
pub const ACCENT_ALPHA_BASE: f32 = 0.7;
pub const ACCENT_WIDTH_BASE: f32 = 1.5;
pub const ACCENT_WIDTH_SPAN: f32 = 0.8;
pub const NEUTRAL_GREY_MIN: u8 = 180;
pub const NEUTRAL_GREY_SPAN: u8 = 50;
pub const NEUTRAL_ALPHA_BASE: f32 = 0.3;
pub const NEUTRAL_ALPHA_SPAN: f32 = 0.15;
pub const NEUTRAL_WIDTH_BASE: f32 = 0.8;
pub const NEUTRAL_WIDTH_SPAN: f32 = 0.4;
pub const BACKGROUND_RGB: [u8; 3] = [10, 10, 10];
pub const MAX_DEVICE_PIXEL_RATIO: f64 = 2.0;

// Canvas context kinds probed for GPU support, newest first
pub const WEBGL_CONTEXT_KINDS: [&str; 3] = ["webgl2", "webgl", "experimental-webgl"];

// Hand landmarks (MediaPipe hand topology)
pub const LANDMARK_COUNT: usize = 21;
pub const WRIST: usize = 0;
pub const THUMB_TIP: usize = 4;
pub const INDEX_TIP: usize = 8;
pub const FINGERTIPS: [usize; 5] = [4, 8, 12, 16, 20];
pub const FINGER_BASES: [usize; 5] = [2, 5, 9, 13, 17];

// Gesture thresholds (normalized landmark units)
pub const PINCH_ON: f32 = 0.045;
pub const PINCH_OFF: f32 = 0.065;
pub const WRIST_HISTORY: usize = 8;

// Section navigation
pub const SWIPE_THRESHOLD: f32 = 0.012; // normalized wrist velocity per frame
pub const SWIPE_COOLDOWN_MS: u64 = 1000;
pub const SECTION_IDS: [&str; 5] = ["intro", "work", "code", "about", "contact"];

// Synthetic pointer coordinates used when the hand leaves the frame
pub const OFFSCREEN: f32 = -1000.0;

// Virtual cursor ring (CSS px)
pub const RING_PINCH: f32 = 20.0;
pub const RING_OPEN_PALM: f32 = 48.0;
pub const RING_IDLE: f32 = 32.0;

// UI timing
pub const GUIDE_VISIBLE_MS: u32 = 6000;
pub const POEM_IDLE_DELAY_MS: i32 = 2500;

// Camera preview
pub const PREVIEW_WIDTH: u32 = 160;
pub const PREVIEW_HEIGHT: u32 = 120;
pub const PREVIEW_DOT_RADIUS: f64 = 2.0;
