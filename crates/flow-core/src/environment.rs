//! Per-frame flow environment and the scalars derived from it.
//!
//! Raw signals (pointer, scroll) arrive from listeners at any rate; once per
//! frame they are folded into a [`FlowEnvironment`], and from that into the
//! [`FrameParams`] the particle step actually uses.

use crate::constants::*;
use glam::Vec2;

/// Tunable coefficients for the particle flow. Defaults come from `constants`.
#[derive(Clone, Debug, PartialEq)]
pub struct FlowParams {
    pub speed_min: f32,
    pub speed_span: f32,
    pub life_min: f32,
    pub life_span: f32,
    pub accent_probability: f32,
    pub fade_fraction: f32,

    pub scroll_smoothing: f32,
    pub scroll_energy_divisor: f32,
    pub trail_fade_base: f32,
    pub trail_fade_span: f32,
    pub noise_scale_base: f32,
    pub noise_scale_span: f32,
    pub time_step_base: f32,
    pub time_step_span: f32,
    pub speed_mult_span: f32,
    pub accent_boost_span: f32,
    pub scroll_push_min_energy: f32,
    pub scroll_push_gain: f32,

    pub pointer_radius: f32,
    pub pointer_gain: f32,

    pub pool_high: usize,
    pub pool_medium: usize,
    pub pool_low: usize,
}

impl Default for FlowParams {
    fn default() -> Self {
        Self {
            speed_min: PARTICLE_SPEED_MIN,
            speed_span: PARTICLE_SPEED_SPAN,
            life_min: PARTICLE_LIFE_MIN,
            life_span: PARTICLE_LIFE_SPAN,
            accent_probability: ACCENT_PROBABILITY,
            fade_fraction: FADE_FRACTION,
            scroll_smoothing: SCROLL_SMOOTHING,
            scroll_energy_divisor: SCROLL_ENERGY_DIVISOR,
            trail_fade_base: TRAIL_FADE_BASE,
            trail_fade_span: TRAIL_FADE_SPAN,
            noise_scale_base: NOISE_SCALE_BASE,
            noise_scale_span: NOISE_SCALE_SPAN,
            time_step_base: TIME_STEP_BASE,
            time_step_span: TIME_STEP_SPAN,
            speed_mult_span: SPEED_MULT_SPAN,
            accent_boost_span: ACCENT_BOOST_SPAN,
            scroll_push_min_energy: SCROLL_PUSH_MIN_ENERGY,
            scroll_push_gain: SCROLL_PUSH_GAIN,
            pointer_radius: POINTER_RADIUS,
            pointer_gain: POINTER_GAIN,
            pool_high: PARTICLES_HIGH,
            pool_medium: PARTICLES_MEDIUM,
            pool_low: PARTICLES_LOW,
        }
    }
}

/// Whether the pointer pulls particles in or scatters them.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PointerMode {
    #[default]
    Attract,
    Repel,
}

/// Raw input as last written by the listeners.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct InputSample {
    pub pointer: Option<Vec2>,
    pub pointer_mode: PointerMode,
    /// Scroll position as a fraction of the scrollable height.
    pub scroll_progress: f32,
    /// Absolute scroll delta of the most recent scroll event, in px.
    pub scroll_velocity: f32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FlowEnvironment {
    pub pointer: Option<Vec2>,
    pub pointer_mode: PointerMode,
    pub scroll_progress: f32,
    pub scroll_velocity: f32,
    pub smoothed_scroll_velocity: f32,
    pub elapsed_time: f32,
}

/// Exponential moving average of scroll velocity; the only cross-frame
/// history the environment keeps.
#[derive(Clone, Copy, Debug, Default)]
pub struct ScrollSmoother {
    value: f32,
}

impl ScrollSmoother {
    pub fn update(&mut self, raw: f32, alpha: f32) -> f32 {
        self.value += (raw - self.value) * alpha;
        self.value
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn reset(&mut self) {
        self.value = 0.0;
    }
}

impl FlowEnvironment {
    pub fn sample(
        input: &InputSample,
        smoother: &mut ScrollSmoother,
        elapsed_time: f32,
        params: &FlowParams,
    ) -> Self {
        let smoothed = smoother.update(input.scroll_velocity, params.scroll_smoothing);
        Self {
            pointer: input.pointer,
            pointer_mode: input.pointer_mode,
            scroll_progress: input.scroll_progress.clamp(0.0, 1.0),
            scroll_velocity: input.scroll_velocity,
            smoothed_scroll_velocity: smoothed,
            elapsed_time,
        }
    }
}

/// Scalars every particle shares for one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameParams {
    /// Smoothed scroll velocity normalised to `[0, 1]`.
    pub scroll_energy: f32,
    pub trail_fade: f32,
    pub noise_scale: f32,
    pub time_step: f32,
    pub speed_multiplier: f32,
    pub accent_boost: f32,
}

impl Default for FrameParams {
    fn default() -> Self {
        FrameParams::derive(&FlowEnvironment::default(), &FlowParams::default())
    }
}

impl FrameParams {
    pub fn derive(env: &FlowEnvironment, params: &FlowParams) -> Self {
        let energy = (env.smoothed_scroll_velocity.max(0.0) / params.scroll_energy_divisor)
            .min(1.0);
        let progress = env.scroll_progress;
        Self {
            scroll_energy: energy,
            trail_fade: params.trail_fade_base + energy * params.trail_fade_span,
            noise_scale: params.noise_scale_base + progress * params.noise_scale_span,
            time_step: params.time_step_base + energy * params.time_step_span,
            speed_multiplier: 1.0 + energy * params.speed_mult_span,
            accent_boost: progress * params.accent_boost_span,
        }
    }
}
