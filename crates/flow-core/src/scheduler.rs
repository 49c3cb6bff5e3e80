//! Frame-level driver for the particle flow.
//!
//! [`FlowField::frame`] is the body of the per-refresh callback with the
//! platform removed: it takes the latest input sample, advances internal
//! state, and hands back what to paint. The front-end owns the actual
//! scheduling and the drawing surface.

use crate::capability::Capability;
use crate::environment::{FlowEnvironment, FlowParams, FrameParams, InputSample, ScrollSmoother};
use crate::particles::{ParticleSystem, Segment};

/// Everything the surface needs to paint one frame, in order: the trail
/// fade fill first, then the segments.
#[derive(Clone, Debug, Default)]
pub struct FrameOutput {
    pub trail_fade: f32,
    pub segments: Vec<Segment>,
    pub frame: FrameParams,
}

pub struct FlowField {
    params: FlowParams,
    capability: Capability,
    reduced_motion: bool,
    width: f32,
    height: f32,
    seed: u64,
    generation: u64,
    pool: Option<ParticleSystem>,
    smoother: ScrollSmoother,
    time: f32,
    segments: Vec<Segment>,
}

impl FlowField {
    pub fn new(params: FlowParams, capability: Capability, reduced_motion: bool, seed: u64) -> Self {
        Self {
            params,
            capability,
            reduced_motion,
            width: 0.0,
            height: 0.0,
            seed,
            generation: 0,
            pool: None,
            smoother: ScrollSmoother::default(),
            time: 0.0,
            segments: Vec::new(),
        }
    }

    /// Target pool size for the current tier; zero under reduced motion.
    pub fn particle_count(&self) -> usize {
        if self.reduced_motion {
            0
        } else {
            self.capability.particle_count(&self.params)
        }
    }

    pub fn is_active(&self) -> bool {
        self.pool.as_ref().map(|p| !p.is_empty()).unwrap_or(false)
    }

    pub fn pool(&self) -> Option<&ParticleSystem> {
        self.pool.as_ref()
    }

    pub fn capability(&self) -> Capability {
        self.capability
    }

    pub fn reduced_motion(&self) -> bool {
        self.reduced_motion
    }

    pub fn elapsed_time(&self) -> f32 {
        self.time
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.width = width.max(0.0);
        self.height = height.max(0.0);
        self.rebuild();
    }

    pub fn set_reduced_motion(&mut self, reduced: bool) {
        if self.reduced_motion != reduced {
            self.reduced_motion = reduced;
            self.rebuild();
        }
    }

    pub fn set_capability(&mut self, capability: Capability) {
        if self.capability != capability {
            self.capability = capability;
            self.rebuild();
        }
    }

    // Whole-pool rebuild; there is no partially resized state.
    fn rebuild(&mut self) {
        let count = self.particle_count();
        self.smoother.reset();
        if count == 0 || self.width <= 0.0 || self.height <= 0.0 {
            if self.pool.take().is_some() {
                log::info!("[flow] stopped (reduced_motion={})", self.reduced_motion);
            }
            return;
        }
        self.generation = self.generation.wrapping_add(1);
        let seed = self.seed ^ self.generation.wrapping_mul(0x9E37_79B9_7F4A_7C15);
        self.pool = Some(ParticleSystem::new(
            count,
            self.width,
            self.height,
            self.params.clone(),
            seed,
        ));
        log::info!(
            "[flow] pool={} tier={} viewport={:.0}x{:.0}",
            count,
            self.capability.as_str(),
            self.width,
            self.height
        );
    }

    /// Sample the environment, step the pool, and return the paint list.
    /// `None` means the effect is stopped and the loop should not reschedule.
    pub fn frame(&mut self, input: &InputSample) -> Option<FrameOutput> {
        let pool = self.pool.as_mut()?;
        let env = FlowEnvironment::sample(input, &mut self.smoother, self.time, &self.params);
        let frame = FrameParams::derive(&env, &self.params);
        self.time += frame.time_step;

        self.segments.clear();
        let env = FlowEnvironment {
            elapsed_time: self.time,
            ..env
        };
        pool.step(&frame, &env, &mut self.segments);

        Some(FrameOutput {
            trail_fade: frame.trail_fade,
            segments: std::mem::take(&mut self.segments),
            frame,
        })
    }

    /// Hand a drained segment buffer back so the next frame reuses its allocation.
    pub fn recycle(&mut self, mut segments: Vec<Segment>) {
        segments.clear();
        if segments.capacity() > self.segments.capacity() {
            self.segments = segments;
        }
    }
}
