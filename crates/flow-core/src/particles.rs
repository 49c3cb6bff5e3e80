use crate::constants::{
    ACCENT_ALPHA_BASE, ACCENT_RGB, ACCENT_WIDTH_BASE, ACCENT_WIDTH_SPAN, NEUTRAL_ALPHA_BASE,
    NEUTRAL_ALPHA_SPAN, NEUTRAL_GREY_MIN, NEUTRAL_GREY_SPAN, NEUTRAL_WIDTH_BASE,
    NEUTRAL_WIDTH_SPAN,
};
use crate::environment::{FlowEnvironment, FlowParams, FrameParams, PointerMode};
use crate::noise::NoiseField;
use glam::Vec2;
use rand::prelude::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tint {
    Neutral,
    Accent,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    pub pos: Vec2,
    pub prev: Vec2,
    pub speed: f32,
    /// Frames lived so far.
    pub life: f32,
    pub max_life: f32,
    pub tint: Tint,
    pub alpha: f32,
}

/// Straight RGBA colour; alpha in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    pub fn css(&self) -> String {
        format!("rgba({}, {}, {}, {:.3})", self.r, self.g, self.b, self.a)
    }
}

/// One line to stroke this frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment {
    pub from: Vec2,
    pub to: Vec2,
    pub color: Rgba,
    pub width: f32,
}

/// Fade-in over the first `fade` share of life, hold, fade-out over the last.
#[inline]
pub fn life_alpha(life: f32, max_life: f32, fade: f32) -> f32 {
    let frac = life / max_life;
    let a = if frac < fade {
        frac / fade
    } else if frac > 1.0 - fade {
        (1.0 - frac) / fade
    } else {
        1.0
    };
    a.clamp(0.0, 1.0)
}

/// Fixed-capacity particle pool. Slots are reused in place; the pool never
/// grows or shrinks after construction.
pub struct ParticleSystem {
    particles: Vec<Particle>,
    width: f32,
    height: f32,
    noise: NoiseField,
    params: FlowParams,
    rng: StdRng,
}

impl ParticleSystem {
    pub fn new(count: usize, width: f32, height: f32, params: FlowParams, seed: u64) -> Self {
        let mut sys = Self {
            particles: Vec::with_capacity(count),
            width,
            height,
            noise: NoiseField::default(),
            params,
            rng: StdRng::seed_from_u64(seed),
        };
        for _ in 0..count {
            let p = sys.spawn();
            sys.particles.push(p);
        }
        sys
    }

    pub fn with_noise(mut self, noise: NoiseField) -> Self {
        self.noise = noise;
        self
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn size(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    fn spawn(&mut self) -> Particle {
        let p = &self.params;
        let pos = Vec2::new(
            self.rng.gen::<f32>() * self.width,
            self.rng.gen::<f32>() * self.height,
        );
        let max_life = p.life_min + self.rng.gen::<f32>() * p.life_span;
        let speed = p.speed_min + self.rng.gen::<f32>() * p.speed_span;
        // staggered start so the whole pool does not fade in on the same frame
        let life = self.rng.gen::<f32>() * max_life;
        let tint = if self.rng.gen::<f32>() < p.accent_probability {
            Tint::Accent
        } else {
            Tint::Neutral
        };
        Particle {
            pos,
            prev: pos,
            speed,
            life,
            max_life,
            tint,
            alpha: 0.0,
        }
    }

    /// Advance every particle one frame and append the segments to draw.
    pub fn step(&mut self, frame: &FrameParams, env: &FlowEnvironment, out: &mut Vec<Segment>) {
        let (w, h) = (self.width, self.height);
        let energy = frame.scroll_energy;
        let fade = self.params.fade_fraction;
        let radius = self.params.pointer_radius;
        let gain = self.params.pointer_gain;
        let push = if energy > self.params.scroll_push_min_energy {
            energy * self.params.scroll_push_gain
        } else {
            0.0
        };

        for i in 0..self.particles.len() {
            {
                let p = &mut self.particles[i];
                p.life += 1.0;
                p.alpha = life_alpha(p.life, p.max_life, fade);
            }
            if self.particles[i].life >= self.particles[i].max_life {
                let fresh = self.spawn();
                self.particles[i] = fresh;
                continue;
            }

            let p = &mut self.particles[i];
            p.prev = p.pos;
            let flow = self.noise.curl(
                p.pos.x * frame.noise_scale,
                p.pos.y * frame.noise_scale,
                env.elapsed_time,
            );
            let mut v = flow * p.speed * frame.speed_multiplier;
            v.y += push;

            if let Some(pointer) = env.pointer {
                let d = pointer - p.pos;
                let dist = d.length();
                if dist > 0.0 && dist < radius {
                    let force = (radius - dist) / radius;
                    let pull = force * force * gain;
                    let dir = d / dist;
                    v += match env.pointer_mode {
                        PointerMode::Attract => dir * pull,
                        PointerMode::Repel => -dir * pull,
                    };
                }
            }

            p.pos += v;

            // toroidal wrap
            if p.pos.x < 0.0 {
                p.pos.x = w;
            }
            if p.pos.x > w {
                p.pos.x = 0.0;
            }
            if p.pos.y < 0.0 {
                p.pos.y = h;
            }
            if p.pos.y > h {
                p.pos.y = 0.0;
            }

            // a wrap jump would streak across the whole viewport
            if (p.pos.x - p.prev.x).abs() > w * 0.5 || (p.pos.y - p.prev.y).abs() > h * 0.5 {
                continue;
            }

            let (color, width) = match p.tint {
                Tint::Accent => (
                    Rgba {
                        r: ACCENT_RGB[0],
                        g: ACCENT_RGB[1],
                        b: ACCENT_RGB[2],
                        a: (p.alpha * (ACCENT_ALPHA_BASE + frame.accent_boost)).clamp(0.0, 1.0),
                    },
                    ACCENT_WIDTH_BASE + energy * ACCENT_WIDTH_SPAN,
                ),
                Tint::Neutral => {
                    let grey = NEUTRAL_GREY_MIN + self.rng.gen_range(0..NEUTRAL_GREY_SPAN);
                    (
                        Rgba {
                            r: grey,
                            g: grey,
                            b: grey,
                            a: (p.alpha * (NEUTRAL_ALPHA_BASE + energy * NEUTRAL_ALPHA_SPAN))
                                .clamp(0.0, 1.0),
                        },
                        NEUTRAL_WIDTH_BASE + energy * NEUTRAL_WIDTH_SPAN,
                    )
                }
            };
            out.push(Segment {
                from: p.prev,
                to: p.pos,
                color,
                width,
            });
        }
    }
}
