//! 2D simplex noise and the curl field derived from it.
//!
//! The permutation table is built once from a seed and never touched again,
//! so every sample is a pure function of its inputs. Particles sample the
//! curl at `(x * scale, y * scale, t)` each frame.

use crate::constants::{CURL_EPSILON, NOISE_SEED};
use glam::Vec2;

const GRAD2: [[f32; 2]; 8] = [
    [1.0, 1.0],
    [-1.0, 1.0],
    [1.0, -1.0],
    [-1.0, -1.0],
    [1.0, 0.0],
    [-1.0, 0.0],
    [0.0, 1.0],
    [0.0, -1.0],
];

// Skew/unskew factors for the 2D simplex lattice
const F2: f32 = 0.366_025_42; // 0.5 * (sqrt(3) - 1)
const G2: f32 = 0.211_324_87; // (3 - sqrt(3)) / 6

#[derive(Clone)]
pub struct NoiseField {
    perm: [u8; 512],
    grad: [u8; 512],
    epsilon: f32,
}

impl Default for NoiseField {
    fn default() -> Self {
        Self::new(NOISE_SEED)
    }
}

impl std::fmt::Debug for NoiseField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NoiseField")
            .field("perm_head", &&self.perm[..8])
            .field("epsilon", &self.epsilon)
            .finish()
    }
}

impl NoiseField {
    pub fn new(seed: u32) -> Self {
        let mut s = seed;
        if s < 256 {
            s |= s << 8;
        }
        let lo = (s & 255) as u8;
        let hi = ((s >> 8) & 255) as u8;

        let mut base = [0u8; 256];
        for (i, slot) in base.iter_mut().enumerate() {
            let key = if i & 1 == 1 { hi } else { lo };
            let v = (i as u8) ^ key;
            // one Galois LFSR step; bijective on u8 because the tap mask has its top bit set
            *slot = (v >> 1) ^ if v & 1 == 1 { 0xB8 } else { 0 };
        }

        let mut perm = [0u8; 512];
        let mut grad = [0u8; 512];
        for i in 0..512 {
            perm[i] = base[i & 255];
            grad[i] = perm[i] % 8;
        }
        Self {
            perm,
            grad,
            epsilon: CURL_EPSILON,
        }
    }

    pub fn with_epsilon(mut self, epsilon: f32) -> Self {
        self.epsilon = epsilon;
        self
    }

    #[inline]
    fn corner(&self, gi: usize, x: f32, y: f32) -> f32 {
        let mut t = 0.5 - x * x - y * y;
        if t < 0.0 {
            return 0.0;
        }
        let g = GRAD2[self.grad[gi] as usize];
        t *= t;
        t * t * (g[0] * x + g[1] * y)
    }

    /// Simplex noise at `(x, y)`, roughly in `[-1, 1]`.
    pub fn sample(&self, x: f32, y: f32) -> f32 {
        let s = (x + y) * F2;
        let i = (x + s).floor();
        let j = (y + s).floor();

        let t = (i + j) * G2;
        let x0 = x - (i - t);
        let y0 = y - (j - t);

        // Which of the two triangles of the skewed cell we are in
        let (i1, j1) = if x0 > y0 { (1usize, 0usize) } else { (0, 1) };

        let x1 = x0 - i1 as f32 + G2;
        let y1 = y0 - j1 as f32 + G2;
        let x2 = x0 - 1.0 + 2.0 * G2;
        let y2 = y0 - 1.0 + 2.0 * G2;

        let ii = (i as i64 & 255) as usize;
        let jj = (j as i64 & 255) as usize;

        let n0 = self.corner(ii + self.perm[jj] as usize, x0, y0);
        let n1 = self.corner(ii + i1 + self.perm[jj + j1] as usize, x1, y1);
        let n2 = self.corner(ii + 1 + self.perm[jj + 1] as usize, x2, y2);

        70.0 * (n0 + n1 + n2)
    }

    /// Curl of the noise field: the gradient rotated a quarter turn.
    ///
    /// Time shifts the sampling window along y, so the field drifts rather
    /// than morphs.
    pub fn curl(&self, x: f32, y: f32, time: f32) -> Vec2 {
        let e = self.epsilon;
        let dn_dy = (self.sample(x, y + e + time) - self.sample(x, y - e + time)) / (2.0 * e);
        let dn_dx = (self.sample(x + e, y + time) - self.sample(x - e, y + time)) / (2.0 * e);
        Vec2::new(dn_dy, -dn_dx)
    }
}
