// Copyright @yucwang 2026

use crate::math::constants::{Float, Vector2f};

/// Small linear congruential generator. Every user owns its own instance;
/// there is no process-wide generator.
#[derive(Debug, Clone)]
pub struct LcgRng {
    state: u64,
}

impl LcgRng {
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    /// Deterministic per-pixel stream derived from a global seed.
    pub fn for_pixel(seed: u64, x: usize, y: usize) -> Self {
        // Odd multiplier keeps the seed map one to one, so every seed bit counts.
        let pixel = ((y as u64) << 32) | ((x as u64) & 0xFFFF_FFFF);
        let mixed = seed.wrapping_mul(0x9E37_79B9_7F4A_7C15) ^ pixel;
        let mut rng = Self::new(mixed);
        rng.next_u32();
        rng
    }

    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        (self.state >> 32) as u32
    }

    /// Uniform sample in `[0, 1)`.
    pub fn uniform_1d(&mut self) -> Float {
        // 24 high bits fit an f32 mantissa exactly, so 1.0 is never produced.
        (self.next_u32() >> 8) as Float * (1.0 / (1u32 << 24) as Float)
    }

    pub fn uniform_2d(&mut self) -> Vector2f {
        let x = self.uniform_1d();
        let y = self.uniform_1d();
        Vector2f::new(x, y)
    }
}
