/// Deterministic pseudo-random source for scramble draws.
///
/// Every random decision in the engine (per-task start/end frames, glyph picks,
/// churn re-rolls) goes through one `Rng64`, so a fixed seed replays the exact
/// same animation frame-for-frame.
#[derive(Clone, Copy, Debug)]
pub struct Rng64 {
    state: u64,
}

impl Rng64 {
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    pub fn next_u64(&mut self) -> u64 {
        // SplitMix64
        self.state = self.state.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    pub fn next_f64_01(&mut self) -> f64 {
        // 53 bits of precision.
        let v = self.next_u64() >> 11;
        (v as f64) * (1.0 / ((1u64 << 53) as f64))
    }

    /// Uniform draw in `[0, max)`. Returns 0 when `max` is 0.
    pub fn next_below(&mut self, max: u64) -> u64 {
        (self.next_f64_01() * max as f64) as u64
    }
}
