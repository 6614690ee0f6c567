//! Seeded pseudo-random number generator
//!
//! The engine never reads OS entropy: every source of randomness is a
//! stream derived from the tournament seed, so a run seeded identically
//! replays identically. xorshift64* with a splitmix-style seed mix.

/// Deterministic RNG: same (seed, stream) gives the same sequence.
#[derive(Clone, Debug)]
pub struct SeededRng {
    state: u64,
}

impl SeededRng {
    /// Create a generator for an independent stream of the given seed.
    ///
    /// Streams with different ids are decorrelated even for weak seeds
    /// (0, 1, ...) thanks to the finalizer below.
    pub fn new(seed: u64, stream: u64) -> Self {
        let mut z = seed ^ stream.wrapping_mul(0x9e37_79b9_7f4a_7c15);
        z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
        z ^= z >> 31;
        // xorshift state must never be zero
        Self { state: z | 1 }
    }

    pub fn next_u64(&mut self) -> u64 {
        self.state ^= self.state >> 12;
        self.state ^= self.state << 25;
        self.state ^= self.state >> 27;
        self.state.wrapping_mul(0x2545_f491_4f6c_dd1d)
    }

    /// Uniform value in [0, 100), for percentage checks.
    pub fn next_percent(&mut self) -> u8 {
        ((self.next_u64() >> 33) % 100) as u8
    }

    /// Uniform coin flip.
    pub fn next_bool(&mut self) -> bool {
        self.next_u64() >> 63 == 1
    }
}
