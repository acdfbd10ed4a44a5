//! Xorshift32 pseudo-random source.
//!
//! Small, fast and fully reproducible from its seed. The state is owned by
//! the caller so independent generators never interfere.

/// Xorshift32 generator state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Xorshift32 {
    state: u32,
}

impl Default for Xorshift32 {
    fn default() -> Self {
        Self::new(1)
    }
}

impl Xorshift32 {
    /// Creates a generator. Zero is a fixed point of xorshift, so a zero
    /// seed is replaced by 1.
    pub const fn new(seed: u32) -> Self {
        Self {
            state: if seed == 0 { 1 } else { seed },
        }
    }

    /// Advances the state and returns it.
    pub fn next_u32(&mut self) -> u32 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 5;
        self.state = x;
        x
    }

    /// Returns a value in `0..n` (modulo reduction). `n` must be non-zero.
    pub fn below(&mut self, n: u32) -> u32 {
        self.next_u32() % n
    }
}
