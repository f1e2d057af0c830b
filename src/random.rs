use rand::rngs::ThreadRng;
use rand::Rng;

/// Byte source for the CXNN instruction. Injectable so tests can pin the
/// sequence; the real machine makes no reproducibility promise at all.
pub trait Random {
    fn next_byte(&mut self) -> u8;
}

/// OS-entropy-seeded generator. Runs are deliberately not deterministic.
pub struct ThreadRandom {
    rng: ThreadRng,
}

impl ThreadRandom {
    pub fn new() -> Self {
        ThreadRandom {
            rng: rand::thread_rng(),
        }
    }
}

impl Random for ThreadRandom {
    fn next_byte(&mut self) -> u8 {
        self.rng.gen()
    }
}

/// replays a fixed sequence, for testing
pub struct FixedRandom {
    bytes: Vec<u8>,
    next: usize,
}

impl FixedRandom {
    pub fn new(bytes: &[u8]) -> Self {
        FixedRandom {
            bytes: Vec::from(bytes),
            next: 0,
        }
    }
}

impl Random for FixedRandom {
    fn next_byte(&mut self) -> u8 {
        let b = self.bytes[self.next % self.bytes.len()];
        self.next += 1;
        b
    }
}
