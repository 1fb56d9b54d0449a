//! The design philosophy underlying `tricolor` is pedagogical, yet faithful to the protocol.
//! Each module isolates one step of a commit-and-reveal argument over graph colorings,
//! illustrating how small primitives compose into a signature scheme.
//! Deterministic random source for reproducible signing.
//!
//! Every randomized step of the scheme (palette relabeling, commitment keys,
//! edge coin flips during generation) draws from an injected
//! [`rand::RngCore`] + [`rand::CryptoRng`].  Production callers pass an
//! operating-system backed generator; tests and the CLI's `--seed` flag pass a
//! [`SeededRng`], a counter-mode stream over domain-separated BLAKE2b-256
//! blocks.  Each output chunk is `H(domain || seed || counter)`, so the stream
//! cannot be rewound from observed output without the seed.

use blake2::digest::{consts::U32, Digest};
use rand::{CryptoRng, RngCore, SeedableRng};

type Blake2b256 = blake2::Blake2b<U32>;

const SEED_DOMAIN: &[u8] = b"TRICOLOR_SEED";
const STREAM_DOMAIN: &[u8] = b"TRICOLOR_STREAM";

/// A deterministic stream generator derived from BLAKE2b-256.
#[derive(Debug, Clone)]
pub struct SeededRng {
    seed: [u8; 32],
    counter: u64,
    buffer: [u8; 32],
    offset: usize,
}

impl SeededRng {
    /// Creates a generator from a short integer seed.
    pub fn new(seed: u64) -> Self {
        let mut hasher = Blake2b256::new();
        hasher.update(SEED_DOMAIN);
        hasher.update(seed.to_be_bytes());
        let mut base = [0u8; 32];
        base.copy_from_slice(&hasher.finalize());
        Self::from_seed_bytes(base)
    }

    /// Creates a generator from a raw 32-byte seed.
    pub fn from_seed_bytes(seed: [u8; 32]) -> Self {
        Self {
            seed,
            counter: 0,
            buffer: [0u8; 32],
            offset: 32,
        }
    }

    fn refill(&mut self) {
        let mut hasher = Blake2b256::new();
        hasher.update(STREAM_DOMAIN);
        hasher.update(self.seed);
        hasher.update(self.counter.to_be_bytes());
        self.buffer.copy_from_slice(&hasher.finalize());
        self.counter = self.counter.wrapping_add(1);
        self.offset = 0;
    }

    fn next_word(&mut self) -> u64 {
        if self.offset >= self.buffer.len() {
            self.refill();
        }
        let mut chunk = [0u8; 8];
        chunk.copy_from_slice(&self.buffer[self.offset..self.offset + 8]);
        self.offset += 8;
        u64::from_be_bytes(chunk)
    }
}

impl RngCore for SeededRng {
    fn next_u32(&mut self) -> u32 {
        (self.next_word() >> 32) as u32
    }

    fn next_u64(&mut self) -> u64 {
        self.next_word()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(8) {
            let word = self.next_word().to_be_bytes();
            chunk.copy_from_slice(&word[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl SeedableRng for SeededRng {
    type Seed = [u8; 32];

    fn from_seed(seed: Self::Seed) -> Self {
        Self::from_seed_bytes(seed)
    }
}

// Output blocks are BLAKE2b-256 of (domain, seed, counter).
impl CryptoRng for SeededRng {}
