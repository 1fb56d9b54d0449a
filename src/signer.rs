//! The design philosophy underlying `tricolor` is pedagogical, yet faithful to the protocol.
//! Each module isolates one step of a commit-and-reveal argument over graph colorings,
//! illustrating how small primitives compose into a signature scheme.
//! Signing: one relabel-commit-reveal round per challenged edge.
//!
//! For every edge derived from the message the signer
//!
//! 1. draws a fresh palette permutation of its secret coloring,
//! 2. commits to the permuted color of *every* vertex, and
//! 3. reveals the two permuted colors at the challenged edge's endpoints.
//!
//! The commitment tables and the revealed pairs together form the [`Proof`].
//! Because the palette is re-drawn each round, the revealed pairs are two
//! distinct uniformly random colors and say nothing about the canonical
//! coloring.
//!
//! Rounds share nothing but the read-only coloring and challenge list.  Each
//! round gets its own ChaCha-based generator seeded from the caller's source,
//! so rounds run in parallel while a seeded caller still gets a reproducible
//! proof.

use crate::challenge::{derive_challenges, Challenge};
use crate::commitment::CommitmentTable;
use crate::error::Result;
use crate::graph::{Color, ColoredGraph};
use crate::params::SchemeParams;
use rand::rngs::{OsRng, StdRng};
use rand::{CryptoRng, RngCore, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::debug;

#[cfg(not(target_arch = "wasm32"))]
use rayon::prelude::*;

/// Revealed endpoint colors, one pair per challenge round.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Signature {
    /// `(color of u, color of v)` for the round's challenged edge `(u, v)`.
    pub pairs: Vec<(Color, Color)>,
}

impl Signature {
    /// Number of rounds covered.
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Returns `true` if the signature covers no rounds.
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

/// Everything a verifier needs besides the message and the public graph.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Proof {
    /// Revealed colors per round.
    pub signature: Signature,
    /// Commitments to all vertex colors per round, aligned with `signature`.
    pub commitments: Vec<CommitmentTable>,
}

/// Signs messages with a secret colored graph.
#[derive(Debug, Clone)]
pub struct Signer<'a> {
    instance: &'a ColoredGraph,
    params: SchemeParams,
}

impl<'a> Signer<'a> {
    /// Creates a signer over `instance`.
    pub fn new(instance: &'a ColoredGraph, params: SchemeParams) -> Self {
        Self { instance, params }
    }

    /// The parameters in use.
    pub fn params(&self) -> &SchemeParams {
        &self.params
    }

    /// Signs `message`, drawing all randomness from `rng`.
    ///
    /// Fails only when the graph has too few edges to derive challenges.
    pub fn sign_with_rng<R: RngCore + CryptoRng>(&self, rng: &mut R, message: &str) -> Result<Proof> {
        let challenges = derive_challenges(message, self.instance.graph(), &self.params)?;
        let seeds: Vec<[u8; 32]> = challenges
            .iter()
            .map(|_| {
                let mut seed = [0u8; 32];
                rng.fill_bytes(&mut seed);
                seed
            })
            .collect();

        #[cfg(not(target_arch = "wasm32"))]
        let rounds: Vec<((Color, Color), CommitmentTable)> = challenges
            .as_slice()
            .par_iter()
            .zip(seeds.into_par_iter())
            .map(|(challenge, seed)| sign_round(self.instance, challenge, seed))
            .collect();
        #[cfg(target_arch = "wasm32")]
        let rounds: Vec<((Color, Color), CommitmentTable)> = challenges
            .iter()
            .zip(seeds)
            .map(|(challenge, seed)| sign_round(self.instance, challenge, seed))
            .collect();

        let (pairs, commitments): (Vec<_>, Vec<_>) = rounds.into_iter().unzip();
        debug!(
            rounds = pairs.len(),
            vertices = self.instance.graph().vertex_count(),
            "signed message"
        );
        Ok(Proof {
            signature: Signature { pairs },
            commitments,
        })
    }

    /// Signs `message` with operating-system randomness.
    pub fn sign(&self, message: &str) -> Result<Proof> {
        self.sign_with_rng(&mut OsRng, message)
    }
}

fn sign_round(
    instance: &ColoredGraph,
    challenge: &Challenge,
    seed: [u8; 32],
) -> ((Color, Color), CommitmentTable) {
    let mut rng = StdRng::from_seed(seed);
    let colors = instance.relabel(&mut rng);
    let table = CommitmentTable::commit_colors(&mut rng, &colors);
    let (u, v) = challenge.edge;
    ((colors[u], colors[v]), table)
}

/// Signs `message` with default parameters and operating-system randomness.
pub fn sign(message: &str, instance: &ColoredGraph) -> Result<Proof> {
    Signer::new(instance, SchemeParams::default()).sign(message)
}
