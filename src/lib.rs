#![deny(missing_docs)]

//! The design philosophy underlying `tricolor` is pedagogical, yet faithful to the protocol.
//! Each module isolates one step of a commit-and-reveal argument over graph colorings,
//! illustrating how small primitives compose into a signature scheme.
//! # tricolor
//!
//! **tricolor** is a toy non-interactive signature scheme built on graph
//! 3-colorability.  The signer holds a secret proper 3-coloring of a public
//! graph.  To sign a message it derives a sequence of edges from the message
//! (a Fiat–Shamir style walk over the edge list) and, for each edge, commits to
//! a freshly permuted coloring of every vertex and reveals the two colors at
//! that edge.  The verifier recomputes the edges and checks that each revealed
//! pair is two different colors backed by the commitments.
//!
//! The scheme is pedagogical.  It claims no formal soundness or
//! zero-knowledge guarantees and uses a plain SHA-256 commitment.
//!
//! ## Modules
//!
//! * [`commitment`]: SHA-256 commitments with 256-bit random keys.
//! * [`graph`]: graphs, the palette, random generation and relabeling.
//! * [`challenge`]: message-to-edge derivation.
//! * [`signer`] / [`verifier`]: the protocol itself.
//! * [`params`]: thresholds and the verifier's opening policy.
//! * [`SeededRng`]: a deterministic random source for reproducible runs.
//!
//! ## Usage
//!
//! ```rust
//! use tricolor::{ColoredGraph, SchemeParams, SeededRng, Signer, Verifier};
//!
//! let mut rng = SeededRng::new(42);
//! let instance = ColoredGraph::generate_with_min_edges(&mut rng, 35, 128, 16)?;
//!
//! let signer = Signer::new(&instance, SchemeParams::default());
//! let proof = signer.sign_with_rng(&mut rng, "Kogo lisek przyodzieje")?;
//!
//! let verifier = Verifier::new(instance.graph(), SchemeParams::default());
//! assert!(verifier.verify("Kogo lisek przyodzieje", &proof));
//! # Ok::<(), tricolor::Error>(())
//! ```

pub mod challenge;
pub mod commitment;
mod error;
pub mod graph;
pub mod io;
pub mod params;
mod prng;
pub mod signer;
pub mod verifier;

pub use challenge::{derive_challenges, Challenge, ChallengeSet};
pub use commitment::{commit, commit_with, verify_commitment, Commitment, CommitmentTable};
pub use error::{Error, Result};
pub use graph::{relabel, Color, ColoredGraph, Edge, Graph};
pub use params::{OpeningPolicy, SchemeParams};
pub use prng::SeededRng;
pub use signer::{sign, Proof, Signature, Signer};
pub use verifier::{verify, Rejection, Verifier};
