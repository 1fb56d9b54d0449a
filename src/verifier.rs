//! Verification of graph-coloring signatures.
//!
//! The verifier recomputes the challenge edges from the message and walks the
//! proof round by round.  A round for edge `(u, v)` with revealed pair
//! `(a, b)` passes when
//!
//! * `a != b` (no proper coloring can give an edge two equal colors), and
//! * the round's commitments to `u` and `v` open to `a` and `b` as demanded
//!   by the [`OpeningPolicy`].
//!
//! The default policy accepts a round when *either* endpoint opens.  That is
//! the reference behavior and it is weaker than requiring both: a forger
//! only has to commit honestly to one endpoint per round.  Use
//! [`SchemeParams::strict`] to require both openings.
//!
//! Every input here is untrusted.  Malformed proofs (wrong round count,
//! short or misaligned tables) are rejections, never panics.

use crate::challenge::{derive_challenges, Challenge};
use crate::commitment::CommitmentTable;
use crate::graph::{Color, Graph};
use crate::params::{OpeningPolicy, SchemeParams};
use crate::signer::{Proof, Signature};
use std::fmt;
use tracing::debug;

#[cfg(not(target_arch = "wasm32"))]
use rayon::prelude::*;

/// Why a proof was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// The graph is too sparse to derive challenges from.
    InsufficientEdges,
    /// The signature does not have one entry per derived challenge.
    RoundCount {
        /// Number of rounds derived from the message.
        expected: usize,
        /// Number of signature entries supplied.
        signature: usize,
        /// Number of commitment tables supplied.
        commitments: usize,
    },
    /// A round revealed the same color at both endpoints.
    EqualColors {
        /// Zero-based round number.
        round: usize,
    },
    /// A round's commitments did not open as the policy requires.
    Opening {
        /// Zero-based round number.
        round: usize,
    },
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InsufficientEdges => write!(f, "graph has too few edges"),
            Self::RoundCount {
                expected,
                signature,
                commitments,
            } => write!(
                f,
                "expected {expected} rounds, got {signature} signature entries and {commitments} commitment tables"
            ),
            Self::EqualColors { round } => write!(f, "round {round} reveals equal colors"),
            Self::Opening { round } => write!(f, "round {round} commitments do not open"),
        }
    }
}

impl std::error::Error for Rejection {}

/// Checks signatures against a public graph.
#[derive(Debug, Clone)]
pub struct Verifier<'a> {
    graph: &'a Graph,
    params: SchemeParams,
}

impl<'a> Verifier<'a> {
    /// Creates a verifier for `graph`.
    pub fn new(graph: &'a Graph, params: SchemeParams) -> Self {
        Self { graph, params }
    }

    /// Checks `proof` for `message`, reporting the first failing round.
    pub fn check(&self, message: &str, proof: &Proof) -> Result<(), Rejection> {
        self.check_parts(message, &proof.commitments, &proof.signature)
    }

    /// Like [`Verifier::check`] with the proof given as its two parts.
    pub fn check_parts(
        &self,
        message: &str,
        commitments: &[CommitmentTable],
        signature: &Signature,
    ) -> Result<(), Rejection> {
        let challenges = derive_challenges(message, self.graph, &self.params)
            .map_err(|_| Rejection::InsufficientEdges)?;
        if challenges.len() != signature.len() || challenges.len() != commitments.len() {
            return Err(Rejection::RoundCount {
                expected: challenges.len(),
                signature: signature.len(),
                commitments: commitments.len(),
            });
        }
        let policy = self.params.opening_policy;

        #[cfg(not(target_arch = "wasm32"))]
        let failure = challenges
            .as_slice()
            .par_iter()
            .zip(signature.pairs.par_iter())
            .zip(commitments.par_iter())
            .enumerate()
            .find_map_first(|(round, ((challenge, &pair), table))| {
                check_round(policy, round, challenge, pair, table).err()
            });
        #[cfg(target_arch = "wasm32")]
        let failure = challenges
            .iter()
            .zip(&signature.pairs)
            .zip(commitments)
            .enumerate()
            .find_map(|(round, ((challenge, &pair), table))| {
                check_round(policy, round, challenge, pair, table).err()
            });

        match failure {
            Some(rejection) => Err(rejection),
            None => Ok(()),
        }
    }

    /// Returns `true` if `proof` is a valid signature on `message`.
    pub fn verify(&self, message: &str, proof: &Proof) -> bool {
        self.verify_parts(message, &proof.commitments, &proof.signature)
    }

    /// Like [`Verifier::verify`] with the proof given as its two parts.
    pub fn verify_parts(
        &self,
        message: &str,
        commitments: &[CommitmentTable],
        signature: &Signature,
    ) -> bool {
        match self.check_parts(message, commitments, signature) {
            Ok(()) => true,
            Err(reason) => {
                debug!(%reason, "signature rejected");
                false
            }
        }
    }
}

fn check_round(
    policy: OpeningPolicy,
    round: usize,
    challenge: &Challenge,
    (a, b): (Color, Color),
    table: &CommitmentTable,
) -> Result<(), Rejection> {
    if a == b {
        return Err(Rejection::EqualColors { round });
    }
    let (u, v) = challenge.edge;
    let opens_u = table.opens_to(u, a);
    let opens_v = table.opens_to(v, b);
    let accepted = match policy {
        OpeningPolicy::AtLeastOne => opens_u || opens_v,
        OpeningPolicy::Both => opens_u && opens_v,
    };
    if accepted {
        Ok(())
    } else {
        Err(Rejection::Opening { round })
    }
}

/// Verifies with default parameters.
pub fn verify(
    message: &str,
    graph: &Graph,
    commitments: &[CommitmentTable],
    signature: &Signature,
) -> bool {
    Verifier::new(graph, SchemeParams::default()).verify_parts(message, commitments, signature)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commitment::commit;
    use crate::graph::ColoredGraph;
    use crate::prng::SeededRng;
    use crate::signer::{sign, Signer};
    use proptest::prelude::*;

    const MESSAGE: &str = "Kogo lisek przyodzieje";

    fn instance(seed: u64) -> ColoredGraph {
        let mut rng = SeededRng::new(seed);
        ColoredGraph::generate_with_min_edges(&mut rng, 35, 128, 32).unwrap()
    }

    #[test]
    fn test_reference_scenario() {
        let colored = instance(2024);
        let graph = colored.graph();
        let proof = sign(MESSAGE, &colored).unwrap();
        let (tables, sig) = (&proof.commitments, &proof.signature);
        assert!(verify(MESSAGE, graph, tables, sig));
        assert!(!verify("Kogo lisek przyodzieja", graph, tables, sig));
        assert!(!verify("Kogo Lisek przyodzieje", graph, tables, sig));
        assert!(!verify("inna dlugosc14", graph, tables, sig));
        assert!(!verify("Inny tekst tej dlugosc", graph, tables, sig));
    }

    #[test]
    fn test_longer_message_round_count_rejected() {
        let colored = instance(5);
        let proof = sign(MESSAGE, &colored).unwrap();
        let verifier = Verifier::new(colored.graph(), SchemeParams::default());
        let longer = "x".repeat(40);
        assert!(matches!(
            verifier.check(&longer, &proof),
            Err(Rejection::RoundCount {
                expected: 40,
                signature: 31,
                commitments: 31
            })
        ));
    }

    #[test]
    fn test_truncated_proof_rejected() {
        let colored = instance(6);
        let mut proof = sign(MESSAGE, &colored).unwrap();
        proof.signature.pairs.pop();
        assert!(!verify(MESSAGE, colored.graph(), &proof.commitments, &proof.signature));

        let mut proof = sign(MESSAGE, &colored).unwrap();
        proof.commitments.pop();
        assert!(!verify(MESSAGE, colored.graph(), &proof.commitments, &proof.signature));
    }

    #[test]
    fn test_equal_colors_rejected() {
        let colored = instance(7);
        let mut proof = sign(MESSAGE, &colored).unwrap();
        let (a, _) = proof.signature.pairs[3];
        proof.signature.pairs[3] = (a, a);
        let verifier = Verifier::new(colored.graph(), SchemeParams::default());
        assert_eq!(
            verifier.check(MESSAGE, &proof),
            Err(Rejection::EqualColors { round: 3 })
        );
    }

    #[test]
    fn test_policy_on_single_forged_opening() {
        let colored = instance(8);
        let graph = colored.graph();
        let mut proof = sign(MESSAGE, &colored).unwrap();
        let challenges = derive_challenges(MESSAGE, graph, &SchemeParams::default()).unwrap();
        // Replace the commitment at the first endpoint of round 0 with one
        // to a color that differs from the revealed one.
        let (u, _) = challenges.as_slice()[0].edge;
        let (a, b) = proof.signature.pairs[0];
        let wrong = Color::PALETTE
            .into_iter()
            .find(|&c| c != a && c != b)
            .unwrap();
        let forged = commit(wrong.name());
        proof.commitments[0].keys[u] = forged.key;
        proof.commitments[0].digests[u] = forged.digest;

        let lenient = Verifier::new(graph, SchemeParams::default());
        assert!(lenient.verify(MESSAGE, &proof));
        let strict = Verifier::new(graph, SchemeParams::default().strict());
        assert_eq!(
            strict.check(MESSAGE, &proof),
            Err(Rejection::Opening { round: 0 })
        );
    }

    #[test]
    fn test_both_openings_forged_rejected() {
        let colored = instance(9);
        let graph = colored.graph();
        let mut proof = sign(MESSAGE, &colored).unwrap();
        let challenges = derive_challenges(MESSAGE, graph, &SchemeParams::default()).unwrap();
        let (u, v) = challenges.as_slice()[2].edge;
        proof.commitments[2].keys[u] = "00".to_string();
        proof.commitments[2].keys[v] = "00".to_string();
        assert!(!verify(MESSAGE, graph, &proof.commitments, &proof.signature));
    }

    #[test]
    fn test_short_tables_do_not_panic() {
        let colored = instance(10);
        let mut proof = sign(MESSAGE, &colored).unwrap();
        for table in &mut proof.commitments {
            table.keys.clear();
            table.digests.truncate(1);
        }
        assert!(!verify(MESSAGE, colored.graph(), &proof.commitments, &proof.signature));
        assert!(!verify(MESSAGE, colored.graph(), &[], &Signature::default()));
    }

    #[test]
    fn test_sparse_graph_rejects() {
        let colored = instance(11);
        let proof = sign(MESSAGE, &colored).unwrap();
        let sparse = Graph::from_edges(35, [(0, 1)]).unwrap();
        let verifier = Verifier::new(&sparse, SchemeParams::default());
        assert_eq!(
            verifier.check(MESSAGE, &proof),
            Err(Rejection::InsufficientEdges)
        );
    }

    #[test]
    fn test_verifies_after_json_round_trip() {
        let colored = instance(12);
        let signer = Signer::new(&colored, SchemeParams::default().strict());
        let proof = signer.sign(MESSAGE).unwrap();
        let encoded = serde_json::to_string(&proof).unwrap();
        let decoded: Proof = serde_json::from_str(&encoded).unwrap();
        let graph: Graph =
            serde_json::from_str(&serde_json::to_string(colored.graph()).unwrap()).unwrap();
        let verifier = Verifier::new(&graph, SchemeParams::default().strict());
        assert!(verifier.verify(MESSAGE, &decoded));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(16))]

        #[test]
        fn prop_sign_then_verify(seed in any::<u64>(), message in "\\PC{0,48}") {
            let colored = instance(seed);
            let signer = Signer::new(&colored, SchemeParams::default());
            let proof = signer.sign_with_rng(&mut SeededRng::new(seed ^ 1), &message).unwrap();
            let strict = Verifier::new(colored.graph(), SchemeParams::default().strict());
            prop_assert!(strict.verify(&message, &proof));
        }

        #[test]
        fn prop_signature_binds_message(message in "[a-z ]{1,40}", suffix in "[A-Z]{1,3}") {
            let colored = instance(77);
            let proof = sign(&message, &colored).unwrap();
            let other = format!("{message}{suffix}");
            prop_assert!(!verify(&other, colored.graph(), &proof.commitments, &proof.signature));
        }
    }
}
