//! Message-to-edge challenge derivation.
//!
//! This is the non-interactive step: instead of a verifier picking edges at
//! random, both parties walk the graph's edge list under a checksum of the
//! message.  With `E` edges and ordinals taken as Unicode scalar values:
//!
//! ```text
//! pad message with ' ' up to 31 characters
//! sum = Σ ord(c) mod E
//! for c in message:
//!     s   = (ord(c) + sum) mod E      -> challenge edge s
//!     sum = (sum + s) mod E
//! ```
//!
//! The initial checksum covers the whole message and each step feeds the
//! previous index back in, so editing any single character moves the entire
//! sequence.  Padding fixes the round count, and therefore the guessing bound
//! of `(1/3)^31`, independently of message length.

use crate::error::{Error, Result};
use crate::graph::{Edge, Graph};
use crate::params::SchemeParams;

/// A challenged edge and its position in the graph's enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Challenge {
    /// Index into [`Graph::edges`].
    pub index: usize,
    /// The edge at that index.
    pub edge: Edge,
}

/// Ordered challenges for one signing or verification call.
///
/// The same edge may be challenged more than once.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ChallengeSet {
    challenges: Vec<Challenge>,
}

impl ChallengeSet {
    /// Number of rounds.
    pub fn len(&self) -> usize {
        self.challenges.len()
    }

    /// Returns `true` if no rounds were derived.
    pub fn is_empty(&self) -> bool {
        self.challenges.is_empty()
    }

    /// Challenges in round order.
    pub fn as_slice(&self) -> &[Challenge] {
        &self.challenges
    }

    /// Iterates over the challenges in round order.
    pub fn iter(&self) -> std::slice::Iter<'_, Challenge> {
        self.challenges.iter()
    }

    /// Edge indices in round order.
    pub fn indices(&self) -> Vec<usize> {
        self.challenges.iter().map(|c| c.index).collect()
    }
}

impl<'a> IntoIterator for &'a ChallengeSet {
    type Item = &'a Challenge;
    type IntoIter = std::slice::Iter<'a, Challenge>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Pads `message` with `pad` until it holds at least `min_len` characters.
pub fn pad_message(message: &str, min_len: usize, pad: char) -> Vec<char> {
    let mut symbols: Vec<char> = message.chars().collect();
    if symbols.len() < min_len {
        symbols.resize(min_len, pad);
    }
    symbols
}

/// Derives the challenge edges for `message` over `graph`.
///
/// Fails with [`Error::InsufficientEdges`] when the graph is below
/// `params.min_edges`; the verifier treats that as a rejection.
pub fn derive_challenges(
    message: &str,
    graph: &Graph,
    params: &SchemeParams,
) -> Result<ChallengeSet> {
    let edge_count = graph.edge_count();
    if edge_count == 0 || edge_count < params.min_edges {
        return Err(Error::InsufficientEdges {
            edges: edge_count,
            required: params.min_edges,
        });
    }
    let modulus = edge_count as u64;
    let symbols = pad_message(message, params.min_challenges, params.pad_char);

    let mut sum = symbols
        .iter()
        .fold(0u64, |acc, &c| (acc + u64::from(u32::from(c))) % modulus);

    let mut challenges = Vec::with_capacity(symbols.len());
    for &c in &symbols {
        let s = (u64::from(u32::from(c)) + sum) % modulus;
        sum = (sum + s) % modulus;
        let index = s as usize;
        challenges.push(Challenge {
            index,
            edge: graph.edges()[index],
        });
    }
    Ok(ChallengeSet { challenges })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    /// Complete bipartite graph K(8,16): exactly 128 edges.
    fn graph_with_128_edges() -> Graph {
        let edges = (0..8).flat_map(|u| (8..24).map(move |v| (u, v)));
        Graph::from_edges(24, edges).unwrap()
    }

    /// Complete bipartite graph K(a,b) on `a + b` vertices.
    fn bipartite(a: usize, b: usize) -> Graph {
        let edges = (0..a).flat_map(|u| (a..a + b).map(move |v| (u, v)));
        Graph::from_edges(a + b, edges).unwrap()
    }

    #[test]
    fn test_padding() {
        assert_eq!(pad_message("ab", 4, ' '), vec!['a', 'b', ' ', ' ']);
        assert_eq!(pad_message("abcdef", 4, ' ').len(), 6);
        // Counted in characters, not bytes.
        assert_eq!(pad_message("płotek", 8, '.').len(), 8);
    }

    #[test]
    fn test_hand_computed_walk() {
        let graph = Graph::from_edges(6, [(0, 1), (1, 2), (2, 3), (3, 4), (4, 5)]).unwrap();
        let params = SchemeParams {
            min_challenges: 3,
            min_edges: 1,
            ..SchemeParams::default()
        };
        // "ab " -> ords 97, 98, 32; E = 5; initial sum = 227 mod 5 = 2.
        let set = derive_challenges("ab", &graph, &params).unwrap();
        assert_eq!(set.indices(), vec![4, 4, 2]);
        assert_eq!(set.as_slice()[2].edge, (2, 3));
    }

    #[test]
    fn test_deterministic() {
        let graph = graph_with_128_edges();
        let params = SchemeParams::default();
        let a = derive_challenges("Kogo lisek przyodzieje", &graph, &params).unwrap();
        let b = derive_challenges("Kogo lisek przyodzieje", &graph, &params).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_exactly_min_edges_gives_full_rounds() {
        let graph = graph_with_128_edges();
        assert_eq!(graph.edge_count(), 128);
        let set = derive_challenges("", &graph, &SchemeParams::default()).unwrap();
        assert_eq!(set.len(), 31);
        assert!(set.iter().all(|c| c.index < 128));
        let long = "~".repeat(39);
        let set = derive_challenges(&long, &graph, &SchemeParams::default()).unwrap();
        assert_eq!(set.len(), 39);
    }

    #[test]
    fn test_too_few_edges_rejected() {
        let graph = bipartite(1, 127);
        assert_eq!(graph.edge_count(), 127);
        let err = derive_challenges("hello", &graph, &SchemeParams::default()).unwrap_err();
        assert!(matches!(
            err,
            Error::InsufficientEdges {
                edges: 127,
                required: 128
            }
        ));
    }

    #[test]
    fn test_non_ascii_message() {
        let graph = bipartite(10, 20);
        let set = derive_challenges("Wlazł kotek na płotek", &graph, &SchemeParams::default())
            .unwrap();
        assert_eq!(set.len(), 31);
        assert!(set.iter().all(|c| c.index < 200));
    }

    #[test]
    fn test_case_change_moves_challenges() {
        let graph = bipartite(10, 20);
        let params = SchemeParams::default();
        let a = derive_challenges("Kogo lisek przyodzieje", &graph, &params).unwrap();
        let b = derive_challenges("Kogo Lisek przyodzieje", &graph, &params).unwrap();
        assert_ne!(a.indices(), b.indices());
    }

    proptest! {
        #[test]
        fn prop_single_edit_changes_sequence(
            message in "[ -~]{1,60}",
            position in any::<prop::sample::Index>(),
            replacement in 0x20u8..0x7f,
        ) {
            let graph = bipartite(12, 14);
            let params = SchemeParams::default();
            let mut symbols: Vec<char> = message.chars().collect();
            let at = position.index(symbols.len());
            prop_assume!(symbols[at] != replacement as char);
            symbols[at] = replacement as char;
            let edited: String = symbols.into_iter().collect();
            let a = derive_challenges(&message, &graph, &params).unwrap();
            let b = derive_challenges(&edited, &graph, &params).unwrap();
            prop_assert_ne!(a.indices(), b.indices());
        }
    }
}
