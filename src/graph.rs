//! Graphs, the three-color palette and the prover's secret coloring.
//!
//! A [`Graph`] is public: a vertex count and a list of undirected edges kept in
//! a canonical, stable order (`(u, v)` with `u < v`, sorted lexicographically).
//! Challenge derivation indexes into that list, so signer and verifier must
//! agree on it exactly.
//!
//! A [`ColoredGraph`] pairs a graph with a proper 3-coloring and is the
//! prover's secret.  The coloring is never mutated; each signing round works
//! on a fresh [`relabel`]ing, which permutes the palette but keeps the
//! partition of vertices into color classes.

use crate::error::{Error, Result};
use rand::seq::SliceRandom;
use rand::{CryptoRng, Rng, RngCore};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, warn};

/// An undirected edge `(u, v)`, stored with `u < v`.
pub type Edge = (usize, usize);

/// One of the three palette colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    /// Canonical label 1.
    Blue,
    /// Canonical label 2.
    Yellow,
    /// Canonical label 3.
    Red,
}

impl Color {
    /// The palette in canonical label order.
    pub const PALETTE: [Color; 3] = [Color::Blue, Color::Yellow, Color::Red];

    /// Name committed to during signing.
    pub fn name(self) -> &'static str {
        match self {
            Color::Blue => "blue",
            Color::Yellow => "yellow",
            Color::Red => "red",
        }
    }

    /// Canonical numeric label in `1..=3`.
    pub fn label(self) -> u8 {
        self.index() as u8 + 1
    }

    /// Maps a numeric label in `1..=3` back to its color.
    pub fn from_label(label: u8) -> Option<Self> {
        match label {
            1 => Some(Color::Blue),
            2 => Some(Color::Yellow),
            3 => Some(Color::Red),
            _ => None,
        }
    }

    fn index(self) -> usize {
        match self {
            Color::Blue => 0,
            Color::Yellow => 1,
            Color::Red => 2,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Deserialize)]
struct RawGraph {
    vertex_count: usize,
    edges: Vec<Edge>,
}

/// Public graph with a stable edge enumeration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawGraph")]
pub struct Graph {
    vertex_count: usize,
    edges: Vec<Edge>,
}

impl TryFrom<RawGraph> for Graph {
    type Error = Error;

    fn try_from(raw: RawGraph) -> Result<Self> {
        Graph::from_edges(raw.vertex_count, raw.edges)
    }
}

impl Graph {
    /// Builds a graph from arbitrary edges, normalizing their order.
    ///
    /// Endpoints must lie in `0..vertex_count` and differ; `(u, v)` and
    /// `(v, u)` name the same edge and may appear only once.
    pub fn from_edges(vertex_count: usize, edges: impl IntoIterator<Item = Edge>) -> Result<Self> {
        let mut normalized = Vec::new();
        for (u, v) in edges {
            if u >= vertex_count || v >= vertex_count {
                return Err(Error::VertexOutOfRange { u, v, vertex_count });
            }
            if u == v {
                return Err(Error::SelfLoop(u));
            }
            normalized.push((u.min(v), u.max(v)));
        }
        normalized.sort_unstable();
        if let Some(pair) = normalized.windows(2).find(|w| w[0] == w[1]) {
            return Err(Error::DuplicateEdge(pair[0].0, pair[0].1));
        }
        Ok(Self {
            vertex_count,
            edges: normalized,
        })
    }

    /// Number of vertices.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    /// Number of edges.
    #[inline]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Edges in enumeration order.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// The edge at `index` in enumeration order.
    pub fn edge(&self, index: usize) -> Option<Edge> {
        self.edges.get(index).copied()
    }

    /// Returns the first edge whose endpoints share a color, if any.
    ///
    /// Callers must pass one color per vertex.
    pub fn monochromatic_edge(&self, coloring: &[Color]) -> Option<Edge> {
        self.edges
            .iter()
            .copied()
            .find(|&(u, v)| coloring[u] == coloring[v])
    }
}

#[derive(Deserialize)]
struct RawColoredGraph {
    graph: Graph,
    coloring: Vec<Color>,
}

/// A graph together with a proper 3-coloring: the signer's secret.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawColoredGraph")]
pub struct ColoredGraph {
    graph: Graph,
    coloring: Vec<Color>,
}

impl TryFrom<RawColoredGraph> for ColoredGraph {
    type Error = Error;

    fn try_from(raw: RawColoredGraph) -> Result<Self> {
        ColoredGraph::new(raw.graph, raw.coloring)
    }
}

impl ColoredGraph {
    /// Pairs `graph` with `coloring`, checking that the coloring is proper.
    pub fn new(graph: Graph, coloring: Vec<Color>) -> Result<Self> {
        if coloring.len() != graph.vertex_count() {
            return Err(Error::ColoringLength {
                colors: coloring.len(),
                vertices: graph.vertex_count(),
            });
        }
        if let Some((u, v)) = graph.monochromatic_edge(&coloring) {
            return Err(Error::ImproperColoring(u, v));
        }
        Ok(Self { graph, coloring })
    }

    /// Generates a random graph on `n` vertices with a proper coloring.
    ///
    /// Vertices are added one at a time.  Each draws a uniform color and is
    /// joined, with probability 1/2, to every earlier vertex of a different
    /// color.  Same-colored vertices are never joined, so the coloring is
    /// proper by construction.  The expected edge count is `n(n-1)/6`.
    pub fn generate<R: RngCore + CryptoRng>(rng: &mut R, n: usize) -> Self {
        let mut coloring = Vec::with_capacity(n);
        let mut edges = Vec::new();
        for vertex in 0..n {
            let color = Color::PALETTE[rng.gen_range(0..Color::PALETTE.len())];
            for (earlier, &other) in coloring.iter().enumerate() {
                if other != color && rng.gen_bool(0.5) {
                    edges.push((earlier, vertex));
                }
            }
            coloring.push(color);
        }
        edges.sort_unstable();
        debug!(vertices = n, edges = edges.len(), "generated colored graph");
        Self {
            graph: Graph {
                vertex_count: n,
                edges,
            },
            coloring,
        }
    }

    /// Generates graphs until one has at least `min_edges` edges.
    ///
    /// Gives up with [`Error::InsufficientEdges`] after `max_attempts`
    /// attempts (at least one attempt is always made).
    pub fn generate_with_min_edges<R: RngCore + CryptoRng>(
        rng: &mut R,
        n: usize,
        min_edges: usize,
        max_attempts: usize,
    ) -> Result<Self> {
        let mut last_edges = 0;
        for attempt in 1..=max_attempts.max(1) {
            let candidate = Self::generate(rng, n);
            if candidate.graph.edge_count() >= min_edges {
                return Ok(candidate);
            }
            last_edges = candidate.graph.edge_count();
            warn!(
                attempt,
                edges = last_edges,
                required = min_edges,
                "generated graph has too few edges, regenerating"
            );
        }
        Err(Error::InsufficientEdges {
            edges: last_edges,
            required: min_edges,
        })
    }

    /// The public graph.
    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// The canonical coloring, one color per vertex.
    pub fn coloring(&self) -> &[Color] {
        &self.coloring
    }

    /// A fresh random relabeling of this coloring.
    pub fn relabel<R: RngCore + CryptoRng>(&self, rng: &mut R) -> Vec<Color> {
        relabel(rng, &self.coloring)
    }
}

/// Applies a uniformly random palette permutation to `coloring`.
///
/// Vertices that shared a color still share one and vertices that differed
/// still differ; only the concrete color names change.
pub fn relabel<R: RngCore + CryptoRng>(rng: &mut R, coloring: &[Color]) -> Vec<Color> {
    let mut palette = Color::PALETTE;
    palette.shuffle(rng);
    coloring.iter().map(|c| palette[c.index()]).collect()
}
