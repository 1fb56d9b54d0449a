//! Error type shared by graph construction, parameter loading and persistence.
//!
//! Verification never surfaces these errors: an untrusted proof that cannot be
//! checked is simply rejected.  They are reserved for the prover side and for
//! loading artifacts from disk.

use std::path::PathBuf;

/// Errors reported by the `tricolor` crate.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The graph has fewer edges than the challenge derivation requires.
    ///
    /// Random generation hits this with small probability; callers are expected
    /// to regenerate the graph.
    #[error("graph has {edges} edges, at least {required} are required")]
    InsufficientEdges {
        /// Number of edges the graph actually has.
        edges: usize,
        /// Minimum number of edges demanded by the parameters.
        required: usize,
    },
    /// An edge references a vertex outside `0..vertex_count`.
    #[error("edge ({u}, {v}) references a vertex outside 0..{vertex_count}")]
    VertexOutOfRange {
        /// First endpoint.
        u: usize,
        /// Second endpoint.
        v: usize,
        /// Number of vertices in the graph.
        vertex_count: usize,
    },
    /// An edge joins a vertex to itself.
    #[error("self-loop on vertex {0}")]
    SelfLoop(usize),
    /// The same undirected edge was supplied twice.
    #[error("duplicate edge ({0}, {1})")]
    DuplicateEdge(usize, usize),
    /// The coloring does not assign exactly one color per vertex.
    #[error("coloring has {colors} entries for {vertices} vertices")]
    ColoringLength {
        /// Number of colors supplied.
        colors: usize,
        /// Number of vertices in the graph.
        vertices: usize,
    },
    /// An edge connects two vertices of the same color.
    #[error("edge ({0}, {1}) is monochromatic")]
    ImproperColoring(usize, usize),
    /// Scheme parameters failed validation.
    #[error("invalid parameters: {0}")]
    InvalidParams(String),
    /// Filesystem failure while reading or writing an artifact.
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        /// File being accessed.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
    /// Artifact could not be encoded or decoded as JSON.
    #[error("JSON error on {}: {source}", .path.display())]
    Json {
        /// File being accessed.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: serde_json::Error,
    },
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
