//! Scheme parameters.
//!
//! The defaults reproduce the reference protocol: 31 challenge rounds give a
//! forgery bound of roughly `(1/3)^31`, and graphs must carry at least 128
//! edges so that every ASCII ordinal can land on its own edge.  Parameters can
//! be overridden from a JSON file; absent fields keep their defaults.

use crate::error::{Error, Result};
use crate::io::read_json;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default number of challenge rounds (minimum padded message length).
pub const MIN_CHALLENGES: usize = 31;
/// Default minimum edge count a graph needs before it can sign.
pub const MIN_EDGES: usize = 128;
/// Filler appended to short messages.
pub const PAD_CHAR: char = ' ';

/// How many endpoint openings a verifier demands per round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OpeningPolicy {
    /// A round passes when at least one endpoint commitment opens.
    ///
    /// This is the reference behavior.  It is weaker than [`OpeningPolicy::Both`]:
    /// a prover may fabricate the color of one endpoint per round.
    #[default]
    AtLeastOne,
    /// Both endpoint commitments must open to the revealed colors.
    Both,
}

/// Tunable thresholds shared by signer and verifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchemeParams {
    /// Messages shorter than this are padded; equals the minimum round count.
    pub min_challenges: usize,
    /// Graphs with fewer edges cannot be used to sign or verify.
    pub min_edges: usize,
    /// Character used to pad short messages.
    pub pad_char: char,
    /// Opening rule enforced by the verifier.
    pub opening_policy: OpeningPolicy,
}

impl Default for SchemeParams {
    fn default() -> Self {
        Self {
            min_challenges: MIN_CHALLENGES,
            min_edges: MIN_EDGES,
            pad_char: PAD_CHAR,
            opening_policy: OpeningPolicy::AtLeastOne,
        }
    }
}

impl SchemeParams {
    /// Checks that the thresholds are usable.
    pub fn validate(&self) -> Result<()> {
        if self.min_challenges == 0 {
            return Err(Error::InvalidParams(
                "min_challenges must be positive".to_string(),
            ));
        }
        if self.min_edges == 0 {
            return Err(Error::InvalidParams("min_edges must be positive".to_string()));
        }
        Ok(())
    }

    /// Loads and validates parameters from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let params: Self = read_json(path)?;
        params.validate()?;
        Ok(params)
    }

    /// Returns a copy that requires both endpoint openings.
    pub fn strict(mut self) -> Self {
        self.opening_policy = OpeningPolicy::Both;
        self
    }
}
