//! Per-token training weights.

use serde::{Deserialize, Serialize};

use crate::tokenize::is_ascii_punctuation_token;

/// Default weight applied to ASCII punctuation tokens.
pub const DEFAULT_PUNCTUATION_WEIGHT: f64 = 1000.0;

/// Default weight applied to every other token of a short document.
pub const DEFAULT_SHORT_REVIEW_WEIGHT: f64 = 0.1;

/// Documents with fewer tokens than this are "short".
pub const DEFAULT_SHORT_REVIEW_LENGTH: usize = 15;

/// How much each token contributes to its class during training.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum WeightingPolicy {
    /// Every token counts once.
    #[default]
    Uniform,
    /// Punctuation is amplified; words of short documents are damped.
    Weighted {
        #[serde(default = "default_punctuation_weight")]
        punctuation_weight: f64,
        #[serde(default = "default_short_review_weight")]
        short_review_weight: f64,
        #[serde(default = "default_short_review_length")]
        short_review_length: usize,
    },
}

fn default_punctuation_weight() -> f64 {
    DEFAULT_PUNCTUATION_WEIGHT
}
fn default_short_review_weight() -> f64 {
    DEFAULT_SHORT_REVIEW_WEIGHT
}
fn default_short_review_length() -> usize {
    DEFAULT_SHORT_REVIEW_LENGTH
}

impl WeightingPolicy {
    /// The weighted policy with its default parameters.
    pub fn weighted() -> Self {
        Self::Weighted {
            punctuation_weight: DEFAULT_PUNCTUATION_WEIGHT,
            short_review_weight: DEFAULT_SHORT_REVIEW_WEIGHT,
            short_review_length: DEFAULT_SHORT_REVIEW_LENGTH,
        }
    }

    /// Weight of one lowercased token in a document of `doc_len` tokens.
    ///
    /// Punctuation is checked first, so punctuation in a short document
    /// still receives the punctuation weight.
    pub fn weight(&self, token: &str, doc_len: usize) -> f64 {
        match *self {
            Self::Uniform => 1.0,
            Self::Weighted {
                punctuation_weight,
                short_review_weight,
                short_review_length,
            } => {
                if is_ascii_punctuation_token(token) {
                    punctuation_weight
                } else if doc_len < short_review_length {
                    short_review_weight
                } else {
                    1.0
                }
            }
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if let Self::Weighted {
            punctuation_weight,
            short_review_weight,
            ..
        } = *self
        {
            for (name, value) in [
                ("punctuation_weight", punctuation_weight),
                ("short_review_weight", short_review_weight),
            ] {
                if !value.is_finite() || value < 0.0 {
                    return Err(format!("{name} must be a finite non-negative number, got {value}"));
                }
            }
        }
        Ok(())
    }
}

impl std::fmt::Display for WeightingPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Uniform => write!(f, "uniform"),
            Self::Weighted {
                punctuation_weight,
                short_review_weight,
                short_review_length,
            } => write!(
                f,
                "weighted (punctuation x{punctuation_weight}, short reviews < {short_review_length} tokens x{short_review_weight})"
            ),
        }
    }
}
