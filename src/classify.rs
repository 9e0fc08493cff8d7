//! Naive Bayes scoring and the three-way sentiment decision.
//!
//! Scoring pipeline for one document:
//!
//! 1. Tokenize and lowercase.
//! 2. Sum per-token conditional log10-probabilities per class, with add-one
//!    smoothing over word mass: `log10((count + 1) / (mass + 1))`.
//! 3. Add log10 class priors from the document counters.
//! 4. Apply the configured [`DecisionPolicy`] to the two final scores.
//!
//! Classification never mutates the model, so a single [`ModelArtifact`] can
//! be shared across threads; [`Classifier::classify_batch`] fans out with rayon.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::{ModelError, ModelResult};
use crate::model::{Label, ModelArtifact};
use crate::tokenize::{normalize, tokens};

/// Margin used by [`DecisionPolicy::FixedMargin`] unless configured otherwise.
pub const DEFAULT_MARGIN: f64 = 0.2;

/// Neutral half-width used by [`DecisionPolicy::LengthBiased`] by default.
pub const DEFAULT_NEUTRALITY_BIAS: f64 = 0.01;

/// Per-token correction added by [`DecisionPolicy::LengthBiased`] by default.
pub const DEFAULT_REVIEW_LENGTH_WEIGHT: f64 = 0.12;

// ── Sentiment ──────────────────────────────────────────────────────────────

/// Classification outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Negative,
    Neutral,
    Positive,
}

impl Sentiment {
    pub const ALL: [Sentiment; 3] = [Self::Negative, Self::Neutral, Self::Positive];
}

impl std::fmt::Display for Sentiment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Positive => write!(f, "positive"),
            Self::Negative => write!(f, "negative"),
            Self::Neutral => write!(f, "neutral"),
        }
    }
}

// ── DecisionPolicy ─────────────────────────────────────────────────────────

/// Rule turning the two final log-probabilities into a [`Sentiment`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum DecisionPolicy {
    /// One class must beat the other by more than `margin`.
    FixedMargin {
        #[serde(default = "default_margin")]
        margin: f64,
    },
    /// `delta = (pos - neg) + token_count * review_length_weight`,
    /// neutral when `|delta| <= neutrality_bias`.
    LengthBiased {
        #[serde(default = "default_neutrality_bias")]
        neutrality_bias: f64,
        #[serde(default = "default_review_length_weight")]
        review_length_weight: f64,
    },
}

fn default_margin() -> f64 {
    DEFAULT_MARGIN
}
fn default_neutrality_bias() -> f64 {
    DEFAULT_NEUTRALITY_BIAS
}
fn default_review_length_weight() -> f64 {
    DEFAULT_REVIEW_LENGTH_WEIGHT
}

impl Default for DecisionPolicy {
    fn default() -> Self {
        Self::fixed_margin()
    }
}

impl DecisionPolicy {
    pub fn fixed_margin() -> Self {
        Self::FixedMargin {
            margin: DEFAULT_MARGIN,
        }
    }

    pub fn length_biased() -> Self {
        Self::LengthBiased {
            neutrality_bias: DEFAULT_NEUTRALITY_BIAS,
            review_length_weight: DEFAULT_REVIEW_LENGTH_WEIGHT,
        }
    }

    /// Decide from final (prior-inclusive) log-probabilities.
    pub fn decide(&self, final_positive: f64, final_negative: f64, token_count: usize) -> Sentiment {
        match *self {
            Self::FixedMargin { margin } => {
                if final_positive > final_negative + margin {
                    Sentiment::Positive
                } else if final_negative > final_positive + margin {
                    Sentiment::Negative
                } else {
                    Sentiment::Neutral
                }
            }
            Self::LengthBiased {
                neutrality_bias,
                review_length_weight,
            } => {
                let delta =
                    (final_positive - final_negative) + token_count as f64 * review_length_weight;
                if delta > neutrality_bias {
                    Sentiment::Positive
                } else if delta < -neutrality_bias {
                    Sentiment::Negative
                } else {
                    Sentiment::Neutral
                }
            }
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        let values = match *self {
            Self::FixedMargin { margin } => vec![("margin", margin)],
            Self::LengthBiased {
                neutrality_bias,
                review_length_weight,
            } => vec![
                ("neutrality_bias", neutrality_bias),
                ("review_length_weight", review_length_weight),
            ],
        };
        for (name, value) in values {
            if !value.is_finite() || value < 0.0 {
                return Err(format!("{name} must be a non-negative number, got {value}"));
            }
        }
        Ok(())
    }
}

impl std::fmt::Display for DecisionPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::FixedMargin { margin } => write!(f, "fixed margin {margin}"),
            Self::LengthBiased {
                neutrality_bias,
                review_length_weight,
            } => write!(
                f,
                "length-biased (bias {neutrality_bias}, {review_length_weight} per token)"
            ),
        }
    }
}

// ── Score ──────────────────────────────────────────────────────────────────

/// Every intermediate quantity behind one decision.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Score {
    /// Sum of smoothed per-token log10-probabilities under the positive class.
    pub log_likelihood_positive: f64,
    pub log_likelihood_negative: f64,
    /// `log10(positive_docs / total_docs)`.
    pub log_prior_positive: f64,
    pub log_prior_negative: f64,
    /// Tokens in the scored document (the length term of the length-biased rule).
    pub token_count: usize,
    pub decision: Sentiment,
}

impl Score {
    pub fn final_positive(&self) -> f64 {
        self.log_likelihood_positive + self.log_prior_positive
    }

    pub fn final_negative(&self) -> f64 {
        self.log_likelihood_negative + self.log_prior_negative
    }
}

impl std::fmt::Display for Score {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} (positive {:.4} = {:.4} + prior {:.4}; negative {:.4} = {:.4} + prior {:.4}; {} tokens)",
            self.decision,
            self.final_positive(),
            self.log_likelihood_positive,
            self.log_prior_positive,
            self.final_negative(),
            self.log_likelihood_negative,
            self.log_prior_negative,
            self.token_count
        )
    }
}

// ── Classifier ─────────────────────────────────────────────────────────────

/// Read-only view pairing a trained model with a decision policy.
#[derive(Debug, Clone, Copy)]
pub struct Classifier<'m> {
    model: &'m ModelArtifact,
    policy: DecisionPolicy,
}

impl<'m> Classifier<'m> {
    pub fn new(model: &'m ModelArtifact, policy: DecisionPolicy) -> Self {
        Self { model, policy }
    }

    /// Smoothed conditional log10-probabilities `(positive, negative)` of a
    /// lowercased token. Unseen tokens get `log10(1 / (mass + 1))`.
    pub fn token_log_probabilities(&self, token: &str) -> (f64, f64) {
        let stats = self.model.statistics();
        let pos = ((self.model.positive_words().get(token) + 1.0)
            / (stats.positive_word_mass + 1.0))
            .log10();
        let neg = ((self.model.negative_words().get(token) + 1.0)
            / (stats.negative_word_mass + 1.0))
            .log10();
        (pos, neg)
    }

    /// `(positive, negative)` log10 class priors.
    ///
    /// Both priors must be finite: a model missing either class is an error.
    pub fn log_priors(&self) -> ModelResult<(f64, f64)> {
        let stats = self.model.statistics();
        let total = stats.total_docs();
        if total == 0 {
            return Err(ModelError::UntrainedModel);
        }
        if stats.positive_docs == 0 {
            return Err(ModelError::SingleClassModel {
                missing: Label::Positive,
            });
        }
        if stats.negative_docs == 0 {
            return Err(ModelError::SingleClassModel {
                missing: Label::Negative,
            });
        }
        let total = total as f64;
        Ok((
            (stats.positive_docs as f64 / total).log10(),
            (stats.negative_docs as f64 / total).log10(),
        ))
    }

    /// Score `text` and apply the decision policy.
    pub fn score(&self, text: &str) -> ModelResult<Score> {
        let (log_prior_positive, log_prior_negative) = self.log_priors()?;

        let mut log_likelihood_positive = 0.0;
        let mut log_likelihood_negative = 0.0;
        let mut token_count = 0usize;
        for token in tokens(text) {
            let (pos, neg) = self.token_log_probabilities(&normalize(token));
            log_likelihood_positive += pos;
            log_likelihood_negative += neg;
            token_count += 1;
        }

        let decision = self.policy.decide(
            log_likelihood_positive + log_prior_positive,
            log_likelihood_negative + log_prior_negative,
            token_count,
        );
        let score = Score {
            log_likelihood_positive,
            log_likelihood_negative,
            log_prior_positive,
            log_prior_negative,
            token_count,
            decision,
        };
        tracing::debug!(
            decision = %score.decision,
            final_positive = score.final_positive(),
            final_negative = score.final_negative(),
            tokens = token_count,
            "scored document"
        );
        Ok(score)
    }

    pub fn classify(&self, text: &str) -> ModelResult<Sentiment> {
        self.score(text).map(|s| s.decision)
    }

    /// Classify many documents in parallel; results keep input order.
    pub fn classify_batch<S>(&self, texts: &[S]) -> ModelResult<Vec<Sentiment>>
    where
        S: AsRef<str> + Sync,
    {
        texts
            .par_iter()
            .map(|text| self.classify(text.as_ref()))
            .collect()
    }
}
