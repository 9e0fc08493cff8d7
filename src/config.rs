//! Engine configuration, persisted as TOML.
//!
//! Configuration is an immutable value: build it once (defaults, a preset,
//! or a file), then hand it to [`Engine::new`](crate::engine::Engine::new).

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::classify::DecisionPolicy;
use crate::corpus::{CorpusReader, RatingConvention};
use crate::error::{ConfigError, ConfigResult};
use crate::model::WeightingPolicy;

/// Default cap on a single document read from disk (1 MiB).
pub const DEFAULT_MAX_DOCUMENT_BYTES: u64 = 1 << 20;

/// Full engine configuration.
///
/// Scalar fields come before the policy tables so the TOML output stays valid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentConfig {
    /// Directory of labeled reviews used when no artifact exists.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub training_dir: Option<PathBuf>,
    /// Where the trained model is stored. `None` uses the XDG data directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artifact_path: Option<PathBuf>,
    /// Rating segment value marking a positive review.
    #[serde(default = "default_top_rating")]
    pub top_rating: String,
    /// Rating segment value marking a negative review.
    #[serde(default = "default_bottom_rating")]
    pub bottom_rating: String,
    /// Documents larger than this are skipped (training) or rejected.
    #[serde(default = "default_max_document_bytes")]
    pub max_document_bytes: u64,
    #[serde(default)]
    pub weighting: WeightingPolicy,
    #[serde(default)]
    pub decision: DecisionPolicy,
}

fn default_top_rating() -> String {
    "5".into()
}
fn default_bottom_rating() -> String {
    "1".into()
}
fn default_max_document_bytes() -> u64 {
    DEFAULT_MAX_DOCUMENT_BYTES
}

impl Default for SentimentConfig {
    fn default() -> Self {
        Self::baseline()
    }
}

impl SentimentConfig {
    /// Uniform weighting with the fixed 0.2 margin.
    pub fn baseline() -> Self {
        Self {
            training_dir: None,
            artifact_path: None,
            top_rating: default_top_rating(),
            bottom_rating: default_bottom_rating(),
            max_document_bytes: default_max_document_bytes(),
            weighting: WeightingPolicy::Uniform,
            decision: DecisionPolicy::fixed_margin(),
        }
    }

    /// Punctuation/short-review weighting with the length-biased decision.
    pub fn tuned() -> Self {
        Self {
            weighting: WeightingPolicy::weighted(),
            decision: DecisionPolicy::length_biased(),
            ..Self::baseline()
        }
    }

    pub fn rating_convention(&self) -> RatingConvention {
        RatingConvention::new(self.top_rating.clone(), self.bottom_rating.clone())
    }

    pub fn corpus_reader(&self) -> CorpusReader {
        CorpusReader::new(self.rating_convention(), self.max_document_bytes)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        self.weighting
            .validate()
            .and_then(|_| self.decision.validate())
            .map_err(|message| ConfigError::Invalid { message })?;
        if self.top_rating == self.bottom_rating {
            return Err(ConfigError::Invalid {
                message: format!(
                    "top_rating and bottom_rating are both \"{}\"",
                    self.top_rating
                ),
            });
        }
        if self.max_document_bytes == 0 {
            return Err(ConfigError::Invalid {
                message: "max_document_bytes must be > 0".into(),
            });
        }
        Ok(())
    }

    /// Load from a TOML file.
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            source: e,
        })?;
        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Render as pretty TOML.
    pub fn to_toml(&self) -> ConfigResult<String> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Parse {
            path: "<memory>".into(),
            message: e.to_string(),
        })
    }

    /// Save to a TOML file.
    pub fn save(&self, path: &Path) -> ConfigResult<()> {
        let content = self.to_toml()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::Write {
                path: parent.display().to_string(),
                source: e,
            })?;
        }
        std::fs::write(path, content).map_err(|e| ConfigError::Write {
            path: path.display().to_string(),
            source: e,
        })
    }
}
