//! Engine facade: top-level API for the review-sentiment system.
//!
//! The caller decides where the model comes from by passing a
//! [`ModelSource`]; the `Engine` then owns the immutable model and the
//! configuration and answers classification requests.

use std::path::{Path, PathBuf};
use crate::classify::{Classifier, Score, Sentiment};
use crate::config::SentimentConfig;
use crate::error::{ModelError, SentimentResult};
use crate::model::{Label, LabeledDocument, ModelArtifact, ModelSummary, Trainer};
use crate::store;

/// Where the engine's model comes from.
#[derive(Debug, Clone)]
pub enum ModelSource {
    /// Train on these documents.
    Fresh(Vec<LabeledDocument>),
    /// Load a previously saved artifact.
    Cached(PathBuf),
}

impl ModelSource {
    /// `Cached(artifact)` if the artifact exists, otherwise `Fresh` with the
    /// labeled documents of `training_dir`.
    pub fn cached_or_train(
        artifact: &Path,
        training_dir: Option<&Path>,
        config: &SentimentConfig,
    ) -> SentimentResult<Self> {
        if artifact.is_file() {
            return Ok(Self::Cached(artifact.to_path_buf()));
        }
        let Some(dir) = training_dir else {
            return Err(ModelError::NoModelSource {
                artifact: artifact.display().to_string(),
            }
            .into());
        };
        let listing = config.corpus_reader().read_labeled_dir(dir)?;
        Ok(Self::Fresh(listing.documents))
    }

    pub fn is_fresh(&self) -> bool {
        matches!(self, Self::Fresh(_))
    }
}

/// Heaviest tokens per class listed by [`Engine::info`].
const INFO_TOP_WORDS: usize = 10;

/// The review-sentiment engine.
pub struct Engine {
    config: SentimentConfig,
    model: ModelArtifact,
}

impl Engine {
    /// Build an engine, training or loading according to `source`.
    pub fn new(config: SentimentConfig, source: ModelSource) -> SentimentResult<Self> {
        config.validate()?;

        tracing::info!(
            weighting = %config.weighting,
            decision = %config.decision,
            fresh = source.is_fresh(),
            "initializing review-sentiment engine"
        );

        let model = match source {
            ModelSource::Fresh(documents) => Trainer::new(config.weighting)
                .train(documents.iter().map(LabeledDocument::as_pair))?,
            ModelSource::Cached(path) => store::load(&path)?,
        };
        Ok(Self::from_model(config, model))
    }

    /// Wrap an already-built model.
    pub fn from_model(config: SentimentConfig, model: ModelArtifact) -> Self {
        Self { config, model }
    }

    pub fn classifier(&self) -> Classifier<'_> {
        Classifier::new(&self.model, self.config.decision)
    }

    pub fn classify(&self, text: &str) -> SentimentResult<Sentiment> {
        Ok(self.classifier().classify(text)?)
    }

    pub fn score(&self, text: &str) -> SentimentResult<Score> {
        Ok(self.classifier().score(text)?)
    }

    /// Classify documents in parallel, preserving input order.
    pub fn classify_batch<S>(&self, texts: &[S]) -> SentimentResult<Vec<Sentiment>>
    where
        S: AsRef<str> + Sync,
    {
        Ok(self.classifier().classify_batch(texts)?)
    }

    /// Write the model artifact to `path`.
    pub fn persist(&self, path: &Path) -> SentimentResult<()> {
        Ok(store::save(&self.model, path)?)
    }

    pub fn model(&self) -> &ModelArtifact {
        &self.model
    }

    pub fn config(&self) -> &SentimentConfig {
        &self.config
    }

    pub fn info(&self) -> EngineInfo {
        EngineInfo {
            weighting: self.config.weighting.to_string(),
            decision: self.config.decision.to_string(),
            model: self.model.summary(),
            top_positive: self.top_words(Label::Positive),
            top_negative: self.top_words(Label::Negative),
        }
    }

    fn top_words(&self, label: Label) -> Vec<(String, f64)> {
        self.model
            .words(label)
            .map(|table| {
                table
                    .top(INFO_TOP_WORDS)
                    .into_iter()
                    .map(|(token, weight)| (token.to_owned(), weight))
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// Summary information about the engine state.
#[derive(Debug, Clone, serde::Serialize)]
pub struct EngineInfo {
    pub weighting: String,
    pub decision: String,
    pub model: ModelSummary,
    pub top_positive: Vec<(String, f64)>,
    pub top_negative: Vec<(String, f64)>,
}

impl std::fmt::Display for EngineInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "review-sentiment engine info")?;
        writeln!(f, "  weighting:   {}", self.weighting)?;
        writeln!(f, "  decision:    {}", self.decision)?;
        for line in self.model.to_string().lines() {
            writeln!(f, "  {line}")?;
        }
        writeln!(f, "  top positive: {}", format_words(&self.top_positive))?;
        writeln!(f, "  top negative: {}", format_words(&self.top_negative))?;
        Ok(())
    }
}

fn format_words(words: &[(String, f64)]) -> String {
    if words.is_empty() {
        return "-".into();
    }
    words
        .iter()
        .map(|(token, weight)| format!("{token} ({weight:.1})"))
        .collect::<Vec<_>>()
        .join(", ")
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("config", &self.config)
            .field("model", &self.model.summary())
            .finish()
    }
}
