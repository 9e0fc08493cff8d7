//! Single-pass trainer building a [`ModelArtifact`] from labeled documents.

use crate::error::{ModelError, ModelResult};
use crate::tokenize::{normalize, tokens};

use super::{CorpusStatistics, Label, ModelArtifact, WeightingPolicy, WordFrequencyTable};

/// A document whose label was already resolved by the corpus collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabeledDocument {
    /// Source identifier (file name for directory corpora).
    pub id: String,
    pub text: String,
    pub label: Label,
}

impl LabeledDocument {
    pub fn new(id: impl Into<String>, text: impl Into<String>, label: Label) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            label,
        }
    }

    /// Borrow as the `(text, label)` pair consumed by [`Trainer::train`].
    pub fn as_pair(&self) -> (&str, Label) {
        (&self.text, self.label)
    }
}

/// Per-class accumulation state.
#[derive(Default)]
struct ClassAccumulator {
    words: WordFrequencyTable,
    docs: u64,
    mass: f64,
}

impl ClassAccumulator {
    fn absorb(&mut self, text: &str, policy: &WeightingPolicy) {
        let doc_tokens: Vec<&str> = tokens(text).collect();
        let doc_len = doc_tokens.len();

        self.docs += 1;
        for token in doc_tokens {
            let word = normalize(token);
            let weight = policy.weight(&word, doc_len);
            self.mass += weight;
            self.words.add(word, weight);
        }
    }
}

/// Builds frequency models under a fixed [`WeightingPolicy`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Trainer {
    policy: WeightingPolicy,
}

impl Trainer {
    pub fn new(policy: WeightingPolicy) -> Self {
        Self { policy }
    }

    /// Train on `(text, label)` pairs in one synchronous pass.
    ///
    /// Documents labeled [`Label::Other`] are skipped. Fails with
    /// [`ModelError::EmptyCorpus`] when no positive or negative document
    /// was seen.
    pub fn train<I, S>(&self, documents: I) -> ModelResult<ModelArtifact>
    where
        I: IntoIterator<Item = (S, Label)>,
        S: AsRef<str>,
    {
        let mut positive = ClassAccumulator::default();
        let mut negative = ClassAccumulator::default();
        let mut skipped = 0usize;

        for (text, label) in documents {
            match label {
                Label::Positive => positive.absorb(text.as_ref(), &self.policy),
                Label::Negative => negative.absorb(text.as_ref(), &self.policy),
                Label::Other => skipped += 1,
            }
        }

        if positive.docs + negative.docs == 0 {
            return Err(ModelError::EmptyCorpus { skipped });
        }

        tracing::info!(
            policy = %self.policy,
            positive_docs = positive.docs,
            negative_docs = negative.docs,
            skipped,
            positive_vocabulary = positive.words.len(),
            negative_vocabulary = negative.words.len(),
            "training complete"
        );

        let stats = CorpusStatistics {
            positive_docs: positive.docs,
            negative_docs: negative.docs,
            positive_word_mass: positive.mass,
            negative_word_mass: negative.mass,
        };
        Ok(ModelArtifact::from_parts(positive.words, negative.words, stats))
    }
}
