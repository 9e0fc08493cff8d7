//! Rich diagnostic error types for the review-sentiment engine.
//!
//! Each subsystem defines its own error type with miette `#[diagnostic]` derives,
//! providing error codes, help text, and source chains so users know exactly what
//! went wrong and how to fix it.

use miette::Diagnostic;
use thiserror::Error;

use crate::model::Label;
use crate::paths::PathError;

/// Top-level error type for the review-sentiment engine.
///
/// Each variant wraps a subsystem-specific error, preserving the full diagnostic
/// chain (error codes, help text, sources) through to the user.
#[derive(Debug, Error, Diagnostic)]
pub enum SentimentError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Model(#[from] ModelError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Corpus(#[from] CorpusError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Path(#[from] PathError),
}

// ---------------------------------------------------------------------------
// Model errors (training + classification)
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum ModelError {
    #[error("training corpus has no positive or negative documents ({skipped} unlabeled skipped)")]
    #[diagnostic(
        code(sentiment::model::empty_corpus),
        help(
            "Only documents whose file name carries the top or bottom rating segment \
             (e.g. `title-5-12.txt` or `title-1-7.txt`) are used for training. \
             Check the training directory and the `top_rating`/`bottom_rating` settings."
        )
    )]
    EmptyCorpus { skipped: usize },

    #[error("model is untrained: both document counters are zero")]
    #[diagnostic(
        code(sentiment::model::untrained),
        help(
            "Class priors cannot be computed without at least one labeled document. \
             Train on a corpus with positive or negative reviews, or load a valid artifact."
        )
    )]
    UntrainedModel,

    #[error("model has no {missing} documents; its class prior is undefined")]
    #[diagnostic(
        code(sentiment::model::single_class),
        help(
            "Both classes need at least one training document. Add reviews rated \
             with the missing rating to the training directory and retrain."
        )
    )]
    SingleClassModel { missing: Label },

    #[error("no model artifact at {artifact} and no training directory given")]
    #[diagnostic(
        code(sentiment::model::no_source),
        help(
            "Pass `--train-dir <DIR>` (or set `training_dir` in the config) so the model \
             can be trained, or point `--artifact` at an existing model."
        )
    )]
    NoModelSource { artifact: String },
}

// ---------------------------------------------------------------------------
// Store errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum StoreError {
    #[error("I/O error on {path}: {source}")]
    #[diagnostic(
        code(sentiment::store::io),
        help(
            "A filesystem operation on the model artifact failed. Check that the \
             directory exists, has correct permissions, and that the disk is not full."
        )
    )]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("corrupt model artifact: {message}")]
    #[diagnostic(
        code(sentiment::store::corrupt),
        help(
            "The artifact does not decode into the expected six-field model. \
             Delete it and retrain with `review-sentiment train`."
        )
    )]
    CorruptArtifact { message: String },

    #[error("serialization error: {message}")]
    #[diagnostic(
        code(sentiment::store::serde),
        help("Failed to serialize the trained model. This is a bug; please file a report.")
    )]
    Serialization { message: String },
}

// ---------------------------------------------------------------------------
// Corpus errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum CorpusError {
    #[error("cannot read corpus directory {path}")]
    #[diagnostic(
        code(sentiment::corpus::read_dir),
        help("Check that the directory exists and is readable.")
    )]
    ReadDir {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot read document {path}")]
    #[diagnostic(
        code(sentiment::corpus::read_document),
        help("The document must be a readable UTF-8 text file.")
    )]
    ReadDocument {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("document {path} is {size} bytes, limit is {limit}")]
    #[diagnostic(
        code(sentiment::corpus::too_large),
        help("Raise `max_document_bytes` in the configuration if this document is legitimate.")
    )]
    DocumentTooLarge { path: String, size: u64, limit: u64 },
}

// ---------------------------------------------------------------------------
// Configuration errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    #[error("failed to read config: {path}")]
    #[diagnostic(
        code(sentiment::config::read),
        help("Ensure the config file exists and is readable.")
    )]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {path}: {message}")]
    #[diagnostic(
        code(sentiment::config::parse),
        help("Check the TOML syntax. Policy tables need a `kind` key.")
    )]
    Parse { path: String, message: String },

    #[error("failed to write config: {path}")]
    #[diagnostic(
        code(sentiment::config::write),
        help("Ensure you have write permissions to the config directory.")
    )]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid configuration: {message}")]
    #[diagnostic(
        code(sentiment::config::invalid),
        help("Weights and thresholds must be finite; weights must not be negative.")
    )]
    Invalid { message: String },
}

/// Convenience result type for model operations.
pub type ModelResult<T> = std::result::Result<T, ModelError>;

/// Convenience result type for corpus operations.
pub type CorpusResult<T> = std::result::Result<T, CorpusError>;

/// Convenience result type for configuration operations.
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Top-level result type.
pub type SentimentResult<T> = std::result::Result<T, SentimentError>;
