// thiserror's #[error("...{field}...")] format strings reference struct fields,
// but the compiler doesn't see through the derive macro and reports false positives.
#![allow(unused_assignments)]

//! # review-sentiment
//!
//! Naive Bayes sentiment polarity for free-text reviews: positive, negative,
//! or neutral.
//!
//! ## Architecture
//!
//! - **Tokenizer** (`tokenize`): word runs and single-symbol tokens, casing preserved
//! - **Frequency model** (`model`): per-class word tables under a uniform or
//!   punctuation/short-review weighting policy
//! - **Classifier** (`classify`): add-one smoothed log10 scores with a
//!   fixed-margin or length-biased neutrality band
//! - **Model store** (`store`): the trained artifact as one bincode blob
//! - **Engine** (`engine`): explicit train-or-load via [`engine::ModelSource`]
//!
//! ## Library usage
//!
//! ```no_run
//! use review_sentiment::config::SentimentConfig;
//! use review_sentiment::engine::{Engine, ModelSource};
//! use review_sentiment::model::{Label, LabeledDocument};
//!
//! let docs = vec![
//!     LabeledDocument::new("great-5-1.txt", "good good good", Label::Positive),
//!     LabeledDocument::new("bad-1-1.txt", "bad bad bad", Label::Negative),
//! ];
//! let engine = Engine::new(SentimentConfig::baseline(), ModelSource::Fresh(docs)).unwrap();
//! println!("{}", engine.classify("good good").unwrap());
//! ```

pub mod classify;
pub mod config;
pub mod corpus;
pub mod engine;
pub mod error;
pub mod model;
pub mod paths;
pub mod report;
pub mod store;
pub mod tokenize;
