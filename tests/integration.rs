//! End-to-end tests: corpus directory → training → classification → evaluation.

use std::path::Path;

use review_sentiment::classify::{DecisionPolicy, Sentiment};
use review_sentiment::config::SentimentConfig;
use review_sentiment::engine::{Engine, ModelSource};
use review_sentiment::error::{ModelError, SentimentError};
use review_sentiment::model::{Label, LabeledDocument, Trainer, WeightingPolicy};
use review_sentiment::report;
use review_sentiment::tokenize::tokenize;

fn write_corpus(dir: &Path, files: &[(&str, &str)]) {
    std::fs::create_dir_all(dir).unwrap();
    for (name, text) in files {
        std::fs::write(dir.join(name), text).unwrap();
    }
}

fn engine_from_dir(config: SentimentConfig, dir: &Path) -> Engine {
    let listing = config.corpus_reader().read_labeled_dir(dir).unwrap();
    Engine::new(config, ModelSource::Fresh(listing.documents)).unwrap()
}

#[test]
fn tokenizer_examples() {
    assert_eq!(tokenize("don't stop-now!"), vec!["don't", "stop-now", "!"]);
    assert!(tokenize("  ").is_empty());
    let text = "Loved it... 10/10, would (re)watch";
    assert_eq!(tokenize(text), tokenize(text));
}

#[test]
fn train_from_directory_and_classify() {
    let dir = tempfile::TempDir::new().unwrap();
    write_corpus(
        dir.path(),
        &[
            ("great-5-1.txt", "good good good"),
            ("bad-1-1.txt", "bad bad bad"),
            ("meh-3-1.txt", "whatever whatever"),
            ("notes.txt", "no rating here"),
        ],
    );

    let engine = engine_from_dir(SentimentConfig::baseline(), dir.path());
    let stats = engine.model().statistics();
    assert_eq!(stats.positive_docs, 1);
    assert_eq!(stats.negative_docs, 1);
    assert!(!engine.model().positive_words().contains("whatever"));

    assert_eq!(engine.classify("good good").unwrap(), Sentiment::Positive);
    assert_eq!(engine.classify("bad bad").unwrap(), Sentiment::Negative);
    assert_eq!(engine.classify("xyz").unwrap(), Sentiment::Neutral);
}

#[test]
fn table_sums_match_word_mass() {
    let dir = tempfile::TempDir::new().unwrap();
    write_corpus(
        dir.path(),
        &[
            ("a-5-1.txt", "Great phone! Battery lasts, screen is sharp."),
            ("b-5-2.txt", "Wow!!"),
            (
                "c-1-1.txt",
                "The case cracked on day two, support never answered my emails, \
                 and the refund took a month. Avoid.",
            ),
            ("d-1-2.txt", "meh..."),
        ],
    );

    for config in [SentimentConfig::baseline(), SentimentConfig::tuned()] {
        let engine = engine_from_dir(config, dir.path());
        let model = engine.model();
        let stats = model.statistics();
        assert!((model.positive_words().total() - stats.positive_word_mass).abs() < 1e-9);
        assert!((model.negative_words().total() - stats.negative_word_mass).abs() < 1e-9);
    }
}

#[test]
fn punctuation_outweighs_short_review_discount() {
    let model = Trainer::new(WeightingPolicy::weighted())
        .train([("Wow!", Label::Positive), ("nope", Label::Negative)])
        .unwrap();

    assert_eq!(model.positive_words().get("!"), 1000.0);
    assert!((model.positive_words().get("wow") - 0.1).abs() < 1e-12);
    assert!((model.statistics().positive_word_mass - 1000.1).abs() < 1e-9);
}

#[test]
fn unseen_token_probability_is_finite() {
    let dir = tempfile::TempDir::new().unwrap();
    write_corpus(
        dir.path(),
        &[("great-5-1.txt", "good good good"), ("bad-1-1.txt", "bad bad bad")],
    );
    let engine = engine_from_dir(SentimentConfig::baseline(), dir.path());

    // Word mass 3 per class: log10(1 / 4).
    let floor = (1.0_f64 / 4.0).log10();
    let (pos, neg) = engine.classifier().token_log_probabilities("unheard-of");
    assert!(pos.is_finite() && neg.is_finite());
    assert!((pos - floor).abs() < 1e-12);
    assert!((neg - floor).abs() < 1e-12);
}

#[test]
fn no_labeled_documents_is_empty_corpus() {
    let dir = tempfile::TempDir::new().unwrap();
    write_corpus(dir.path(), &[("meh-3-1.txt", "fine"), ("readme", "hello")]);

    let config = SentimentConfig::baseline();
    let listing = config.corpus_reader().read_labeled_dir(dir.path()).unwrap();
    let result = Engine::new(config, ModelSource::Fresh(listing.documents));
    assert!(matches!(
        result,
        Err(SentimentError::Model(ModelError::EmptyCorpus { skipped: 2 }))
    ));
}

#[test]
fn length_bias_pushes_long_reviews_positive() {
    let docs = [("good good good", Label::Positive), ("bad bad bad", Label::Negative)];
    let model = Trainer::default().train(docs).unwrap();
    let long_unseen = "lorem ipsum dolor sit amet consectetur adipiscing elit";

    let fixed = SentimentConfig::baseline();
    let engine = Engine::from_model(fixed, model.clone());
    assert_eq!(engine.classify(long_unseen).unwrap(), Sentiment::Neutral);

    let biased = SentimentConfig {
        decision: DecisionPolicy::length_biased(),
        ..SentimentConfig::baseline()
    };
    let engine = Engine::from_model(biased, model);
    // 8 tokens * 0.12 = 0.96 > 0.01 with equal per-class likelihoods.
    assert_eq!(engine.classify(long_unseen).unwrap(), Sentiment::Positive);
}

#[test]
fn evaluate_directory() {
    let root = tempfile::TempDir::new().unwrap();
    let train = root.path().join("train");
    let test = root.path().join("test");
    write_corpus(
        &train,
        &[
            ("great-5-1.txt", "good good good"),
            ("bad-1-1.txt", "bad bad bad"),
        ],
    );
    write_corpus(
        &test,
        &[
            ("a-5-9.txt", "good good"),
            ("b-1-9.txt", "bad bad"),
            ("c-5-9.txt", "xyz"),
        ],
    );

    let config = SentimentConfig::baseline();
    let convention = config.rating_convention();
    let documents = config.corpus_reader().read_dir(&test).unwrap().documents;
    let engine = engine_from_dir(config, &train);
    let report = report::evaluate(&engine, &documents, &convention).unwrap();

    assert_eq!(report.results.len(), 3);
    assert_eq!(report.results[0].file, "a-5-9.txt");
    assert_eq!(report.results[0].sentiment, Sentiment::Positive);
    assert_eq!(report.results[1].sentiment, Sentiment::Negative);
    assert_eq!(report.results[2].sentiment, Sentiment::Neutral);
    assert_eq!(report.count(Sentiment::Neutral), 1);

    let text = report.to_string();
    assert!(text.starts_with("3 test reviews."));
    assert!(text.contains("File Classifications:"));
    assert!(text.contains("Results Summary:"));
}

#[test]
fn batch_matches_sequential() {
    let engine = Engine::new(
        SentimentConfig::tuned(),
        ModelSource::Fresh(vec![
            LabeledDocument::new(
                "great-5-1.txt",
                "good good good!",
                Label::Positive,
            ),
            LabeledDocument::new(
                "bad-1-1.txt",
                "bad bad bad.",
                Label::Negative,
            ),
        ]),
    )
    .unwrap();

    let inputs: Vec<String> = (0..64)
        .map(|i| match i % 3 {
            0 => format!("good {i}!"),
            1 => format!("bad {i}."),
            _ => format!("item {i}"),
        })
        .collect();
    let batch = engine.classify_batch(&inputs).unwrap();
    let sequential: Vec<Sentiment> = inputs.iter().map(|t| engine.classify(t).unwrap()).collect();
    assert_eq!(batch, sequential);
}
