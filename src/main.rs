//! review-sentiment CLI: train, classify and evaluate review polarity.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use miette::{IntoDiagnostic, Result};

use review_sentiment::config::SentimentConfig;
use review_sentiment::engine::{Engine, ModelSource};
use review_sentiment::paths::SentimentPaths;
use review_sentiment::report;

#[derive(Parser)]
#[command(name = "review-sentiment", version, about = "Naive Bayes review sentiment classifier")]
struct Cli {
    /// Configuration file (defaults to the XDG config file when present).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Built-in parameter preset used when no config file is found.
    #[arg(long, global = true, value_enum, default_value = "baseline")]
    preset: Preset,

    /// Model artifact path (overrides the config file).
    #[arg(long, global = true)]
    artifact: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum Preset {
    /// Uniform weighting, fixed 0.2 margin.
    Baseline,
    /// Punctuation/short-review weighting, length-biased decision.
    Tuned,
}

#[derive(Subcommand)]
enum Commands {
    /// Train on a directory of rated reviews and write the model artifact.
    Train {
        /// Directory of `<name>-<rating>-<id>.txt` files.
        #[arg(long)]
        dir: PathBuf,
    },

    /// Classify one review.
    Classify {
        /// Review text.
        #[arg(long, conflicts_with = "file", required_unless_present = "file")]
        text: Option<String>,

        /// Read the review from a file.
        #[arg(long)]
        file: Option<PathBuf>,

        /// Train from this directory if no artifact exists yet.
        #[arg(long)]
        train_dir: Option<PathBuf>,

        /// Print log-likelihoods and priors behind the decision.
        #[arg(long)]
        explain: bool,
    },

    /// Classify every file in a directory and print a summary.
    Evaluate {
        /// Directory of reviews to classify.
        #[arg(long)]
        dir: PathBuf,

        /// Train from this directory if no artifact exists yet.
        #[arg(long)]
        train_dir: Option<PathBuf>,

        /// Emit the report as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Show model and policy information.
    Info {
        /// Emit as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Print the effective configuration as TOML.
    Config {
        /// Also write it to the config file location.
        #[arg(long)]
        write: bool,
    },
}

fn main() -> Result<()> {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(3)
                .build(),
        )
    }))
    .ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let paths = SentimentPaths::resolve();

    let config_file = match (&cli.config, &paths) {
        (Some(path), _) => Some(path.clone()),
        (None, Ok(paths)) => Some(paths.config_file()).filter(|p| p.is_file()),
        (None, Err(_)) => None,
    };
    let config = match &config_file {
        Some(path) => SentimentConfig::load(path).into_diagnostic()?,
        None => match cli.preset {
            Preset::Baseline => SentimentConfig::baseline(),
            Preset::Tuned => SentimentConfig::tuned(),
        },
    };

    let artifact = match cli.artifact.clone().or_else(|| config.artifact_path.clone()) {
        Some(path) => path,
        None => paths
            .as_ref()
            .map(SentimentPaths::default_artifact)
            .map_err(|e| miette::Report::new(e.clone()))?,
    };

    match cli.command {
        Commands::Train { dir } => {
            let listing = config.corpus_reader().read_labeled_dir(&dir).into_diagnostic()?;
            for skipped in &listing.skipped {
                eprintln!("skipped {}: {}", skipped.path.display(), skipped.reason);
            }
            let engine =
                Engine::new(config, ModelSource::Fresh(listing.documents)).into_diagnostic()?;
            engine.persist(&artifact).into_diagnostic()?;
            println!("Trained model written to {}", artifact.display());
            println!("{}", engine.info());
        }

        Commands::Classify {
            text,
            file,
            train_dir,
            explain,
        } => {
            let text = match (text, file) {
                (Some(text), _) => text,
                (None, Some(file)) => config
                    .corpus_reader()
                    .read_document(&file)
                    .into_diagnostic()?,
                (None, None) => miette::bail!("pass --text or --file"),
            };
            let engine = open_engine(config, &artifact, train_dir)?;
            if explain {
                println!("{}", engine.score(&text).into_diagnostic()?);
            } else {
                println!("{}", engine.classify(&text).into_diagnostic()?);
            }
        }

        Commands::Evaluate {
            dir,
            train_dir,
            json,
        } => {
            let reader = config.corpus_reader();
            let listing = reader.read_dir(&dir).into_diagnostic()?;
            let engine = open_engine(config, &artifact, train_dir)?;
            let report = report::evaluate(&engine, &listing.documents, reader.convention())
                .into_diagnostic()?;
            if json {
                let out = serde_json::to_string_pretty(&report).into_diagnostic()?;
                println!("{out}");
            } else {
                print!("{report}");
            }
        }

        Commands::Info { json } => {
            let engine = Engine::new(config, ModelSource::Cached(artifact)).into_diagnostic()?;
            let info = engine.info();
            if json {
                let out = serde_json::to_string_pretty(&info).into_diagnostic()?;
                println!("{out}");
            } else {
                print!("{info}");
            }
        }

        Commands::Config { write } => {
            print!("{}", config.to_toml().into_diagnostic()?);
            if write {
                let target = match (cli.config, paths) {
                    (Some(path), _) => path,
                    (None, paths) => paths.map_err(miette::Report::new)?.config_file(),
                };
                config.save(&target).into_diagnostic()?;
                eprintln!("Configuration written to {}", target.display());
            }
        }
    }

    Ok(())
}

/// Load the artifact if it exists, otherwise train from `train_dir` (or the
/// configured training directory) and persist the result.
fn open_engine(
    config: SentimentConfig,
    artifact: &Path,
    train_dir: Option<PathBuf>,
) -> Result<Engine> {
    let train_dir = train_dir.or_else(|| config.training_dir.clone());
    let source =
        ModelSource::cached_or_train(artifact, train_dir.as_deref(), &config).into_diagnostic()?;
    let fresh = source.is_fresh();
    let engine = Engine::new(config, source).into_diagnostic()?;
    if fresh {
        engine.persist(artifact).into_diagnostic()?;
    }
    Ok(engine)
}
