//! XDG-compliant default locations for review-sentiment.
//!
//! The configuration file lives under `$XDG_CONFIG_HOME/review-sentiment/`
//! and the trained model under `$XDG_DATA_HOME/review-sentiment/`.

use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

const APP_DIR: &str = "review-sentiment";

/// Errors from path resolution.
#[derive(Debug, Clone, Error, Diagnostic)]
pub enum PathError {
    #[error("cannot determine home directory")]
    #[diagnostic(
        code(sentiment::paths::no_home),
        help(
            "Set the HOME environment variable, or pass `--artifact` and `--config` explicitly."
        )
    )]
    NoHome,
}

pub type PathResult<T> = std::result::Result<T, PathError>;

/// Resolved default directories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentimentPaths {
    /// `$XDG_CONFIG_HOME/review-sentiment/`
    pub config_dir: PathBuf,
    /// `$XDG_DATA_HOME/review-sentiment/`
    pub data_dir: PathBuf,
}

impl SentimentPaths {
    /// Resolve XDG directories from environment variables with standard fallbacks.
    pub fn resolve() -> PathResult<Self> {
        Self::resolve_with(|key| std::env::var(key).ok())
    }

    /// Resolve using a custom variable lookup.
    pub fn resolve_with(var: impl Fn(&str) -> Option<String>) -> PathResult<Self> {
        let home = var("HOME").map(PathBuf::from).ok_or(PathError::NoHome)?;

        let config_dir = var("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|| home.join(".config"))
            .join(APP_DIR);

        let data_dir = var("XDG_DATA_HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|| home.join(".local/share"))
            .join(APP_DIR);

        Ok(Self {
            config_dir,
            data_dir,
        })
    }

    /// Path to the global config file.
    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join("config.toml")
    }

    /// Default location of the trained model artifact.
    pub fn default_artifact(&self) -> PathBuf {
        self.data_dir.join("model.bin")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup(pairs: &'static [(&'static str, &'static str)]) -> impl Fn(&str) -> Option<String> {
        move |key: &str| {
            pairs
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| v.to_string())
        }
    }

    #[test]
    fn home_fallbacks() {
        let paths = SentimentPaths::resolve_with(lookup(&[("HOME", "/home/reviewer")])).unwrap();
        assert_eq!(
            paths.config_file(),
            PathBuf::from("/home/reviewer/.config/review-sentiment/config.toml")
        );
        assert_eq!(
            paths.default_artifact(),
            PathBuf::from("/home/reviewer/.local/share/review-sentiment/model.bin")
        );
    }

    #[test]
    fn xdg_overrides() {
        let paths = SentimentPaths::resolve_with(lookup(&[
            ("HOME", "/home/reviewer"),
            ("XDG_CONFIG_HOME", "/etc/xdg"),
            ("XDG_DATA_HOME", "/var/lib"),
        ]))
        .unwrap();
        assert_eq!(paths.config_dir, PathBuf::from("/etc/xdg/review-sentiment"));
        assert_eq!(paths.data_dir, PathBuf::from("/var/lib/review-sentiment"));
    }

    #[test]
    fn missing_home_is_an_error() {
        assert!(matches!(
            SentimentPaths::resolve_with(lookup(&[])),
            Err(PathError::NoHome)
        ));
    }
}
