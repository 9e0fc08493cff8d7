//! Directory corpora and the file-name rating convention.
//!
//! Review files are named `<title>-<rating>-<id>.txt`. The second `-`-separated
//! segment is the rating: the configured top value labels a review positive,
//! the bottom value negative, anything else (or a missing segment) is
//! [`Label::Other`]. Only regular files (or symlinks to them) directly inside
//! the directory are read, in file-name order.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{CorpusError, CorpusResult};
use crate::model::{Label, LabeledDocument};

/// Rating segment values that select training labels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatingConvention {
    pub top: String,
    pub bottom: String,
}

impl Default for RatingConvention {
    fn default() -> Self {
        Self {
            top: "5".into(),
            bottom: "1".into(),
        }
    }
}

impl RatingConvention {
    pub fn new(top: impl Into<String>, bottom: impl Into<String>) -> Self {
        Self {
            top: top.into(),
            bottom: bottom.into(),
        }
    }

    /// Label derived from a file name such as `movie-5-17.txt`.
    pub fn label_for(&self, file_name: &str) -> Label {
        match file_name.split('-').nth(1) {
            Some(rating) if rating == self.top => Label::Positive,
            Some(rating) if rating == self.bottom => Label::Negative,
            _ => Label::Other,
        }
    }
}

/// A file that was left out of a corpus, with the reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub reason: String,
}

/// Documents read from a directory plus the files that had to be skipped.
#[derive(Debug, Clone)]
pub struct CorpusListing<T> {
    pub documents: Vec<T>,
    pub skipped: Vec<SkippedFile>,
}

impl<T> Default for CorpusListing<T> {
    fn default() -> Self {
        Self {
            documents: Vec::new(),
            skipped: Vec::new(),
        }
    }
}

/// A raw, unlabeled document: file name and text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawDocument {
    pub name: String,
    pub text: String,
}

/// Reads review directories with a document size bound.
#[derive(Debug, Clone)]
pub struct CorpusReader {
    convention: RatingConvention,
    max_document_bytes: u64,
}

impl CorpusReader {
    pub fn new(convention: RatingConvention, max_document_bytes: u64) -> Self {
        Self {
            convention,
            max_document_bytes,
        }
    }

    pub fn convention(&self) -> &RatingConvention {
        &self.convention
    }

    /// Read one document, refusing files above the size bound.
    pub fn read_document(&self, path: &Path) -> CorpusResult<String> {
        let meta = std::fs::metadata(path).map_err(|e| CorpusError::ReadDocument {
            path: path.display().to_string(),
            source: e,
        })?;
        if meta.len() > self.max_document_bytes {
            return Err(CorpusError::DocumentTooLarge {
                path: path.display().to_string(),
                size: meta.len(),
                limit: self.max_document_bytes,
            });
        }
        std::fs::read_to_string(path).map_err(|e| CorpusError::ReadDocument {
            path: path.display().to_string(),
            source: e,
        })
    }

    /// Read every top-level file in `dir`. Unreadable files are skipped with a warning.
    pub fn read_dir(&self, dir: &Path) -> CorpusResult<CorpusListing<RawDocument>> {
        let mut listing = CorpusListing::default();
        for path in list_files(dir, &mut listing.skipped)? {
            let Some(name) = path.file_name().and_then(|n| n.to_str()).map(str::to_owned) else {
                skip(&mut listing.skipped, path, "file name is not valid UTF-8".into());
                continue;
            };
            match self.read_document(&path) {
                Ok(text) => listing.documents.push(RawDocument { name, text }),
                Err(e) => skip(&mut listing.skipped, path, e.to_string()),
            }
        }
        tracing::info!(
            dir = %dir.display(),
            documents = listing.documents.len(),
            skipped = listing.skipped.len(),
            "corpus read"
        );
        Ok(listing)
    }

    /// Read `dir` and attach labels from the rating convention.
    pub fn read_labeled_dir(&self, dir: &Path) -> CorpusResult<CorpusListing<LabeledDocument>> {
        let raw = self.read_dir(dir)?;
        let documents = raw
            .documents
            .into_iter()
            .map(|doc| {
                let label = self.convention.label_for(&doc.name);
                LabeledDocument {
                    id: doc.name,
                    text: doc.text,
                    label,
                }
            })
            .collect();
        Ok(CorpusListing {
            documents,
            skipped: raw.skipped,
        })
    }
}

fn skip(skipped: &mut Vec<SkippedFile>, path: PathBuf, reason: String) {
    tracing::warn!(path = %path.display(), %reason, "skipping document");
    skipped.push(SkippedFile { path, reason });
}

/// Regular files directly inside `dir` (symlinks followed), sorted by path.
/// Entries that cannot be inspected or are not files go to `skipped`.
fn list_files(dir: &Path, skipped: &mut Vec<SkippedFile>) -> CorpusResult<Vec<PathBuf>> {
    let entries = std::fs::read_dir(dir).map_err(|e| CorpusError::ReadDir {
        path: dir.display().to_string(),
        source: e,
    })?;
    let mut files = Vec::new();
    for entry in entries {
        let path = match entry {
            Ok(entry) => entry.path(),
            Err(e) => {
                skip(skipped, dir.to_path_buf(), format!("unreadable directory entry: {e}"));
                continue;
            }
        };
        match std::fs::metadata(&path) {
            Ok(meta) if meta.is_file() => files.push(path),
            Ok(_) => skip(skipped, path, "not a regular file".into()),
            Err(e) => skip(skipped, path, format!("cannot stat: {e}")),
        }
    }
    files.sort();
    skipped.sort_by(|a, b| a.path.cmp(&b.path));
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn reader() -> CorpusReader {
        CorpusReader::new(RatingConvention::default(), 1024)
    }

    #[test]
    fn labels_from_rating_segment() {
        let conv = RatingConvention::default();
        assert_eq!(conv.label_for("great-5-1.txt"), Label::Positive);
        assert_eq!(conv.label_for("bad-1-1.txt"), Label::Negative);
        assert_eq!(conv.label_for("meh-3-9.txt"), Label::Other);
        assert_eq!(conv.label_for("noratings.txt"), Label::Other);
        assert_eq!(conv.label_for("movie-15-2.txt"), Label::Other);
    }

    #[test]
    fn custom_rating_values() {
        let conv = RatingConvention::new("10", "0");
        assert_eq!(conv.label_for("x-10-1.txt"), Label::Positive);
        assert_eq!(conv.label_for("x-0-1.txt"), Label::Negative);
        assert_eq!(conv.label_for("x-5-1.txt"), Label::Other);
    }

    #[test]
    fn reads_top_level_files_sorted() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("b-1-1.txt"), "bad bad").unwrap();
        std::fs::write(dir.path().join("a-5-1.txt"), "good good").unwrap();
        std::fs::write(dir.path().join("c-3-1.txt"), "okay").unwrap();
        std::fs::create_dir(dir.path().join("nested")).unwrap();
        std::fs::write(dir.path().join("nested").join("d-5-1.txt"), "hidden").unwrap();

        let listing = reader().read_labeled_dir(dir.path()).unwrap();
        let ids: Vec<&str> = listing.documents.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec!["a-5-1.txt", "b-1-1.txt", "c-3-1.txt"]);
        assert_eq!(listing.documents[0].label, Label::Positive);
        assert_eq!(listing.documents[1].label, Label::Negative);
        assert_eq!(listing.documents[2].label, Label::Other);
        assert_eq!(listing.skipped.len(), 1);
        assert_eq!(listing.skipped[0].path, dir.path().join("nested"));
        assert_eq!(listing.skipped[0].reason, "not a regular file");
    }

    #[cfg(unix)]
    #[test]
    fn symlinked_reviews_are_read() {
        let store = TempDir::new().unwrap();
        let target = store.path().join("great-5-1.txt");
        std::fs::write(&target, "good good good").unwrap();

        let dir = TempDir::new().unwrap();
        std::os::unix::fs::symlink(&target, dir.path().join("great-5-1.txt")).unwrap();
        std::os::unix::fs::symlink(store.path().join("absent"), dir.path().join("gone-1-1.txt"))
            .unwrap();

        let listing = reader().read_labeled_dir(dir.path()).unwrap();
        assert_eq!(listing.documents.len(), 1);
        assert_eq!(listing.documents[0].id, "great-5-1.txt");
        assert_eq!(listing.documents[0].label, Label::Positive);
        assert_eq!(listing.documents[0].text, "good good good");

        assert_eq!(listing.skipped.len(), 1);
        assert_eq!(listing.skipped[0].path, dir.path().join("gone-1-1.txt"));
        assert!(listing.skipped[0].reason.starts_with("cannot stat"));
    }

    #[test]
    fn oversized_and_non_utf8_files_are_skipped() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("big-5-1.txt"), "x".repeat(2048)).unwrap();
        std::fs::write(dir.path().join("bin-1-1.txt"), [0xff, 0xfe, 0x00]).unwrap();
        std::fs::write(dir.path().join("ok-5-2.txt"), "fine").unwrap();

        let listing = reader().read_dir(dir.path()).unwrap();
        assert_eq!(listing.documents.len(), 1);
        assert_eq!(listing.documents[0].name, "ok-5-2.txt");
        assert_eq!(listing.skipped.len(), 2);
    }

    #[test]
    fn single_document_size_bound() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("big.txt");
        std::fs::write(&path, "y".repeat(2048)).unwrap();
        assert!(matches!(
            reader().read_document(&path),
            Err(CorpusError::DocumentTooLarge { size: 2048, limit: 1024, .. })
        ));
    }

    #[test]
    fn missing_directory_is_an_error() {
        let dir = TempDir::new().unwrap();
        assert!(matches!(
            reader().read_dir(&dir.path().join("absent")),
            Err(CorpusError::ReadDir { .. })
        ));
    }
}
