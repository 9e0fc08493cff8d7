//! Model store: the trained [`ModelArtifact`] as a single opaque blob.
//!
//! The blob is a bincode envelope `{ magic, version, artifact }`. Decoding is
//! strict: wrong magic, unknown version, trailing bytes, or an artifact that
//! fails [`ModelArtifact::validate_shape`] all yield
//! [`StoreError::CorruptArtifact`]. A corrupt artifact is never replaced by a
//! fresh model behind the caller's back.

use std::path::Path;

use bincode::Options;
use serde::{Deserialize, Serialize};

use crate::error::StoreError;
use crate::model::ModelArtifact;

/// Result type for store operations.
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Leading bytes of every artifact.
const MAGIC: [u8; 4] = *b"NBSA";

/// Current envelope format.
const FORMAT_VERSION: u32 = 1;

/// Upper bound on decoded size; guards against absurd length prefixes.
const MAX_ARTIFACT_BYTES: u64 = 1 << 30;

/// Table sums may drift from the stored mass by float rounding only.
const MASS_DRIFT_TOLERANCE: f64 = 1e-6;

#[derive(Serialize)]
struct EnvelopeRef<'a> {
    magic: [u8; 4],
    version: u32,
    artifact: &'a ModelArtifact,
}

#[derive(Deserialize)]
struct Envelope {
    magic: [u8; 4],
    version: u32,
    artifact: ModelArtifact,
}

fn codec() -> impl Options {
    bincode::DefaultOptions::new()
        .with_fixint_encoding()
        .with_limit(MAX_ARTIFACT_BYTES)
        .reject_trailing_bytes()
}

/// Serialize an artifact to its blob form.
pub fn encode(artifact: &ModelArtifact) -> StoreResult<Vec<u8>> {
    let envelope = EnvelopeRef {
        magic: MAGIC,
        version: FORMAT_VERSION,
        artifact,
    };
    codec()
        .serialize(&envelope)
        .map_err(|e| StoreError::Serialization {
            message: format!("failed to serialize model artifact: {e}"),
        })
}

/// Deserialize a blob produced by [`encode`].
pub fn decode(bytes: &[u8]) -> StoreResult<ModelArtifact> {
    let envelope: Envelope =
        codec()
            .deserialize(bytes)
            .map_err(|e| StoreError::CorruptArtifact {
                message: format!("undecodable blob ({} bytes): {e}", bytes.len()),
            })?;

    if envelope.magic != MAGIC {
        return Err(StoreError::CorruptArtifact {
            message: format!("bad magic {:?}", envelope.magic),
        });
    }
    if envelope.version != FORMAT_VERSION {
        return Err(StoreError::CorruptArtifact {
            message: format!(
                "unsupported format version {} (expected {FORMAT_VERSION})",
                envelope.version
            ),
        });
    }

    let artifact = envelope.artifact;
    artifact
        .validate_shape()
        .map_err(|message| StoreError::CorruptArtifact { message })?;

    let (pos_drift, neg_drift) = artifact.mass_drift();
    let stats = artifact.statistics();
    if pos_drift > MASS_DRIFT_TOLERANCE * stats.positive_word_mass.max(1.0)
        || neg_drift > MASS_DRIFT_TOLERANCE * stats.negative_word_mass.max(1.0)
    {
        tracing::warn!(
            pos_drift,
            neg_drift,
            "artifact word tables do not sum to their stored word mass"
        );
    }

    Ok(artifact)
}

/// Write an artifact to `path`, creating parent directories.
pub fn save(artifact: &ModelArtifact, path: &Path) -> StoreResult<()> {
    let bytes = encode(artifact)?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| StoreError::Io {
            path: parent.display().to_string(),
            source: e,
        })?;
    }
    std::fs::write(path, &bytes).map_err(|e| StoreError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    tracing::info!(path = %path.display(), bytes = bytes.len(), "model artifact saved");
    Ok(())
}

/// Read and decode the artifact at `path`.
pub fn load(path: &Path) -> StoreResult<ModelArtifact> {
    let bytes = std::fs::read(path).map_err(|e| StoreError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    let artifact = decode(&bytes)?;
    tracing::info!(
        path = %path.display(),
        positive_docs = artifact.statistics().positive_docs,
        negative_docs = artifact.statistics().negative_docs,
        "model artifact loaded"
    );
    Ok(artifact)
}
