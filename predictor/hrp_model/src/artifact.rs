//! On-disk model artifacts.
//!
//! One JSON document per domain under the model directory. Writes go to a
//! sibling temp file that is renamed over the target, so a reader never sees
//! a half-written artifact.

use crate::classifier::{Classifier, LogisticClassifier};
use crate::error::{ModelLoadError, TrainingError};
use crate::metadata::ArtifactMetadata;
use crate::registry::ModelHandle;
use hrp_features::{schema_for, Domain};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelArtifact {
    pub metadata: ArtifactMetadata,
    pub classifier: LogisticClassifier,
}

impl ModelArtifact {
    /// Check that the artifact can score vectors of `domain`.
    pub fn check(&self, domain: Domain) -> Result<(), String> {
        if self.metadata.domain != domain {
            return Err(format!("artifact was trained for {}", self.metadata.domain));
        }
        let schema = schema_for(domain);
        let expected = schema.names();
        if self.metadata.feature_names.len() != expected.len()
            || self.classifier.n_features() != expected.len()
        {
            return Err(format!(
                "expected {} features, artifact has {} names and {} weights",
                expected.len(),
                self.metadata.feature_names.len(),
                self.classifier.n_features()
            ));
        }
        if let Some((got, want)) = self
            .metadata
            .feature_names
            .iter()
            .zip(&expected)
            .find(|(got, want)| got.as_str() != **want)
        {
            return Err(format!("feature '{got}' where '{want}' was expected"));
        }
        if !(0.0..=1.0).contains(&self.metadata.threshold) {
            return Err(format!("threshold {} outside [0, 1]", self.metadata.threshold));
        }
        Ok(())
    }

    pub fn into_handle(self) -> ModelHandle {
        ModelHandle::new(self.metadata, Box::new(self.classifier))
    }
}

#[derive(Debug, Clone)]
pub struct ArtifactStore {
    dir: PathBuf,
}

impl ArtifactStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, domain: Domain) -> PathBuf {
        self.dir.join(domain.artifact_file_name())
    }

    pub fn exists(&self, domain: Domain) -> bool {
        self.path_for(domain).is_file()
    }

    pub fn load(&self, domain: Domain) -> Result<ModelArtifact, ModelLoadError> {
        let path = self.path_for(domain);
        let bytes = fs::read(&path).map_err(|source| match source.kind() {
            io::ErrorKind::NotFound => ModelLoadError::NotFound {
                domain,
                path: path.clone(),
            },
            _ => ModelLoadError::Io {
                path: path.clone(),
                source,
            },
        })?;
        let artifact: ModelArtifact =
            serde_json::from_slice(&bytes).map_err(|source| ModelLoadError::Corrupt {
                path: path.clone(),
                source,
            })?;
        artifact
            .check(domain)
            .map_err(|reason| ModelLoadError::Mismatch {
                domain,
                path: path.clone(),
                reason,
            })?;
        log::debug!("loaded {domain} artifact from {}", path.display());
        Ok(artifact)
    }

    /// Persist `artifact`, replacing any previous one for its domain.
    pub fn save(&self, artifact: &ModelArtifact) -> Result<PathBuf, TrainingError> {
        let domain = artifact.metadata.domain;
        let path = self.path_for(domain);
        let json = serde_json::to_vec_pretty(artifact)
            .map_err(|source| TrainingError::Serialize { domain, source })?;

        let persist = |source| TrainingError::Persist {
            path: path.clone(),
            source,
        };
        fs::create_dir_all(&self.dir).map_err(persist)?;
        let tmp = self
            .dir
            .join(format!(".{}.tmp", domain.artifact_file_name()));
        let write = || -> io::Result<()> {
            let mut file = fs::File::create(&tmp)?;
            file.write_all(&json)?;
            file.sync_all()?;
            fs::rename(&tmp, &path)
        };
        if let Err(e) = write() {
            let _ = fs::remove_file(&tmp);
            return Err(persist(e));
        }
        log::info!("saved {domain} artifact to {}", path.display());
        Ok(path)
    }
}
