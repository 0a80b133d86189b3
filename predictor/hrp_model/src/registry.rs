//! Per-domain model slots with lazy loading and atomic replacement.
//!
//! Each slot holds an `Arc<ModelHandle>`. Readers clone the `Arc` and score
//! without holding any lock, so a retrain that swaps the slot never disturbs
//! predictions already in flight; they finish on the handle they started with.

use crate::artifact::ArtifactStore;
use crate::classifier::Classifier;
use crate::dataset::DatasetLocator;
use crate::error::{ModelLoadError, TrainingError};
use crate::metadata::ArtifactMetadata;
use crate::training::{train, TrainedModel, TrainingConfig, TrainingReport};
use hrp_features::Domain;
use parking_lot::{Mutex, RwLock};
use serde::Serialize;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Instant;

/// An immutable, ready-to-score model.
#[derive(Debug)]
pub struct ModelHandle {
    metadata: ArtifactMetadata,
    classifier: Box<dyn Classifier>,
}

impl ModelHandle {
    pub fn new(metadata: ArtifactMetadata, classifier: Box<dyn Classifier>) -> Self {
        Self {
            metadata,
            classifier,
        }
    }

    pub fn domain(&self) -> Domain {
        self.metadata.domain
    }

    pub fn metadata(&self) -> &ArtifactMetadata {
        &self.metadata
    }

    pub fn classifier(&self) -> &dyn Classifier {
        self.classifier.as_ref()
    }

    pub fn threshold(&self) -> f64 {
        self.metadata.threshold
    }
}

#[derive(Default)]
struct Slot {
    current: RwLock<Option<Arc<ModelHandle>>>,
    /// Serializes disk loads and swaps so a load finishing late cannot
    /// overwrite a freshly trained handle.
    load_lock: Mutex<()>,
    train_lock: Mutex<()>,
    loads: AtomicUsize,
}

/// Reports from a full retrain of every domain.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrainingSummary {
    pub heart: TrainingReport,
    pub diabetes: TrainingReport,
}

pub struct ModelRegistry {
    store: ArtifactStore,
    locator: DatasetLocator,
    config: TrainingConfig,
    heart: Slot,
    diabetes: Slot,
}

impl ModelRegistry {
    pub fn new(store: ArtifactStore, locator: DatasetLocator, config: TrainingConfig) -> Self {
        Self {
            store,
            locator,
            config,
            heart: Slot::default(),
            diabetes: Slot::default(),
        }
    }

    fn slot(&self, domain: Domain) -> &Slot {
        match domain {
            Domain::Heart => &self.heart,
            Domain::Diabetes => &self.diabetes,
        }
    }

    pub fn store(&self) -> &ArtifactStore {
        &self.store
    }

    pub fn config(&self) -> &TrainingConfig {
        &self.config
    }

    /// The model for `domain`, loading it from disk on first use.
    ///
    /// Concurrent first calls perform a single load. A failed load leaves
    /// the slot empty so the next call tries again.
    pub fn get(&self, domain: Domain) -> Result<Arc<ModelHandle>, ModelLoadError> {
        let slot = self.slot(domain);
        if let Some(handle) = slot.current.read().as_ref() {
            return Ok(Arc::clone(handle));
        }

        let _loading = slot.load_lock.lock();
        if let Some(handle) = slot.current.read().as_ref() {
            return Ok(Arc::clone(handle));
        }

        let started = Instant::now();
        let handle = match self.store.load(domain) {
            Ok(artifact) => Arc::new(artifact.into_handle()),
            Err(e) => {
                log::warn!("{domain} model unavailable: {e}");
                return Err(e);
            }
        };
        slot.loads.fetch_add(1, Ordering::Relaxed);
        *slot.current.write() = Some(Arc::clone(&handle));
        log::info!(
            "{domain} model loaded from {} in {:?} ({}, trained {})",
            self.store.path_for(domain).display(),
            started.elapsed(),
            handle.metadata().model_type,
            handle.metadata().trained_at
        );
        Ok(handle)
    }

    /// The currently installed model, without touching the disk.
    pub fn current(&self, domain: Domain) -> Option<Arc<ModelHandle>> {
        self.slot(domain).current.read().clone()
    }

    pub fn is_loaded(&self, domain: Domain) -> bool {
        self.slot(domain).current.read().is_some()
    }

    /// Number of successful disk loads for `domain`.
    pub fn load_count(&self, domain: Domain) -> usize {
        self.slot(domain).loads.load(Ordering::Relaxed)
    }

    /// Install `handle` as the model for its domain.
    pub fn publish(&self, handle: ModelHandle) -> Arc<ModelHandle> {
        let handle = Arc::new(handle);
        let slot = self.slot(handle.domain());
        let _loading = slot.load_lock.lock();
        *slot.current.write() = Some(Arc::clone(&handle));
        handle
    }

    /// Train a fresh model for `domain`, persist it and swap it in.
    ///
    /// Training and persistence run without blocking readers. On any
    /// failure the previous model remains installed.
    pub fn retrain(&self, domain: Domain) -> Result<TrainingReport, TrainingError> {
        let slot = self.slot(domain);
        let _training = slot.train_lock.lock();

        let dataset =
            self.locator
                .load(domain, self.config.synthetic_rows(domain), self.config.seed)?;
        let TrainedModel { artifact, report } = train(&dataset, &self.config)?;
        self.store.save(&artifact)?;
        self.publish(artifact.into_handle());
        Ok(report)
    }

    /// Retrain every domain in turn, stopping at the first failure.
    ///
    /// Models swapped in before the failure stay in service; the error
    /// names the failing domain and lists them.
    pub fn retrain_all(&self) -> Result<TrainingSummary, TrainingError> {
        let heart = self.retrain_step(Domain::Heart, &[])?;
        let diabetes = self.retrain_step(Domain::Diabetes, &[Domain::Heart])?;
        Ok(TrainingSummary { heart, diabetes })
    }

    fn retrain_step(
        &self,
        domain: Domain,
        replaced: &[Domain],
    ) -> Result<TrainingReport, TrainingError> {
        self.retrain(domain).map_err(|e| {
            log::warn!("{domain} retrain failed after replacing {replaced:?}: {e}");
            TrainingError::Stopped {
                domain,
                replaced: replaced.to_vec(),
                source: Box::new(e),
            }
        })
    }
}

impl std::fmt::Debug for ModelRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelRegistry")
            .field("store", &self.store)
            .field("heart_loaded", &self.is_loaded(Domain::Heart))
            .field("diabetes_loaded", &self.is_loaded(Domain::Diabetes))
            .finish()
    }
}
