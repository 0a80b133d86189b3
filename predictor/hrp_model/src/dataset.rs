//! Training tables: CSV files on disk or a generated synthetic cohort.
//!
//! CSV parsing is deliberately simple: comma separated, first line is the
//! header, no quoted commas. Every row goes through the same normalizer the
//! web forms use, so training and serving agree on encoding.

use crate::error::TrainingError;
use crate::synthetic;
use hrp_features::{normalize, schema_for, Domain, RawForm};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Where a training table came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DataSource {
    Csv { path: PathBuf },
    Synthetic { rows: usize, seed: u64 },
}

impl std::fmt::Display for DataSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DataSource::Csv { path } => write!(f, "{}", path.display()),
            DataSource::Synthetic { rows, seed } => {
                write!(f, "synthetic cohort ({rows} rows, seed {seed})")
            }
        }
    }
}

/// Encoded feature rows with their outcomes.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub domain: Domain,
    pub rows: Vec<Vec<f64>>,
    pub labels: Vec<bool>,
    pub source: DataSource,
    /// Rows dropped while reading (bad values or labels).
    pub skipped: usize,
}

impl Dataset {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn positives(&self) -> usize {
        self.labels.iter().filter(|&&y| y).count()
    }
}

/// Resolves the training table for a domain.
#[derive(Debug, Clone)]
pub struct DatasetLocator {
    data_dir: PathBuf,
    synthetic_fallback: bool,
}

impl DatasetLocator {
    pub fn new(data_dir: impl Into<PathBuf>, synthetic_fallback: bool) -> Self {
        Self {
            data_dir: data_dir.into(),
            synthetic_fallback,
        }
    }

    pub fn path_for(&self, domain: Domain) -> PathBuf {
        self.data_dir.join(domain.dataset_file_name())
    }

    /// Load the CSV table if present, else the synthetic cohort when allowed.
    pub fn load(
        &self,
        domain: Domain,
        synthetic_rows: usize,
        seed: u64,
    ) -> Result<Dataset, TrainingError> {
        let path = self.path_for(domain);
        if path.is_file() {
            return load_csv(domain, &path);
        }
        if self.synthetic_fallback {
            log::warn!(
                "{} not found; training {domain} on a synthetic cohort",
                path.display()
            );
            return Ok(synthetic::cohort(domain, synthetic_rows, seed));
        }
        Err(TrainingError::DatasetMissing { domain, path })
    }
}

/// Read a CSV training table for `domain`.
pub fn load_csv(domain: Domain, path: &Path) -> Result<Dataset, TrainingError> {
    let text = fs::read_to_string(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => TrainingError::DatasetMissing {
            domain,
            path: path.to_path_buf(),
        },
        _ => TrainingError::Io {
            path: path.to_path_buf(),
            source,
        },
    })?;
    parse_csv(domain, &text, path)
}

fn split_line(line: &str) -> Vec<&str> {
    line.split(',')
        .map(|c| c.trim().trim_matches('"'))
        .collect()
}

fn parse_csv(domain: Domain, text: &str, path: &Path) -> Result<Dataset, TrainingError> {
    let malformed = |reason: String| TrainingError::MalformedDataset {
        path: path.to_path_buf(),
        reason,
    };

    let mut lines = text.lines().filter(|l| !l.trim().is_empty());
    let header = split_line(lines.next().ok_or_else(|| malformed("empty file".into()))?);

    let schema = schema_for(domain);
    let mut columns = Vec::with_capacity(schema.len());
    for spec in schema.fields {
        let idx = header
            .iter()
            .position(|h| spec.matches_header(h))
            .ok_or_else(|| malformed(format!("missing column '{}'", spec.name)))?;
        columns.push((spec.name, idx));
    }
    let target = header
        .iter()
        .position(|h| *h == domain.target_column())
        .ok_or_else(|| malformed(format!("missing target column '{}'", domain.target_column())))?;

    let mut rows = Vec::new();
    let mut labels = Vec::new();
    let mut skipped = 0;
    for (lineno, line) in lines.enumerate() {
        let cells = split_line(line);
        if cells.len() != header.len() {
            skipped += 1;
            continue;
        }
        let Some(label) = parse_label(cells[target]) else {
            skipped += 1;
            continue;
        };
        let form: RawForm = columns
            .iter()
            .map(|(name, idx)| (name.to_string(), cells[*idx].to_string()))
            .collect();
        match normalize(domain, &form) {
            Ok(fv) => {
                rows.push(fv.to_model_input());
                labels.push(label);
            }
            Err(e) => {
                log::debug!("{}: row {} skipped: {e}", path.display(), lineno + 2);
                skipped += 1;
            }
        }
    }

    if skipped > 0 {
        log::warn!(
            "{}: skipped {skipped} unusable rows, kept {}",
            path.display(),
            rows.len()
        );
    }

    Ok(Dataset {
        domain,
        rows,
        labels,
        source: DataSource::Csv {
            path: path.to_path_buf(),
        },
        skipped,
    })
}

fn parse_label(raw: &str) -> Option<bool> {
    match raw.trim().parse::<f64>().ok()? {
        v if v == 0.0 => Some(false),
        v if v == 1.0 => Some(true),
        _ => None,
    }
}
