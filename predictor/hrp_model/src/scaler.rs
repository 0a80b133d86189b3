use serde::{Deserialize, Serialize};

/// Per-feature standardization fitted on the training split.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StandardScaler {
    pub mean: f64,
    pub std: f64,
}

impl StandardScaler {
    pub fn fit(xs: &[f64]) -> Self {
        if xs.is_empty() {
            return Self {
                mean: 0.0,
                std: 0.0,
            };
        }
        let n = xs.len() as f64;
        let mean = xs.iter().sum::<f64>() / n;
        let var = xs.iter().map(|x| (x - mean) * (x - mean)).sum::<f64>() / n;
        Self {
            mean,
            std: var.sqrt(),
        }
    }

    /// Fit one scaler per column of a row-major table.
    pub fn fit_columns(rows: &[Vec<f64>], width: usize) -> Vec<Self> {
        (0..width)
            .map(|col| {
                let column: Vec<f64> = rows.iter().map(|r| r[col]).collect();
                Self::fit(&column)
            })
            .collect()
    }

    /// Zero-variance columns map to 0.
    pub fn transform(&self, x: f64) -> f64 {
        if self.std == 0.0 {
            0.0
        } else {
            (x - self.mean) / self.std
        }
    }
}
