//! Match-outcome classifier.
//!
//! The trained model is a Gaussian naive-Bayes classifier exported to JSON
//! (per-class priors, feature means and feature variances). It is loaded once
//! at start-up and shared read-only between requests.
//!
//! Output classes are, in trained order: home win, away win, draw.

use serde::Deserialize;
use std::f64::consts::PI;
use std::path::Path;
use thiserror::Error;

use super::features::{FeatureVector, FEATURE_COUNT, FEATURE_NAMES};
use crate::error::{ApiError, ApiResult};

pub const CLASS_COUNT: usize = 3;

/// Maps one feature row to outcome probabilities.
pub trait OutcomeClassifier: Send + Sync {
    /// Probabilities for (home win, away win, draw), each in [0, 1].
    fn predict_proba(&self, features: &FeatureVector) -> ApiResult<[f64; CLASS_COUNT]>;

    fn name(&self) -> &str;
}

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("failed to read model file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse model file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("model shape mismatch: {0}")]
    Shape(String),
}

/// On-disk layout, mirroring scikit-learn's `GaussianNB` attributes.
#[derive(Debug, Deserialize)]
struct GaussianNbFile {
    #[serde(default)]
    classes: Option<Vec<serde_json::Value>>,
    #[serde(default)]
    feature_names: Option<Vec<String>>,
    class_prior: Vec<f64>,
    theta: Vec<Vec<f64>>,
    var: Vec<Vec<f64>>,
}

type Matrix = [[f64; FEATURE_COUNT]; CLASS_COUNT];

#[derive(Debug, Clone)]
pub struct GaussianNb {
    log_prior: [f64; CLASS_COUNT],
    theta: Matrix,
    var: Matrix,
}

impl GaussianNb {
    pub fn load(path: &Path) -> Result<Self, ModelError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<Self, ModelError> {
        let file: GaussianNbFile = serde_json::from_str(text)?;

        if let Some(classes) = &file.classes {
            if classes.len() != CLASS_COUNT {
                return Err(ModelError::Shape(format!(
                    "{} classes, expected {}",
                    classes.len(),
                    CLASS_COUNT
                )));
            }
        }
        if let Some(names) = &file.feature_names {
            if names.iter().map(String::as_str).ne(FEATURE_NAMES.iter().copied()) {
                return Err(ModelError::Shape(format!(
                    "feature names {:?} differ from {:?}",
                    names, FEATURE_NAMES
                )));
            }
        }

        let class_prior: [f64; CLASS_COUNT] =
            file.class_prior.try_into().map_err(|p: Vec<f64>| {
                ModelError::Shape(format!("{} class priors, expected {}", p.len(), CLASS_COUNT))
            })?;
        let theta = to_matrix("theta", file.theta)?;
        let var = to_matrix("var", file.var)?;

        Self::from_parts(class_prior, theta, var)
    }

    pub fn from_parts(
        class_prior: [f64; CLASS_COUNT],
        theta: Matrix,
        var: Matrix,
    ) -> Result<Self, ModelError> {
        if class_prior.iter().any(|p| !(p.is_finite() && *p > 0.0)) {
            return Err(ModelError::Shape(format!(
                "class priors must be positive: {:?}",
                class_prior
            )));
        }
        if theta.iter().flatten().any(|m| !m.is_finite()) {
            return Err(ModelError::Shape("non-finite feature mean".to_string()));
        }
        if var.iter().flatten().any(|v| !(v.is_finite() && *v > 0.0)) {
            return Err(ModelError::Shape(
                "feature variances must be positive".to_string(),
            ));
        }
        Ok(GaussianNb {
            log_prior: class_prior.map(f64::ln),
            theta,
            var,
        })
    }

    fn joint_log_likelihood(&self, x: &[f64; FEATURE_COUNT]) -> [f64; CLASS_COUNT] {
        std::array::from_fn(|c| {
            let mut ll = self.log_prior[c];
            for j in 0..FEATURE_COUNT {
                let v = self.var[c][j];
                let d = x[j] - self.theta[c][j];
                ll -= 0.5 * ((2.0 * PI * v).ln() + d * d / v);
            }
            ll
        })
    }
}

fn to_matrix(name: &str, rows: Vec<Vec<f64>>) -> Result<Matrix, ModelError> {
    let rows = rows
        .into_iter()
        .enumerate()
        .map(|(i, row)| {
            let len = row.len();
            <[f64; FEATURE_COUNT]>::try_from(row).map_err(|_| {
                ModelError::Shape(format!(
                    "{}[{}] has {} columns, expected {}",
                    name, i, len, FEATURE_COUNT
                ))
            })
        })
        .collect::<Result<Vec<_>, _>>()?;
    let n = rows.len();
    rows.try_into().map_err(|_| {
        ModelError::Shape(format!("{} has {} rows, expected {}", name, n, CLASS_COUNT))
    })
}

impl OutcomeClassifier for GaussianNb {
    fn predict_proba(&self, features: &FeatureVector) -> ApiResult<[f64; CLASS_COUNT]> {
        let jll = self.joint_log_likelihood(&features.to_row());

        // log-sum-exp keeps far-from-mean rows from underflowing to 0/0.
        let max = jll.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let log_norm = max + jll.iter().map(|l| (l - max).exp()).sum::<f64>().ln();
        let proba = jll.map(|l| (l - log_norm).exp());

        if proba.iter().any(|p| !p.is_finite()) {
            return Err(ApiError::Model(format!(
                "non-finite probabilities {:?} for features {:?}",
                proba,
                features.named()
            )));
        }
        Ok(proba.map(|p| p.clamp(0.0, 1.0)))
    }

    fn name(&self) -> &str {
        "gaussian-naive-bayes"
    }
}
