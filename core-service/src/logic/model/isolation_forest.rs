//! Isolation Forest - unsupervised outlier scorer
//!
//! Random isolation trees grown on subsamples. Points that are isolated in
//! few splits are outliers. Scores follow the usual convention:
//! `decision_function(x) = score_samples(x) - offset`, negative = outlier,
//! where `offset` is the `contamination` percentile of the training scores.

use ndarray::{Array2, ArrayView2};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use super::{ModelError, OutlierScorer};
use crate::constants::{
    FLOW_FEATURE_COUNT, OUTLIER_CONTAMINATION, OUTLIER_ESTIMATORS, OUTLIER_RANDOM_SEED,
    SYNTHETIC_SAMPLES,
};

/// Euler-Mascheroni constant
const EULER_GAMMA: f64 = 0.577_215_664_901_532_9;

/// Subsample cap per tree
const MAX_SAMPLES_CAP: usize = 256;

// ============================================================================
// CONFIG
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct IsolationForestConfig {
    pub n_estimators: usize,
    /// Expected outlier fraction, in (0, 0.5]
    pub contamination: f64,
    pub random_state: u64,
}

impl Default for IsolationForestConfig {
    fn default() -> Self {
        Self {
            n_estimators: OUTLIER_ESTIMATORS,
            contamination: OUTLIER_CONTAMINATION,
            random_state: OUTLIER_RANDOM_SEED,
        }
    }
}

// ============================================================================
// TREE
// ============================================================================

#[derive(Debug, Clone)]
enum Node {
    Leaf {
        size: usize,
    },
    Split {
        feature: usize,
        threshold: f64,
        left: Box<Node>,
        right: Box<Node>,
    },
}

impl Node {
    fn path_length(&self, x: &[f64]) -> f64 {
        let mut node = self;
        let mut depth = 0.0;
        loop {
            match node {
                Node::Leaf { size } => return depth + average_path_length(*size),
                Node::Split { feature, threshold, left, right } => {
                    node = if x[*feature] <= *threshold { left } else { right };
                    depth += 1.0;
                }
            }
        }
    }
}

fn build_tree(
    data: &ArrayView2<f64>,
    indices: &[usize],
    depth: usize,
    height_limit: usize,
    rng: &mut StdRng,
) -> Node {
    if depth >= height_limit || indices.len() <= 1 {
        return Node::Leaf { size: indices.len() };
    }

    let mut features: Vec<usize> = (0..data.ncols()).collect();
    features.shuffle(rng);

    // First non-constant feature in random order
    for feature in features {
        let (min, max) = indices.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &i| {
            let v = data[[i, feature]];
            (lo.min(v), hi.max(v))
        });
        if min >= max {
            continue;
        }

        let threshold = rng.gen_range(min..max);
        let (left, right): (Vec<usize>, Vec<usize>) =
            indices.iter().partition(|&&i| data[[i, feature]] <= threshold);

        return Node::Split {
            feature,
            threshold,
            left: Box::new(build_tree(data, &left, depth + 1, height_limit, rng)),
            right: Box::new(build_tree(data, &right, depth + 1, height_limit, rng)),
        };
    }

    Node::Leaf { size: indices.len() }
}

/// Average path length of an unsuccessful BST search over `n` points
pub fn average_path_length(n: usize) -> f64 {
    match n {
        0 | 1 => 0.0,
        2 => 1.0,
        _ => {
            let n = n as f64;
            2.0 * ((n - 1.0).ln() + EULER_GAMMA) - 2.0 * (n - 1.0) / n
        }
    }
}

/// Linear-interpolated percentile (`q` in [0, 100])
fn percentile(values: &[f64], q: f64) -> f64 {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let rank = (q / 100.0) * (sorted.len() - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    sorted[lo] + (sorted[hi] - sorted[lo]) * (rank - lo as f64)
}

// ============================================================================
// FOREST
// ============================================================================

#[derive(Debug, Clone)]
pub struct IsolationForest {
    trees: Vec<Node>,
    max_samples: usize,
    n_features: usize,
    offset: f64,
}

impl IsolationForest {
    /// Fit on `data` (rows = samples)
    pub fn fit(data: ArrayView2<f64>, config: &IsolationForestConfig) -> Result<Self, ModelError> {
        let (n_samples, n_features) = data.dim();

        if n_samples == 0 || n_features == 0 {
            return Err(ModelError::Fit("empty training data".to_string()));
        }
        if data.iter().any(|v| !v.is_finite()) {
            return Err(ModelError::Fit("training data contains non-finite values".to_string()));
        }
        if !(config.contamination > 0.0 && config.contamination <= 0.5) {
            return Err(ModelError::Fit(format!(
                "contamination must be in (0, 0.5], got {}",
                config.contamination
            )));
        }
        if config.n_estimators == 0 {
            return Err(ModelError::Fit("n_estimators must be > 0".to_string()));
        }

        let mut rng = StdRng::seed_from_u64(config.random_state);
        let max_samples = n_samples.min(MAX_SAMPLES_CAP);
        let height_limit = (max_samples.max(2) as f64).log2().ceil() as usize;

        let trees = (0..config.n_estimators)
            .map(|_| {
                let indices = rand::seq::index::sample(&mut rng, n_samples, max_samples).into_vec();
                build_tree(&data, &indices, 0, height_limit, &mut rng)
            })
            .collect();

        let mut forest = Self {
            trees,
            max_samples,
            n_features,
            offset: 0.0,
        };

        let train_scores: Vec<f64> = data
            .rows()
            .into_iter()
            .map(|row| forest.raw_score(&row.to_vec()))
            .collect();
        forest.offset = percentile(&train_scores, 100.0 * config.contamination);

        log::debug!(
            "IsolationForest fitted: {} trees, {} samples, offset {:.4}",
            config.n_estimators,
            max_samples,
            forest.offset
        );

        Ok(forest)
    }

    /// Fit on `rows x FLOW_FEATURE_COUNT` uniform [0, 1) synthetic data so the
    /// model is usable before any real traffic has been seen.
    pub fn fit_synthetic(rows: usize, config: &IsolationForestConfig) -> Result<Self, ModelError> {
        let mut rng = StdRng::seed_from_u64(config.random_state);
        let data = Array2::from_shape_fn((rows, FLOW_FEATURE_COUNT), |_| rng.gen::<f64>());
        Self::fit(data.view(), config)
    }

    /// Default network outlier model
    pub fn pretrained_default() -> Result<Self, ModelError> {
        Self::fit_synthetic(SYNTHETIC_SAMPLES, &IsolationForestConfig::default())
    }

    /// `-2^(-E[h(x)] / c(max_samples))`, in [-1, 0]
    fn raw_score(&self, x: &[f64]) -> f64 {
        let mean_path = self.trees.iter().map(|t| t.path_length(x)).sum::<f64>()
            / self.trees.len() as f64;
        let norm = average_path_length(self.max_samples);
        if norm == 0.0 {
            // single training sample: every point is equally (ab)normal
            return -0.5;
        }
        -(2f64.powf(-mean_path / norm))
    }

    pub fn score_samples(&self, x: &[f64]) -> Result<f64, ModelError> {
        if x.len() != self.n_features {
            return Err(ModelError::InvalidInput(format!(
                "expected {} features, got {}",
                self.n_features,
                x.len()
            )));
        }
        if x.iter().any(|v| !v.is_finite()) {
            return Err(ModelError::InvalidInput("non-finite feature value".to_string()));
        }
        Ok(self.raw_score(x))
    }

    pub fn offset(&self) -> f64 {
        self.offset
    }

    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }
}

impl OutlierScorer for IsolationForest {
    fn decision_function(&self, features: &[f64]) -> Result<f64, ModelError> {
        Ok(self.score_samples(features)? - self.offset)
    }
}

// ============================================================================
// TESTS
// ============================================================================
