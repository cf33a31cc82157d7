use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::data::stats;

// ---------------------------------------------------------------------------
// Isolation forest anomaly detector
// ---------------------------------------------------------------------------
//
// Anomalies are easier to isolate: a point that random axis-aligned splits
// separate from the rest after only a few cuts sits far from the bulk of the
// data. Each tree is grown on a small subsample; the normalized average path
// length over all trees becomes the anomaly score.

/// Trees grown per forest.
pub const DEFAULT_TREES: usize = 100;

/// Rows subsampled per tree (capped at the dataset size).
pub const DEFAULT_SAMPLE_SIZE: usize = 256;

const EULER_GAMMA: f64 = 0.577_215_664_901_532_9;

#[derive(Debug, Error)]
pub enum ForestError {
    #[error("need at least two rows to fit, got {0}")]
    TooFewRows(usize),

    #[error("contamination must be in (0, 0.5], got {0}")]
    BadContamination(f64),

    #[error("row {row} has {got} features but the first row has {expected}")]
    RaggedRows {
        row: usize,
        got: usize,
        expected: usize,
    },
}

/// Predicted class of a single point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Label {
    Normal,
    Anomaly,
}

/// Detection result over a set of points.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Detection {
    pub labels: Vec<Label>,
    /// Per-point score; higher means more normal, all values in [−1, 0).
    pub scores: Vec<f64>,
    /// Points scoring strictly below this are labelled anomalous.
    pub threshold: f64,
}

impl Detection {
    pub fn anomaly_count(&self) -> usize {
        self.labels.iter().filter(|&&l| l == Label::Anomaly).count()
    }

    pub fn normal_count(&self) -> usize {
        self.labels.len() - self.anomaly_count()
    }
}

/// Isolation forest configuration.
#[derive(Debug, Clone)]
pub struct IsolationForest {
    pub trees: usize,
    pub sample_size: usize,
    /// Expected fraction of outliers, used to place the decision threshold
    /// at that quantile of the training scores.
    pub contamination: f64,
    pub seed: u64,
}

impl Default for IsolationForest {
    fn default() -> Self {
        Self {
            trees: DEFAULT_TREES,
            sample_size: DEFAULT_SAMPLE_SIZE,
            contamination: 0.1,
            seed: 42,
        }
    }
}

#[derive(Debug)]
enum Node {
    Leaf {
        size: usize,
    },
    Split {
        feature: usize,
        cut: f64,
        left: Box<Node>,
        right: Box<Node>,
    },
}

#[derive(Debug)]
struct Tree {
    root: Node,
}

impl IsolationForest {
    /// Grow the forest on the given rows and fix the decision threshold at
    /// the contamination quantile of the training scores.
    pub fn fit(&self, rows: &[Vec<f64>]) -> Result<FittedForest, ForestError> {
        if rows.len() < 2 {
            return Err(ForestError::TooFewRows(rows.len()));
        }
        if !(self.contamination > 0.0 && self.contamination <= 0.5) {
            return Err(ForestError::BadContamination(self.contamination));
        }
        let dims = rows[0].len();
        for (i, row) in rows.iter().enumerate() {
            if row.len() != dims {
                return Err(ForestError::RaggedRows {
                    row: i,
                    got: row.len(),
                    expected: dims,
                });
            }
        }

        let sample_size = self.sample_size.max(2).min(rows.len());
        let depth_limit = (sample_size as f64).log2().ceil() as usize;
        let mut rng = StdRng::seed_from_u64(self.seed);

        let trees = (0..self.trees)
            .map(|_| {
                let indices = rand::seq::index::sample(&mut rng, rows.len(), sample_size);
                Tree {
                    root: grow(rows, indices.into_vec(), 0, depth_limit, &mut rng),
                }
            })
            .collect();

        let mut fitted = FittedForest {
            trees,
            sample_size,
            threshold: 0.0,
        };
        let scores = fitted.score_samples(rows);
        fitted.threshold = stats::quantile(&scores, self.contamination);
        log::info!(
            "fitted isolation forest: {} trees, sample size {sample_size}, threshold {:.4}",
            self.trees,
            fitted.threshold
        );
        Ok(fitted)
    }

    /// Fit on the rows and label the same rows, the usual demo flow.
    pub fn fit_detect(&self, rows: &[Vec<f64>]) -> Result<Detection, ForestError> {
        Ok(self.fit(rows)?.detect(rows))
    }
}

/// A grown forest with its decision threshold.
#[derive(Debug)]
pub struct FittedForest {
    trees: Vec<Tree>,
    sample_size: usize,
    threshold: f64,
}

impl FittedForest {
    /// Normalized anomaly scores, negated so that higher = more normal.
    ///
    /// For average path length E[h(x)] over the trees and the subsample
    /// normalizer c(ψ), the score is −2^(−E[h(x)] / c(ψ)), landing in [−1, 0).
    pub fn score_samples(&self, rows: &[Vec<f64>]) -> Vec<f64> {
        let c_psi = average_path_length(self.sample_size);
        rows.iter()
            .map(|point| {
                let total: f64 = self
                    .trees
                    .iter()
                    .map(|t| path_length(&t.root, point, 0))
                    .sum();
                let avg = total / self.trees.len() as f64;
                -(2f64.powf(-avg / c_psi))
            })
            .collect()
    }

    /// Label each row by comparing its score against the fitted threshold.
    pub fn detect(&self, rows: &[Vec<f64>]) -> Detection {
        let scores = self.score_samples(rows);
        let labels = scores
            .iter()
            .map(|&s| {
                if s < self.threshold {
                    Label::Anomaly
                } else {
                    Label::Normal
                }
            })
            .collect();
        Detection {
            labels,
            scores,
            threshold: self.threshold,
        }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }
}

/// Grow one isolation tree over the rows at `indices`.
fn grow(
    rows: &[Vec<f64>],
    indices: Vec<usize>,
    depth: usize,
    depth_limit: usize,
    rng: &mut StdRng,
) -> Node {
    if indices.len() <= 1 || depth >= depth_limit {
        return Node::Leaf {
            size: indices.len(),
        };
    }

    // Only features with spread can split this node.
    let dims = rows[indices[0]].len();
    let mut splittable: Vec<(usize, f64, f64)> = Vec::new();
    for feature in 0..dims {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for &i in &indices {
            let v = rows[i][feature];
            min = min.min(v);
            max = max.max(v);
        }
        if max > min {
            splittable.push((feature, min, max));
        }
    }
    let Some(&(feature, min, max)) = splittable.choose(rng) else {
        // All points identical on every axis.
        return Node::Leaf {
            size: indices.len(),
        };
    };

    let cut = rng.gen_range(min..max);
    let (left, right): (Vec<usize>, Vec<usize>) =
        indices.into_iter().partition(|&i| rows[i][feature] < cut);

    Node::Split {
        feature,
        cut,
        left: Box::new(grow(rows, left, depth + 1, depth_limit, rng)),
        right: Box::new(grow(rows, right, depth + 1, depth_limit, rng)),
    }
}

/// Path length of a point through a tree, with the standard leaf-size
/// adjustment for early-terminated leaves.
fn path_length(node: &Node, point: &[f64], depth: usize) -> f64 {
    match node {
        Node::Leaf { size } => depth as f64 + average_path_length(*size),
        Node::Split {
            feature,
            cut,
            left,
            right,
        } => {
            if point[*feature] < *cut {
                path_length(left, point, depth + 1)
            } else {
                path_length(right, point, depth + 1)
            }
        }
    }
}

/// Average unsuccessful-search path length c(n) of a binary search tree
/// holding `n` points.
fn average_path_length(n: usize) -> f64 {
    match n {
        0 | 1 => 0.0,
        2 => 1.0,
        n => {
            let nf = n as f64;
            2.0 * ((nf - 1.0).ln() + EULER_GAMMA) - 2.0 * (nf - 1.0) / nf
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand_distr::{Distribution, Normal};

    /// A tight blob around the origin plus one far-away point at the end.
    fn blob_with_outlier() -> Vec<Vec<f64>> {
        let mut rng = StdRng::seed_from_u64(7);
        let normal = Normal::new(0.0, 0.1).unwrap();
        let mut rows: Vec<Vec<f64>> = (0..49)
            .map(|_| vec![normal.sample(&mut rng), normal.sample(&mut rng)])
            .collect();
        rows.push(vec![10.0, 10.0]);
        rows
    }

    #[test]
    fn far_point_is_the_anomaly() {
        let rows = blob_with_outlier();
        let forest = IsolationForest {
            contamination: 0.02,
            ..Default::default()
        };
        let detection = forest.fit_detect(&rows).unwrap();

        assert_eq!(detection.anomaly_count(), 1);
        assert_eq!(detection.labels[49], Label::Anomaly);

        // The outlier carries the minimum (most anomalous) score.
        let min = detection
            .scores
            .iter()
            .cloned()
            .fold(f64::INFINITY, f64::min);
        assert_eq!(detection.scores[49], min);
    }

    #[test]
    fn scores_stay_in_the_normalized_band() {
        let rows = blob_with_outlier();
        let detection = IsolationForest::default().fit_detect(&rows).unwrap();
        for &s in &detection.scores {
            assert!((-1.0..0.0).contains(&s), "score {s} out of [-1, 0)");
        }
    }

    #[test]
    fn same_seed_reproduces_the_detection() {
        let rows = blob_with_outlier();
        let forest = IsolationForest::default();
        let a = forest.fit_detect(&rows).unwrap();
        let b = forest.fit_detect(&rows).unwrap();
        assert_eq!(a.scores, b.scores);
        assert_eq!(a.labels, b.labels);
        assert_eq!(a.threshold, b.threshold);
    }

    #[test]
    fn rejects_bad_inputs() {
        let forest = IsolationForest::default();
        assert!(matches!(
            forest.fit(&[]).unwrap_err(),
            ForestError::TooFewRows(0)
        ));

        let bad = IsolationForest {
            contamination: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            bad.fit(&[vec![1.0], vec![2.0]]).unwrap_err(),
            ForestError::BadContamination(_)
        ));

        let ragged = vec![vec![1.0, 2.0], vec![3.0]];
        assert!(matches!(
            forest.fit(&ragged).unwrap_err(),
            ForestError::RaggedRows { row: 1, .. }
        ));
    }

    #[test]
    fn average_path_length_known_values() {
        assert_eq!(average_path_length(0), 0.0);
        assert_eq!(average_path_length(1), 0.0);
        assert_eq!(average_path_length(2), 1.0);
        // c(256) ≈ 10.24 for the default subsample size.
        let c = average_path_length(256);
        assert!((c - 10.244).abs() < 0.01);
    }
}
