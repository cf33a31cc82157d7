/// Anomaly detection layer.
///
/// Architecture:
/// ```text
///   Vec<Vec<f64>> (rows × features)
///        │
///        ▼
///   ┌───────────────┐
///   │ IsolationForest│  grow randomized trees on subsamples
///   └───────────────┘
///        │
///        ▼
///   ┌───────────────┐
///   │  FittedForest  │  score_samples → contamination threshold
///   └───────────────┘
///        │
///        ▼
///   ┌───────────────┐
///   │   Detection    │  per-point Normal / Anomaly labels
///   └───────────────┘
/// ```
pub mod forest;
