use crate::anomaly::forest::{Detection, IsolationForest};
use crate::data::synth;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Points under inspection, rows of `[x, y]`.
    pub points: Vec<Vec<f64>>,

    /// Result of the last fit (None until the first fit completes).
    pub detection: Option<Detection>,

    /// Expected outlier fraction handed to the detector.
    pub contamination: f64,

    /// Trees grown per fit.
    pub trees: usize,

    /// Seed for both data generation and tree growth.
    pub seed: u64,

    /// Color points by score gradient instead of predicted class.
    pub color_by_score: bool,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            points: Vec::new(),
            detection: None,
            contamination: 0.1,
            trees: 100,
            seed: synth::DEMO_SEED,
            color_by_score: false,
            status_message: None,
        }
    }
}

impl AppState {
    /// Fresh state with the demo point cloud already generated and fitted.
    pub fn with_demo_data() -> Self {
        let mut state = Self::default();
        state.regenerate();
        state
    }

    /// Replace the points with a newly generated cloud and refit.
    pub fn regenerate(&mut self) {
        self.points = synth::point_cloud(self.seed);
        self.refit();
    }

    /// Ingest points loaded from a file and refit.
    pub fn set_points(&mut self, points: Vec<Vec<f64>>) {
        self.points = points;
        self.status_message = None;
        self.refit();
    }

    /// Re-run the detector over the current points.
    pub fn refit(&mut self) {
        let forest = IsolationForest {
            trees: self.trees,
            contamination: self.contamination,
            seed: self.seed,
            ..Default::default()
        };
        match forest.fit_detect(&self.points) {
            Ok(detection) => {
                self.detection = Some(detection);
                self.status_message = None;
            }
            Err(e) => {
                log::error!("fit failed: {e}");
                self.detection = None;
                self.status_message = Some(format!("Error: {e}"));
            }
        }
    }

    /// Counts shown in the top bar: (normal, anomalous).
    pub fn counts(&self) -> (usize, usize) {
        self.detection
            .as_ref()
            .map(|d| (d.normal_count(), d.anomaly_count()))
            .unwrap_or((0, 0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_state_fits_on_construction() {
        let state = AppState::with_demo_data();
        assert_eq!(state.points.len(), 220);
        let detection = state.detection.expect("fit should succeed");
        assert_eq!(detection.labels.len(), 220);
    }

    #[test]
    fn refit_surfaces_errors_instead_of_panicking() {
        let mut state = AppState {
            contamination: 0.9,
            ..AppState::default()
        };
        state.points = synth::point_cloud(state.seed);
        state.refit();
        assert!(state.detection.is_none());
        assert!(state.status_message.is_some());
    }

    #[test]
    fn counts_track_the_detection() {
        let state = AppState::with_demo_data();
        let (normal, anomalous) = state.counts();
        assert_eq!(normal + anomalous, 220);
        assert!(anomalous > 0);
    }
}
