use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal};

use super::model::{CellValue, Frame};

// ---------------------------------------------------------------------------
// Seeded synthetic datasets used by the demos
// ---------------------------------------------------------------------------

/// Seed shared by all demos so every run reproduces the same data.
pub const DEMO_SEED: u64 = 42;

/// Cluster points per blob in the demo point cloud.
pub const CLUSTER_SIZE: usize = 100;

/// Uniform-random outliers appended after the clusters.
pub const OUTLIER_COUNT: usize = 20;

/// Half-width of the square the outliers are drawn from.
pub const OUTLIER_RANGE: f64 = 4.0;

/// Generate the demo 2-D point cloud: two Gaussian blobs plus outliers.
///
/// 100 draws of 0.3·N(0,1) per axis are offset by +2 to form the first
/// cluster and by −2 to form the second (same draws, mirroring the original
/// construction), then 20 uniform points in [−4, 4]² are appended. Cluster
/// points come first, outliers last; total 220 rows of `[x, y]`.
pub fn point_cloud(seed: u64) -> Vec<Vec<f64>> {
    let mut rng = StdRng::seed_from_u64(seed);
    // Unit normal scaled down to tight blobs.
    let normal = Normal::new(0.0, 1.0).expect("valid std dev");

    let base: Vec<[f64; 2]> = (0..CLUSTER_SIZE)
        .map(|_| {
            [
                0.3 * normal.sample(&mut rng),
                0.3 * normal.sample(&mut rng),
            ]
        })
        .collect();

    let mut points: Vec<Vec<f64>> = Vec::with_capacity(2 * CLUSTER_SIZE + OUTLIER_COUNT);
    points.extend(base.iter().map(|p| vec![p[0] + 2.0, p[1] + 2.0]));
    points.extend(base.iter().map(|p| vec![p[0] - 2.0, p[1] - 2.0]));
    points.extend((0..OUTLIER_COUNT).map(|_| {
        vec![
            rng.gen_range(-OUTLIER_RANGE..OUTLIER_RANGE),
            rng.gen_range(-OUTLIER_RANGE..OUTLIER_RANGE),
        ]
    }));
    points
}

/// Total size of the demo point cloud.
pub fn point_cloud_len() -> usize {
    2 * CLUSTER_SIZE + OUTLIER_COUNT
}

/// Generate a frame of uniform random integers in 1..=100.
///
/// Columns are named A, B, C, … in order.
pub fn random_int_frame(seed: u64, rows: usize, cols: usize) -> Frame {
    assert!(cols <= 26, "column names run A..Z");

    let mut rng = StdRng::seed_from_u64(seed);
    let columns: Vec<String> = (0..cols)
        .map(|i| ((b'A' + i as u8) as char).to_string())
        .collect();

    let cells = (0..rows)
        .map(|_| {
            (0..cols)
                .map(|_| CellValue::Integer(rng.gen_range(1..=100)))
                .collect()
        })
        .collect();

    // Shape is rectangular by construction.
    Frame::new(columns, cells).expect("rectangular rows")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_cloud_layout_matches_the_demo() {
        let points = point_cloud(DEMO_SEED);
        assert_eq!(points.len(), 220);
        assert_eq!(points.len(), point_cloud_len());
        assert!(points.iter().all(|p| p.len() == 2));

        // Cluster halves mirror each other: row i+100 = row i shifted by -4.
        for i in 0..CLUSTER_SIZE {
            assert!((points[i][0] - points[i + CLUSTER_SIZE][0] - 4.0).abs() < 1e-12);
            assert!((points[i][1] - points[i + CLUSTER_SIZE][1] - 4.0).abs() < 1e-12);
        }

        // Outliers stay inside the sampling square.
        for p in &points[2 * CLUSTER_SIZE..] {
            assert!(p[0] >= -OUTLIER_RANGE && p[0] < OUTLIER_RANGE);
            assert!(p[1] >= -OUTLIER_RANGE && p[1] < OUTLIER_RANGE);
        }
    }

    #[test]
    fn point_cloud_is_deterministic_per_seed() {
        assert_eq!(point_cloud(DEMO_SEED), point_cloud(DEMO_SEED));
        assert_ne!(point_cloud(DEMO_SEED), point_cloud(DEMO_SEED + 1));
    }

    #[test]
    fn random_int_frame_shape_and_range() {
        let frame = random_int_frame(DEMO_SEED, 10, 3);
        assert_eq!(frame.len(), 10);
        assert_eq!(frame.columns(), &["A", "B", "C"]);
        for name in ["A", "B", "C"] {
            for v in frame.numeric_column(name).unwrap() {
                assert!((1.0..=100.0).contains(&v));
            }
        }
    }

    #[test]
    fn random_int_frame_is_deterministic_per_seed() {
        let a = random_int_frame(DEMO_SEED, 10, 3).render(None);
        let b = random_int_frame(DEMO_SEED, 10, 3).render(None);
        assert_eq!(a, b);
        let c = random_int_frame(7, 10, 3).render(None);
        assert_ne!(a, c);
    }
}
