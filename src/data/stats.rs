use super::model::{CellValue, Frame, FrameError};

// ---------------------------------------------------------------------------
// Scalar statistics
// ---------------------------------------------------------------------------

/// Arithmetic mean. `NaN` for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sample standard deviation (ddof = 1). `NaN` for fewer than two values.
pub fn sample_std(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return f64::NAN;
    }
    let m = mean(values);
    let var = values.iter().map(|x| (x - m).powi(2)).sum::<f64>() / (values.len() - 1) as f64;
    var.sqrt()
}

/// Quantile with linear interpolation between order statistics.
///
/// `q` is a fraction in [0, 1]; for sorted values v₀ ≤ … ≤ vₙ₋₁ the result
/// interpolates at position q·(n−1). `NaN` for an empty slice.
pub fn quantile(values: &[f64], q: f64) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let pos = q.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let frac = pos - lo as f64;
    sorted[lo] + (sorted[hi] - sorted[lo]) * frac
}

// ---------------------------------------------------------------------------
// Frame summary: describe()
// ---------------------------------------------------------------------------

/// The statistic rows emitted by [`describe`], in output order.
const DESCRIBE_ROWS: [&str; 8] = ["count", "mean", "std", "min", "25%", "50%", "75%", "max"];

fn stat_value(values: &[f64], stat: &str) -> f64 {
    match stat {
        "count" => values.len() as f64,
        "mean" => mean(values),
        "std" => sample_std(values),
        "min" => quantile(values, 0.0),
        "25%" => quantile(values, 0.25),
        "50%" => quantile(values, 0.5),
        "75%" => quantile(values, 0.75),
        "max" => quantile(values, 1.0),
        other => unreachable!("unknown statistic '{other}'"),
    }
}

/// Summary statistics over every numeric column of a frame.
///
/// Returns a new frame with a leading `stat` column and one column per
/// numeric input column, holding count / mean / std / min / quartiles / max.
pub fn describe(frame: &Frame) -> Result<Frame, FrameError> {
    if frame.is_empty() {
        return Err(FrameError::EmptyFrame);
    }

    // Numeric columns only; a column counts as numeric when every cell is.
    let mut numeric: Vec<(String, Vec<f64>)> = Vec::new();
    for name in frame.columns() {
        if let Ok(values) = frame.numeric_column(name) {
            numeric.push((name.clone(), values));
        }
    }

    let mut columns: Vec<String> = vec!["stat".to_string()];
    columns.extend(numeric.iter().map(|(name, _)| name.clone()));

    let rows = DESCRIBE_ROWS
        .iter()
        .map(|stat| {
            let mut row: Vec<CellValue> = vec![CellValue::String(stat.to_string())];
            row.extend(
                numeric
                    .iter()
                    .map(|(_, values)| CellValue::Float(stat_value(values, stat))),
            );
            row
        })
        .collect();

    Frame::new(columns, rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-10;

    #[test]
    fn mean_and_std_of_known_values() {
        let values = [1.0, 2.0, 3.0, 4.0];
        assert!((mean(&values) - 2.5).abs() < EPS);
        // sample variance = (2.25 + 0.25 + 0.25 + 2.25) / 3 = 5/3
        assert!((sample_std(&values) - (5.0f64 / 3.0).sqrt()).abs() < EPS);
    }

    #[test]
    fn quantile_interpolates_linearly() {
        let values = [1.0, 2.0, 3.0, 4.0];
        assert!((quantile(&values, 0.0) - 1.0).abs() < EPS);
        assert!((quantile(&values, 0.25) - 1.75).abs() < EPS);
        assert!((quantile(&values, 0.5) - 2.5).abs() < EPS);
        assert!((quantile(&values, 1.0) - 4.0).abs() < EPS);
    }

    #[test]
    fn quantile_is_order_independent() {
        let shuffled = [3.0, 1.0, 4.0, 2.0];
        assert!((quantile(&shuffled, 0.5) - 2.5).abs() < EPS);
    }

    #[test]
    fn degenerate_inputs_give_nan() {
        assert!(mean(&[]).is_nan());
        assert!(sample_std(&[1.0]).is_nan());
        assert!(quantile(&[], 0.5).is_nan());
    }

    #[test]
    fn describe_covers_numeric_columns_only() {
        let frame = Frame::new(
            vec!["label", "v"],
            vec![
                vec!["a".into(), 1.into()],
                vec!["b".into(), 2.into()],
                vec!["c".into(), 3.into()],
            ],
        )
        .unwrap();
        let summary = describe(&frame).unwrap();

        assert_eq!(summary.columns(), &["stat", "v"]);
        assert_eq!(summary.len(), 8);

        let stats = summary.numeric_column("v").unwrap();
        // count, mean, std, min, 25%, 50%, 75%, max
        assert!((stats[0] - 3.0).abs() < EPS);
        assert!((stats[1] - 2.0).abs() < EPS);
        assert!((stats[2] - 1.0).abs() < EPS);
        assert!((stats[3] - 1.0).abs() < EPS);
        assert!((stats[4] - 1.5).abs() < EPS);
        assert!((stats[5] - 2.0).abs() < EPS);
        assert!((stats[6] - 2.5).abs() < EPS);
        assert!((stats[7] - 3.0).abs() < EPS);
    }

    #[test]
    fn describe_rejects_empty_frames() {
        let frame = Frame::new(vec!["v"], Vec::new()).unwrap();
        assert!(matches!(describe(&frame).unwrap_err(), FrameError::EmptyFrame));
    }
}
