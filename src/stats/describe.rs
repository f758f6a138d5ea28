//! Descriptive statistics shared by the distribution and box charts.

/// Quartile values of a sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quartiles {
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
}

/// Five-number box summary plus the mean. Whiskers are clamped to the
/// furthest data points within 1.5 * IQR of the box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxSummary {
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub whisker_low: f64,
    pub whisker_high: f64,
    pub mean: f64,
}

/// Percentile by linear interpolation over a sorted slice (the NumPy
/// rule). `p` is in percent, 0..=100.
pub fn percentile(sorted_values: &[f64], p: f64) -> f64 {
    let n = sorted_values.len();
    if n == 0 {
        return f64::NAN;
    }
    if n == 1 {
        return sorted_values[0];
    }

    let rank = (p / 100.0) * (n - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = (rank.ceil() as usize).min(n - 1);
    let frac = rank - lower as f64;

    if lower == upper {
        sorted_values[lower]
    } else {
        sorted_values[lower] * (1.0 - frac) + sorted_values[upper] * frac
    }
}

fn sorted(values: &[f64]) -> Vec<f64> {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    sorted
}

/// 25th/50th/75th percentiles, `None` for an empty sample.
pub fn quartiles(values: &[f64]) -> Option<Quartiles> {
    if values.is_empty() {
        return None;
    }
    let sorted = sorted(values);
    Some(Quartiles {
        q1: percentile(&sorted, 25.0),
        median: percentile(&sorted, 50.0),
        q3: percentile(&sorted, 75.0),
    })
}

/// Box summary of a sample, `None` when empty.
pub fn box_summary(values: &[f64]) -> Option<BoxSummary> {
    if values.is_empty() {
        return None;
    }
    let sorted = sorted(values);
    let q1 = percentile(&sorted, 25.0);
    let median = percentile(&sorted, 50.0);
    let q3 = percentile(&sorted, 75.0);
    let iqr = q3 - q1;

    let whisker_low = sorted
        .iter()
        .copied()
        .find(|&v| v >= q1 - 1.5 * iqr)
        .unwrap_or(q1);
    let whisker_high = sorted
        .iter()
        .rev()
        .copied()
        .find(|&v| v <= q3 + 1.5 * iqr)
        .unwrap_or(q3);

    let mean = values.iter().sum::<f64>() / values.len() as f64;

    Some(BoxSummary {
        q1,
        median,
        q3,
        whisker_low,
        whisker_high,
        mean,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percentile_interpolates_linearly() {
        let vals = [10.0, 20.0, 30.0, 40.0];
        assert_eq!(percentile(&vals, 0.0), 10.0);
        assert_eq!(percentile(&vals, 100.0), 40.0);
        assert_eq!(percentile(&vals, 50.0), 25.0);
        assert_eq!(percentile(&vals, 25.0), 17.5);
    }

    #[test]
    fn percentile_edge_sizes() {
        assert!(percentile(&[], 50.0).is_nan());
        assert_eq!(percentile(&[7.0], 95.0), 7.0);
    }

    #[test]
    fn quartiles_of_a_known_sample() {
        let q = quartiles(&[1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
        assert_eq!(q.q1, 2.0);
        assert_eq!(q.median, 3.0);
        assert_eq!(q.q3, 4.0);
        assert!(quartiles(&[]).is_none());
    }

    #[test]
    fn box_whiskers_stay_within_fence() {
        // 100.0 is an outlier; the upper whisker clamps to the furthest
        // point inside q3 + 1.5 * IQR.
        let s = box_summary(&[1.0, 2.0, 3.0, 4.0, 5.0, 100.0]).unwrap();
        assert_eq!(s.whisker_low, 1.0);
        assert_eq!(s.whisker_high, 5.0);
        assert!(s.q1 < s.median && s.median < s.q3);
    }

    #[test]
    fn box_summary_mean_is_arithmetic_mean() {
        let s = box_summary(&[2.0, 4.0, 6.0]).unwrap();
        assert_eq!(s.mean, 4.0);
        assert!(box_summary(&[]).is_none());
    }
}
