//! Statistical helpers: sample moments and Student-t interval estimates.

use statrs::distribution::{ContinuousCDF, StudentsT};

use super::types::{AggregatedSeries, ConfidenceInterval, SeriesIntervals};

/// Default confidence level for interval estimates
pub const DEFAULT_CONFIDENCE: f64 = 0.95;

/// Arithmetic mean; None for an empty sample.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Sample standard deviation (n - 1 denominator); None below two samples.
pub fn sample_std_dev(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let m = mean(values)?;
    let variance =
        values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / (values.len() - 1) as f64;
    Some(variance.sqrt())
}

/// Standard error of the mean; None below two samples.
pub fn standard_error(values: &[f64]) -> Option<f64> {
    let std_dev = sample_std_dev(values)?;
    Some(std_dev / (values.len() as f64).sqrt())
}

/// Two-sided Student-t interval around a sample's mean.
///
/// Uses the t-distribution with `n - 1` degrees of freedom; for 95%
/// confidence the critical value is taken at the 97.5th percentile. Samples
/// too small for a spread estimate (or with zero variance) collapse to a
/// point interval at the mean. Returns None only for an empty sample.
pub fn t_interval(values: &[f64], confidence: f64) -> Option<ConfidenceInterval> {
    let m = mean(values)?;

    let Some(se) = standard_error(values) else {
        return Some(ConfidenceInterval::collapsed(m));
    };
    if se == 0.0 {
        return Some(ConfidenceInterval::collapsed(m));
    }

    let degrees_of_freedom = (values.len() - 1) as f64;
    let Ok(t_dist) = StudentsT::new(0.0, 1.0, degrees_of_freedom) else {
        return Some(ConfidenceInterval::collapsed(m));
    };

    let alpha = 1.0 - confidence;
    let t_critical = t_dist.inverse_cdf(1.0 - alpha / 2.0);
    if !t_critical.is_finite() {
        return Some(ConfidenceInterval::collapsed(m));
    }

    let margin = t_critical * se;
    Some(ConfidenceInterval {
        lower: m - margin,
        upper: m + margin,
    })
}

/// Interval estimates for every column of an aggregated series.
///
/// The aggregated series itself is used as the sample population, so each
/// chunk mean counts as one observation. None for an empty series.
pub fn series_intervals(series: &AggregatedSeries, confidence: f64) -> Option<SeriesIntervals> {
    Some(SeriesIntervals {
        confidence,
        timestamp: t_interval(&series.timestamp_column(), confidence)?,
        client_id: t_interval(&series.client_column(), confidence)?,
        bytes: t_interval(&series.bytes_column(), confidence)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::types::{AggregatedRow, AggregationMethod};

    #[test]
    fn test_mean() {
        assert_eq!(mean(&[]), None);
        assert_eq!(mean(&[4.0]), Some(4.0));
        assert!((mean(&[1.0, 2.0, 3.0, 4.0, 5.0]).unwrap() - 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_sample_std_dev() {
        assert_eq!(sample_std_dev(&[]), None);
        assert_eq!(sample_std_dev(&[4.0]), None);
        let sd = sample_std_dev(&[1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
        assert!((sd - 1.5811).abs() < 0.001);
    }

    #[test]
    fn test_t_interval_known_values() {
        // n = 5, mean 3, sem 0.7071; t(0.975, df=4) = 2.776
        let values = [1.0, 2.0, 3.0, 4.0, 5.0];
        let interval = t_interval(&values, 0.95).unwrap();
        assert!((interval.lower - 1.037).abs() < 0.01);
        assert!((interval.upper - 4.963).abs() < 0.01);
    }

    #[test]
    fn test_t_interval_symmetric_around_mean() {
        let values = [12.0, 19.5, 14.25, 17.0, 11.75, 18.5];
        let m = mean(&values).unwrap();
        let interval = t_interval(&values, 0.95).unwrap();
        assert!(((interval.upper - m) - (m - interval.lower)).abs() < 1e-9);
    }

    #[test]
    fn test_t_interval_widens_with_confidence() {
        let values = [1.0, 2.0, 3.0, 4.0, 5.0];
        let at_90 = t_interval(&values, 0.90).unwrap();
        let at_99 = t_interval(&values, 0.99).unwrap();
        assert!(at_99.width() > at_90.width());
    }

    #[test]
    fn test_t_interval_degenerate_samples() {
        assert_eq!(t_interval(&[], 0.95), None);
        assert_eq!(
            t_interval(&[7.5], 0.95),
            Some(ConfidenceInterval::collapsed(7.5))
        );
        // Zero variance collapses too
        assert_eq!(
            t_interval(&[2.0, 2.0, 2.0], 0.95),
            Some(ConfidenceInterval::collapsed(2.0))
        );
    }

    #[test]
    fn test_series_intervals_per_column() {
        let series = AggregatedSeries {
            method: AggregationMethod::BatchMeans,
            chunk_size: 2,
            rows: vec![
                AggregatedRow {
                    timestamp: 1.0,
                    client_id: 3.0,
                    bytes: 100.0,
                },
                AggregatedRow {
                    timestamp: 2.0,
                    client_id: 3.0,
                    bytes: 300.0,
                },
                AggregatedRow {
                    timestamp: 3.0,
                    client_id: 3.0,
                    bytes: 200.0,
                },
            ],
        };

        let intervals = series_intervals(&series, 0.95).unwrap();
        assert!((intervals.confidence - 0.95).abs() < 1e-9);
        // Constant client column collapses to its mean
        assert_eq!(intervals.client_id, ConfidenceInterval::collapsed(3.0));
        // Byte column interval brackets the mean of chunk means
        assert!(intervals.bytes.lower < 200.0 && 200.0 < intervals.bytes.upper);

        let empty = AggregatedSeries {
            method: AggregationMethod::BatchMeans,
            chunk_size: 2,
            rows: Vec::new(),
        };
        assert!(series_intervals(&empty, 0.95).is_none());
    }
}
