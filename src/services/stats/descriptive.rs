//! Descriptive statistics over plain `f64` slices.
//!
//! Every function returns `None` instead of NaN when the statistic is not
//! defined for its input, and propagates `None` inputs. Results that
//! overflow to infinity are `None` as well.

use super::types::GroupSummary;

pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    finite(values.iter().sum::<f64>() / values.len() as f64)
}

/// Sample variance (Bessel's correction, `n - 1`).
pub fn variance(values: &[f64], mean: Option<f64>) -> Option<f64> {
    let mean = mean?;
    if values.len() < 2 {
        return None;
    }
    let sum_sq: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
    finite(sum_sq / (values.len() - 1) as f64)
}

pub fn std_dev(variance: Option<f64>) -> Option<f64> {
    variance.map(f64::sqrt)
}

/// `std_dev / mean * 100`, undefined for a zero mean.
pub fn coefficient_of_variation(std_dev: Option<f64>, mean: Option<f64>) -> Option<f64> {
    match (std_dev, mean) {
        (Some(sd), Some(m)) if m != 0.0 => finite(sd / m * 100.0),
        _ => None,
    }
}

fn finite(value: f64) -> Option<f64> {
    value.is_finite().then_some(value)
}

pub fn summarize(values: &[f64]) -> GroupSummary {
    let mean = mean(values);
    let variance = variance(values, mean);
    let std_dev = std_dev(variance);

    GroupSummary {
        mean,
        variance,
        std_dev,
        count: values.len(),
        coefficient_of_variation: coefficient_of_variation(std_dev, mean),
    }
}
