//! Two-sample comparison.
//!
//! Pooled-variance Student's t-test, two-tailed, `df = n1 + n2 - 2`.

use statrs::distribution::{ContinuousCDF, StudentsT};

use super::descriptive::{mean, variance};
use super::types::TestOutcome;

pub const MIN_GROUP_SIZE: usize = 2;

pub fn student_t_test(group1: &[f64], group2: &[f64]) -> TestOutcome {
    if group1.len() < MIN_GROUP_SIZE || group2.len() < MIN_GROUP_SIZE {
        tracing::warn!(
            "t-test requires at least {} values in each group (got {} and {})",
            MIN_GROUP_SIZE,
            group1.len(),
            group2.len()
        );
        return TestOutcome::unavailable();
    }

    let (n1, n2) = (group1.len() as f64, group2.len() as f64);
    let (Some(mean1), Some(mean2)) = (mean(group1), mean(group2)) else {
        return TestOutcome::unavailable();
    };
    let (Some(var1), Some(var2)) = (variance(group1, Some(mean1)), variance(group2, Some(mean2)))
    else {
        return TestOutcome::unavailable();
    };

    let df = n1 + n2 - 2.0;
    let pooled = ((n1 - 1.0) * var1 + (n2 - 1.0) * var2) / df;
    let std_err = (pooled * (1.0 / n1 + 1.0 / n2)).sqrt();
    let t_stat = (mean1 - mean2) / std_err;

    if !t_stat.is_finite() {
        tracing::warn!("t-test produced a non-finite statistic (zero pooled variance)");
        return TestOutcome::unavailable();
    }

    let p_value = match StudentsT::new(0.0, 1.0, df) {
        Ok(dist) => 2.0 * dist.sf(t_stat.abs()),
        Err(e) => {
            tracing::warn!("t distribution unavailable for df={}: {}", df, e);
            return TestOutcome::unavailable();
        }
    };

    TestOutcome::from_raw(p_value, t_stat)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_groups_show_no_difference() {
        let group = [1.0, 2.0, 3.0, 4.0];
        let outcome = student_t_test(&group, &group);
        assert!(outcome.statistic.unwrap().abs() < 1e-12);
        assert!((outcome.p_value.unwrap() - 1.0).abs() < 1e-9);
        assert!(!outcome.significant());
    }

    #[test]
    fn small_groups_are_unavailable() {
        assert_eq!(student_t_test(&[1.0], &[2.0, 3.0]), TestOutcome::unavailable());
        assert_eq!(student_t_test(&[1.0, 2.0], &[]), TestOutcome::unavailable());
    }

    #[test]
    fn constant_groups_are_unavailable() {
        let outcome = student_t_test(&[2.0, 2.0, 2.0], &[2.0, 2.0]);
        assert!(!outcome.is_available());
        assert!(!outcome.significant());
    }

    #[test]
    fn lower_first_group_gives_negative_statistic() {
        // A = [1, 3], B = [5, 7]: pooled sd = sqrt(2), t = -4 / sqrt(2) = -2.828..., df = 2
        let outcome = student_t_test(&[1.0, 3.0], &[5.0, 7.0]);
        let t = outcome.statistic.unwrap();
        assert!((t + 8f64.sqrt()).abs() < 1e-12);
        let p = outcome.p_value.unwrap();
        assert!(p > 0.05 && p < 0.2, "p = {p}");
    }

    #[test]
    fn well_separated_groups_are_significant() {
        let a = [10.1, 9.8, 10.3, 10.0, 9.9, 10.2];
        let b = [12.0, 12.3, 11.8, 12.1, 11.9, 12.2];
        let outcome = student_t_test(&a, &b);
        assert!(outcome.statistic.unwrap() < 0.0);
        assert!(outcome.p_value.unwrap() < 1e-6);
        assert!(outcome.significant());
    }

    #[test]
    fn matches_reference_value() {
        // scipy.stats.ttest_ind([1, 2, 3, 4, 5], [2, 4, 6, 8, 10]) -> t = -1.8973665961, p = 0.0943497
        let outcome = student_t_test(&[1.0, 2.0, 3.0, 4.0, 5.0], &[2.0, 4.0, 6.0, 8.0, 10.0]);
        assert!((outcome.statistic.unwrap() + 1.8973665961).abs() < 1e-8);
        assert!((outcome.p_value.unwrap() - 0.0943497).abs() < 1e-5);
    }
}
