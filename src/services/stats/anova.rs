use statrs::distribution::{ContinuousCDF, FisherSnedecor};

use super::descriptive::mean;
use super::types::TestOutcome;

pub const MIN_GROUPS: usize = 2;
pub const MIN_GROUP_SIZE: usize = 2;

/// One-way ANOVA F-test across `groups`.
///
/// Needs at least two groups with at least two values each; anything less,
/// or a zero within-group variance, yields an unavailable outcome.
pub fn one_way_anova(groups: &[&[f64]]) -> TestOutcome {
    if groups.len() < MIN_GROUPS || groups.iter().any(|g| g.len() < MIN_GROUP_SIZE) {
        tracing::warn!(
            "ANOVA requires at least {} groups with at least {} values each (got sizes {:?})",
            MIN_GROUPS,
            MIN_GROUP_SIZE,
            groups.iter().map(|g| g.len()).collect::<Vec<_>>()
        );
        return TestOutcome::unavailable();
    }

    let k = groups.len();
    let n: usize = groups.iter().map(|g| g.len()).sum();
    let grand_mean = groups.iter().flat_map(|g| g.iter()).sum::<f64>() / n as f64;

    let (ss_between, ss_within) = groups.iter().fold((0.0, 0.0), |(between, within), group| {
        // Non-empty, checked above.
        let group_mean = mean(group).unwrap_or(grand_mean);
        let within_group: f64 = group.iter().map(|v| (v - group_mean).powi(2)).sum();
        (
            between + group.len() as f64 * (group_mean - grand_mean).powi(2),
            within + within_group,
        )
    });

    let df_between = (k - 1) as f64;
    let df_within = (n - k) as f64;
    let f_stat = (ss_between / df_between) / (ss_within / df_within);

    if !f_stat.is_finite() {
        tracing::warn!("ANOVA produced a non-finite F statistic (zero within-group variance)");
        return TestOutcome::unavailable();
    }

    let p_value = match FisherSnedecor::new(df_between, df_within) {
        Ok(dist) => dist.sf(f_stat),
        Err(e) => {
            tracing::warn!(
                "F distribution unavailable for df=({}, {}): {}",
                df_between,
                df_within,
                e
            );
            return TestOutcome::unavailable();
        }
    };

    TestOutcome::from_raw(p_value, f_stat)
}
