use indexmap::IndexMap;
use serde::Serialize;

/// p-values strictly below this are reported as significant.
pub const SIGNIFICANCE_LEVEL: f64 = 0.05;

/// Raw output of a hypothesis test. `None` marks a statistic that could not
/// be computed (too few values, zero variance, ...).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TestOutcome {
    pub p_value: Option<f64>,
    pub statistic: Option<f64>,
}

impl TestOutcome {
    pub fn unavailable() -> Self {
        Self {
            p_value: None,
            statistic: None,
        }
    }

    /// Both numbers must be finite, otherwise the whole outcome is unavailable.
    pub fn from_raw(p_value: f64, statistic: f64) -> Self {
        if p_value.is_finite() && statistic.is_finite() {
            Self {
                p_value: Some(p_value.clamp(0.0, 1.0)),
                statistic: Some(statistic),
            }
        } else {
            Self::unavailable()
        }
    }

    pub fn is_available(&self) -> bool {
        self.p_value.is_some() && self.statistic.is_some()
    }

    pub fn significant(&self) -> bool {
        self.p_value.map_or(false, |p| p < SIGNIFICANCE_LEVEL)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TTestReport {
    pub p_value: Option<f64>,
    pub t_stat: Option<f64>,
    pub significant: bool,
}

impl From<TestOutcome> for TTestReport {
    fn from(outcome: TestOutcome) -> Self {
        Self {
            p_value: outcome.p_value,
            t_stat: outcome.statistic,
            significant: outcome.significant(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnovaReport {
    pub p_value: Option<f64>,
    pub f_stat: Option<f64>,
    pub significant: bool,
}

impl From<TestOutcome> for AnovaReport {
    fn from(outcome: TestOutcome) -> Self {
        Self {
            p_value: outcome.p_value,
            f_stat: outcome.statistic,
            significant: outcome.significant(),
        }
    }
}

/// Dispersion metrics for one group.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupSummary {
    pub mean: Option<f64>,
    pub variance: Option<f64>,
    pub std_dev: Option<f64>,
    pub count: usize,
    /// Percentage, `std_dev / mean * 100`.
    pub coefficient_of_variation: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatisticalReport {
    pub t_test: TTestReport,
    pub anova: AnovaReport,
    pub intra_group_analysis: IndexMap<String, GroupSummary>,
}
