use indexmap::IndexMap;

use super::anova::one_way_anova;
use super::descriptive::summarize;
use super::grouping::group_values;
use super::ttest::student_t_test;
use super::types::*;
use crate::error::AppError;

/// Compares `numeric_values` across the groups named by `group_labels`.
///
/// The t-test runs on the first two compared groups only; ANOVA runs on all
/// of them. The intragroup section covers every label observed in the data,
/// regardless of `groups_to_compare`. Statistically degenerate input never
/// fails, it shows up as `None` fields in the report. The only error is a
/// length mismatch between values and labels.
pub fn analyze<S: AsRef<str>>(
    numeric_values: &[f64],
    group_labels: &[S],
    groups_to_compare: Option<&[String]>,
) -> Result<StatisticalReport, AppError> {
    let grouping = group_values(numeric_values, group_labels, groups_to_compare)?;
    let compared = grouping.compared();
    tracing::debug!(
        "Comparing groups {:?}",
        compared.iter().map(|g| g.label.as_str()).collect::<Vec<_>>()
    );

    let t_test = match compared {
        [first, second, ..] => student_t_test(&first.values, &second.values),
        _ => TestOutcome {
            p_value: Some(1.0),
            statistic: Some(0.0),
        },
    };

    let anova = one_way_anova(&grouping.compared_values());

    let intra_group_analysis: IndexMap<String, GroupSummary> = grouping
        .observed()
        .iter()
        .map(|(label, values)| (label.clone(), summarize(values)))
        .collect();

    tracing::debug!(
        "Analyzed {} values in {} groups ({} compared): t-test available={}, ANOVA available={}",
        numeric_values.len(),
        grouping.observed().len(),
        compared.len(),
        t_test.is_available(),
        anova.is_available()
    );

    Ok(StatisticalReport {
        t_test: t_test.into(),
        anova: anova.into(),
        intra_group_analysis,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_group_report() {
        let report = analyze(&[1.0, 3.0, 5.0, 7.0], &["A", "A", "B", "B"], None).unwrap();

        let a = &report.intra_group_analysis["A"];
        let b = &report.intra_group_analysis["B"];
        assert_eq!(a.mean, Some(2.0));
        assert_eq!(b.mean, Some(6.0));
        assert_eq!(a.count, 2);

        let t = report.t_test.t_stat.unwrap();
        assert!(t < 0.0);
        assert!(report.t_test.p_value.unwrap() > 0.0);
        assert!(report.anova.f_stat.unwrap() > 0.0);
        // Two groups: F = t^2 and both tests share the p-value.
        assert!((report.anova.f_stat.unwrap() - t * t).abs() < 1e-9);
        assert_eq!(report.t_test.significant, report.anova.significant);
    }

    #[test]
    fn fewer_than_two_groups_means_no_difference() {
        let report = analyze(&[1.0, 2.0, 3.0], &["A", "A", "A"], None).unwrap();
        assert_eq!(report.t_test.p_value, Some(1.0));
        assert_eq!(report.t_test.t_stat, Some(0.0));
        assert!(!report.t_test.significant);
        assert_eq!(report.anova.p_value, None);
        assert_eq!(report.anova.f_stat, None);
        assert!(!report.anova.significant);
        assert_eq!(report.intra_group_analysis.len(), 1);
    }

    #[test]
    fn t_test_uses_first_two_groups_only() {
        let values = [1.0, 2.0, 3.0, 1.5, 2.5, 2.0, 100.0, 101.0, 102.0];
        let labels = ["A", "A", "A", "B", "B", "B", "C", "C", "C"];
        let report = analyze(&values, &labels, None).unwrap();

        assert!(!report.t_test.significant);
        assert!(report.anova.significant);
        assert_eq!(
            report.intra_group_analysis.keys().collect::<Vec<_>>(),
            vec!["A", "B", "C"]
        );
    }

    #[test]
    fn explicit_selection_limits_tests_but_not_intragroup() {
        let values = [1.0, 2.0, 3.0, 10.0, 11.0, 12.0, 5.0, 6.0];
        let labels = ["A", "A", "A", "B", "B", "B", "C", "C"];
        let selection = vec!["C".to_string(), "A".to_string()];
        let report = analyze(&values, &labels, Some(selection.as_slice())).unwrap();

        // C (mean 5.5) vs A (mean 2): positive statistic.
        assert!(report.t_test.t_stat.unwrap() > 0.0);
        assert_eq!(report.intra_group_analysis.len(), 3);
        assert_eq!(report.intra_group_analysis["B"].count, 3);
    }

    #[test]
    fn unknown_selected_label_degrades_softly() {
        let selection = vec!["A".to_string(), "missing".to_string()];
        let report = analyze(&[1.0, 2.0, 3.0], &["A", "A", "A"], Some(selection.as_slice())).unwrap();
        assert_eq!(report.t_test.p_value, None);
        assert_eq!(report.t_test.t_stat, None);
        assert_eq!(report.anova.p_value, None);
        assert!(!report.intra_group_analysis.contains_key("missing"));
    }

    #[test]
    fn mismatched_lengths_fail_hard() {
        let err = analyze(&[1.0, 2.0, 3.0], &["A", "B"], None).unwrap_err();
        assert!(matches!(err, AppError::InputMismatch { .. }));
    }

    #[test]
    fn serializes_sentinels_as_null() {
        let report = analyze(&[1.0, 2.0], &["A", "B"], None).unwrap();
        let json = serde_json::to_value(&report).unwrap();
        assert!(json["tTest"]["pValue"].is_null());
        assert!(json["tTest"]["tStat"].is_null());
        assert_eq!(json["tTest"]["significant"], false);
        assert!(json["anova"]["fStat"].is_null());
        assert_eq!(json["intraGroupAnalysis"]["A"]["count"], 1);
        assert!(json["intraGroupAnalysis"]["A"]["stdDev"].is_null());
        assert!(json["intraGroupAnalysis"]["A"]["coefficientOfVariation"].is_null());
    }
}
