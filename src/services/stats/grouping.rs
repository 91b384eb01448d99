use indexmap::IndexMap;

use crate::error::AppError;

#[derive(Debug, Clone, PartialEq)]
pub struct Group {
    pub label: String,
    pub values: Vec<f64>,
}

/// Values partitioned by label.
///
/// `observed` holds every label seen in the data in first-seen order;
/// `compared` is the selection the tests run on, either all observed groups
/// or the caller's explicit list.
#[derive(Debug, Clone)]
pub struct Grouping {
    observed: IndexMap<String, Vec<f64>>,
    compared: Vec<Group>,
}

impl Grouping {
    pub fn observed(&self) -> &IndexMap<String, Vec<f64>> {
        &self.observed
    }

    pub fn compared(&self) -> &[Group] {
        &self.compared
    }

    pub fn compared_values(&self) -> Vec<&[f64]> {
        self.compared.iter().map(|g| g.values.as_slice()).collect()
    }
}

pub fn group_values<S: AsRef<str>>(
    values: &[f64],
    labels: &[S],
    groups_to_compare: Option<&[String]>,
) -> Result<Grouping, AppError> {
    if values.len() != labels.len() {
        return Err(AppError::InputMismatch {
            values: values.len(),
            labels: labels.len(),
        });
    }

    let mut observed: IndexMap<String, Vec<f64>> = IndexMap::new();
    for (value, label) in values.iter().zip(labels) {
        let label = label.as_ref();
        match observed.get_mut(label) {
            Some(bucket) => bucket.push(*value),
            None => {
                observed.insert(label.to_string(), vec![*value]);
            }
        }
    }

    let compared = match groups_to_compare {
        Some(selection) => selection
            .iter()
            .map(|label| Group {
                label: label.clone(),
                values: observed.get(label.as_str()).cloned().unwrap_or_default(),
            })
            .collect(),
        None => observed
            .iter()
            .map(|(label, values)| Group {
                label: label.clone(),
                values: values.clone(),
            })
            .collect(),
    };

    Ok(Grouping { observed, compared })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn groups_in_first_seen_order() {
        let grouping = group_values(
            &[1.0, 5.0, 3.0, 7.0, 9.0],
            &labels(&["A", "B", "A", "B", "C"]),
            None,
        )
        .unwrap();

        let compared = grouping.compared();
        assert_eq!(compared.len(), 3);
        assert_eq!(compared[0], Group { label: "A".into(), values: vec![1.0, 3.0] });
        assert_eq!(compared[1], Group { label: "B".into(), values: vec![5.0, 7.0] });
        assert_eq!(compared[2].label, "C");
        assert_eq!(
            grouping.observed().keys().collect::<Vec<_>>(),
            vec!["A", "B", "C"]
        );
    }

    #[test]
    fn explicit_selection_restricts_and_orders() {
        let explicit = labels(&["B", "Z", "A"]);
        let grouping = group_values(
            &[1.0, 5.0, 3.0, 7.0, 9.0],
            &labels(&["A", "B", "A", "B", "C"]),
            Some(explicit.as_slice()),
        )
        .unwrap();

        let compared = grouping.compared();
        assert_eq!(compared.len(), 3);
        assert_eq!(compared[0].values, vec![5.0, 7.0]);
        assert_eq!(compared[1].label, "Z");
        assert!(compared[1].values.is_empty());
        assert_eq!(compared[2].values, vec![1.0, 3.0]);
        // Observed groups are unaffected by the selection.
        assert_eq!(grouping.observed().len(), 3);
    }

    #[test]
    fn length_mismatch_is_rejected() {
        let err = group_values(&[1.0, 2.0], &labels(&["A"]), None).unwrap_err();
        assert!(matches!(err, AppError::InputMismatch { values: 2, labels: 1 }));
    }

    #[test]
    fn empty_input_yields_no_groups() {
        let grouping = group_values::<String>(&[], &[], None).unwrap();
        assert!(grouping.compared().is_empty());
        assert!(grouping.observed().is_empty());
    }
}
