use axum::{routing::post, Json, Router};
use serde::Deserialize;
use std::sync::Arc;
use crate::{
    AppState,
    error::AppError,
    services::stats::{analyze, StatisticalReport},
};

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/analysis", post(analyze_arrays))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArrayAnalysisRequest {
    numeric_values: Vec<f64>,
    group_labels: Vec<String>,
    #[serde(default)]
    groups_to_compare: Option<Vec<String>>,
}

async fn analyze_arrays(
    Json(request): Json<ArrayAnalysisRequest>,
) -> Result<Json<StatisticalReport>, AppError> {
    tracing::info!(
        "Analyzing {} values across {} labels",
        request.numeric_values.len(),
        request.group_labels.len()
    );

    let report = tokio::task::spawn_blocking(move || {
        analyze(
            &request.numeric_values,
            &request.group_labels,
            request.groups_to_compare.as_deref(),
        )
    })
    .await??;

    Ok(Json(report))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(json: serde_json::Value) -> ArrayAnalysisRequest {
        serde_json::from_value(json).unwrap()
    }

    #[tokio::test]
    async fn analyzes_raw_arrays() {
        let Json(report) = analyze_arrays(Json(request(serde_json::json!({
            "numericValues": [1, 3, 5, 7],
            "groupLabels": ["A", "A", "B", "B"]
        }))))
        .await
        .unwrap();

        assert_eq!(report.intra_group_analysis["A"].mean, Some(2.0));
        assert!(report.t_test.t_stat.unwrap() < 0.0);
    }

    #[tokio::test]
    async fn honours_explicit_groups() {
        let Json(report) = analyze_arrays(Json(request(serde_json::json!({
            "numericValues": [1, 3, 5, 7, 2, 4],
            "groupLabels": ["A", "A", "B", "B", "C", "C"],
            "groupsToCompare": ["C", "A"]
        }))))
        .await
        .unwrap();

        // C = [2, 4] vs A = [1, 3]
        assert!(report.t_test.t_stat.unwrap() > 0.0);
        assert_eq!(report.intra_group_analysis.len(), 3);
    }

    #[tokio::test]
    async fn mismatched_arrays_are_rejected() {
        let err = analyze_arrays(Json(request(serde_json::json!({
            "numericValues": [1, 2, 3],
            "groupLabels": ["A", "B"]
        }))))
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::InputMismatch { values: 3, labels: 2 }));
    }
}
