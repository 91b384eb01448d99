use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use crate::{
    AppState,
    error::AppError,
    models::Dataset,
    services::{
        decoder::{self, load_file_from_url},
        profile::{ColumnKind, DatasetProfile},
        stats::{analyze, extract_columns, StatisticalReport},
        store::StoredDataset,
    },
};

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/datasets", post(upload_dataset))
        .route("/datasets/import", post(import_dataset))
        .route("/datasets/profile", post(profile_dataset))
        .route("/datasets/:id", get(get_dataset).delete(delete_dataset))
        .route("/datasets/:id/analysis", post(analyze_dataset))
}

#[derive(Debug, Deserialize)]
pub struct UploadParams {
    file_name: String,
    #[serde(rename = "type")]
    file_type: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ImportRequest {
    file_name: String,
    #[serde(rename = "type")]
    file_type: Option<String>,
    signed_url: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetAnalysisRequest {
    numeric_column: String,
    group_column: String,
    #[serde(default)]
    groups_to_compare: Option<Vec<String>>,
}

#[derive(Debug, Serialize)]
pub struct DatasetResponse {
    id: String,
    profile: DatasetProfile,
}

impl From<&StoredDataset> for DatasetResponse {
    fn from(stored: &StoredDataset) -> Self {
        Self {
            id: stored.id.clone(),
            profile: stored.profile.clone(),
        }
    }
}

/// Decode, profile and store in one blocking step.
fn ingest(
    state: &AppState,
    file_name: &str,
    file_type: Option<&str>,
    file_data: &[u8],
) -> Result<Arc<StoredDataset>, AppError> {
    let dataset = decoder::decode(file_name, file_type, file_data)?;
    let profile = state.profiler.profile(&dataset)?;
    let stored = state.store.insert(dataset, profile);
    tracing::debug!("Dataset store now holds {} datasets", state.store.len());
    Ok(stored)
}

async fn ingest_blocking(
    state: Arc<AppState>,
    file_name: String,
    file_type: Option<String>,
    file_data: Bytes,
) -> Result<Arc<StoredDataset>, AppError> {
    tokio::task::spawn_blocking(move || {
        ingest(&state, &file_name, file_type.as_deref(), &file_data)
    })
    .await?
}

async fn upload_dataset(
    State(state): State<Arc<AppState>>,
    Query(params): Query<UploadParams>,
    body: Bytes,
) -> Result<Json<DatasetResponse>, AppError> {
    let start = std::time::Instant::now();
    tracing::info!("Received upload {} ({}KB)", params.file_name, body.len() / 1024);

    if body.is_empty() {
        return Err(AppError::InvalidInput("No file provided".to_string()));
    }

    let stored = ingest_blocking(state, params.file_name, params.file_type, body).await?;
    tracing::info!("Upload {} processed in {:?}", stored.id, start.elapsed());
    Ok(Json(stored.as_ref().into()))
}

async fn import_dataset(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ImportRequest>,
) -> Result<Json<DatasetResponse>, AppError> {
    let start = std::time::Instant::now();
    tracing::info!(
        "Importing {} from signed URL (length {})",
        request.file_name,
        request.signed_url.len()
    );

    let download_start = std::time::Instant::now();
    let file_data = load_file_from_url(&request.signed_url, state.config.max_file_size).await?;
    tracing::info!(
        "File downloaded, size: {}KB, took: {:?}",
        file_data.len() / 1024,
        download_start.elapsed()
    );

    let stored = ingest_blocking(state, request.file_name, request.file_type, file_data).await?;
    tracing::info!("Import {} processed in {:?}", stored.id, start.elapsed());
    Ok(Json(stored.as_ref().into()))
}

async fn profile_dataset(
    State(state): State<Arc<AppState>>,
    Json(dataset): Json<Dataset>,
) -> Result<Json<DatasetProfile>, AppError> {
    tracing::info!(
        "Profiling {} inline rows x {} columns",
        dataset.row_count(),
        dataset.columns.len()
    );
    let profile = tokio::task::spawn_blocking(move || state.profiler.profile(&dataset)).await??;
    Ok(Json(profile))
}

async fn get_dataset(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<DatasetResponse>, AppError> {
    let stored = state.store.get(&id)?;
    Ok(Json(stored.as_ref().into()))
}

async fn delete_dataset(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    if state.store.remove(&id) {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::DatasetNotFound(id))
    }
}

async fn analyze_dataset(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(request): Json<DatasetAnalysisRequest>,
) -> Result<Json<StatisticalReport>, AppError> {
    let start = std::time::Instant::now();
    let stored = state.store.get(&id)?;
    tracing::info!(
        "Analyzing {} by {} in dataset {}",
        request.numeric_column,
        request.group_column,
        id
    );

    if stored.profile.kind_of(&request.numeric_column) != Some(ColumnKind::Numeric) {
        tracing::warn!(
            "Column {} is not classified as numeric; only parseable values will be used",
            request.numeric_column
        );
    }

    let report = tokio::task::spawn_blocking(move || {
        let pair = extract_columns(
            &stored.dataset,
            &request.numeric_column,
            &request.group_column,
        )?;
        analyze(&pair.values, &pair.labels, request.groups_to_compare.as_deref())
    })
    .await??;

    tracing::info!("Analysis for dataset {} completed in {:?}", id, start.elapsed());
    Ok(Json(report))
}
