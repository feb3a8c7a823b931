use super::mutate;
use crate::errors::AppError;
use crate::models::{SaveSplitRequest, SavedSplit, SavedSplits, VolumeRequest};
use crate::state::{AppState, now_millis};
use crate::storage::SPLITS_KEY;
use crate::training::{save_split, search_splits, split_volume};
use crate::volume::{VolumeChart, aggregate_volume, tally_muscle_groups};
use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use tracing::info;

#[derive(Debug, Deserialize)]
pub struct SplitQuery {
    pub q: Option<String>,
}

pub async fn list_splits(
    State(state): State<AppState>,
    Query(query): Query<SplitQuery>,
) -> Json<SavedSplits> {
    let splits = state.splits.lock().await;
    let names = search_splits(&splits, query.q.as_deref().unwrap_or(""));
    Json(
        names
            .into_iter()
            .filter_map(|name| splits.get(name).map(|split| (name.to_string(), split.clone())))
            .collect(),
    )
}

pub async fn get_split(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<SavedSplit>, AppError> {
    state
        .splits
        .lock()
        .await
        .get(&name)
        .cloned()
        .map(Json)
        .ok_or_else(|| AppError::not_found(format!("no split {name}")))
}

pub async fn put_split(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Json(request): Json<SaveSplitRequest>,
) -> Result<Json<SavedSplit>, AppError> {
    let split = mutate(state.store.as_ref(), SPLITS_KEY, &state.splits, |splits| {
        save_split(splits, &name, request, now_millis())
    })
    .await?;
    info!(split = %name, exercises = split.exercises.len(), "split saved");
    Ok(Json(split))
}

pub async fn delete_split(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<SavedSplits>, AppError> {
    let splits = mutate(state.store.as_ref(), SPLITS_KEY, &state.splits, |splits| {
        splits
            .remove(&name)
            .ok_or_else(|| AppError::not_found(format!("no split {name}")))?;
        Ok(splits.clone())
    })
    .await?;
    Ok(Json(splits))
}

pub async fn split_volume_chart(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<VolumeChart>, AppError> {
    let splits = state.splits.lock().await;
    let split = splits
        .get(&name)
        .ok_or_else(|| AppError::not_found(format!("no split {name}")))?;
    Ok(Json(split_volume(split)))
}

pub async fn volume(Json(request): Json<VolumeRequest>) -> Json<VolumeChart> {
    Json(aggregate_volume(&tally_muscle_groups(&request.exercises)))
}
