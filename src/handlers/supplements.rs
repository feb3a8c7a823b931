use super::{attachment, mutate};
use crate::errors::AppError;
use crate::models::{
    PlanInfoUpdate, Supplement, SupplementInput, SupplementPlan, SupplementRowUpdate,
    SupplementsState,
};
use crate::state::{AppState, now_millis};
use crate::storage::SUPPLEMENTS_KEY;
use crate::supplements::plan_export_filename;
use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};

async fn mutate_supplements<R>(
    state: &AppState,
    change: impl FnOnce(&mut SupplementsState) -> Result<R, AppError>,
) -> Result<R, AppError> {
    mutate(state.store.as_ref(), SUPPLEMENTS_KEY, &state.supplements, change).await
}

pub async fn get_supplements(State(state): State<AppState>) -> Json<SupplementsState> {
    Json(state.supplements.lock().await.clone())
}

pub async fn add_supplement(
    State(state): State<AppState>,
    Json(input): Json<SupplementInput>,
) -> Result<Json<Supplement>, AppError> {
    let supplement = mutate_supplements(&state, |s| s.add_supplement(input, now_millis())).await?;
    Ok(Json(supplement))
}

pub async fn update_supplement(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<SupplementInput>,
) -> Result<Json<Supplement>, AppError> {
    let supplement = mutate_supplements(&state, |s| s.update_supplement(&id, input)).await?;
    Ok(Json(supplement))
}

pub async fn delete_supplement(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SupplementsState>, AppError> {
    let updated = mutate_supplements(&state, |s| {
        if !s.delete_supplement(&id) {
            return Err(AppError::not_found(format!("no supplement {id}")));
        }
        Ok(s.clone())
    })
    .await?;
    Ok(Json(updated))
}

pub async fn update_plan_info(
    State(state): State<AppState>,
    Json(update): Json<PlanInfoUpdate>,
) -> Result<Json<SupplementPlan>, AppError> {
    let plan = mutate_supplements(&state, |s| s.update_plan_info(update)).await?;
    Ok(Json(plan))
}

pub async fn update_plan_row(
    State(state): State<AppState>,
    Path(row): Path<usize>,
    Json(update): Json<SupplementRowUpdate>,
) -> Result<Json<SupplementPlan>, AppError> {
    let plan = mutate_supplements(&state, |s| s.update_plan_row(row, update)).await?;
    Ok(Json(plan))
}

pub async fn save_plan(State(state): State<AppState>) -> Result<Json<SupplementPlan>, AppError> {
    let plan = mutate_supplements(&state, |s| s.save_plan()).await?;
    Ok(Json(plan))
}

pub async fn new_plan(State(state): State<AppState>) -> Result<Json<SupplementPlan>, AppError> {
    let plan = mutate_supplements(&state, |s| Ok(s.new_plan(now_millis()))).await?;
    Ok(Json(plan))
}

pub async fn clear_plan(State(state): State<AppState>) -> Result<Json<SupplementPlan>, AppError> {
    let plan = mutate_supplements(&state, |s| s.clear_plan()).await?;
    Ok(Json(plan))
}

pub async fn load_plan(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SupplementPlan>, AppError> {
    let plan = mutate_supplements(&state, |s| s.load_plan(&id)).await?;
    Ok(Json(plan))
}

pub async fn delete_plan(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SupplementsState>, AppError> {
    let updated = mutate_supplements(&state, |s| {
        if !s.delete_plan(&id) {
            return Err(AppError::not_found(format!("no plan {id}")));
        }
        Ok(s.clone())
    })
    .await?;
    Ok(Json(updated))
}

pub async fn export_plan(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let supplements = state.supplements.lock().await;
    let plan = supplements
        .current_plan
        .as_ref()
        .ok_or_else(|| AppError::not_found("no current plan"))?;
    let body = serde_json::to_string_pretty(plan).map_err(AppError::internal)?;
    Ok(attachment(&plan_export_filename(plan), body))
}
