use super::{attachment, mutate};
use crate::autofill::AllocationPolicy;
use crate::diet::{delete_template, save_template};
use crate::errors::AppError;
use crate::models::{
    ClientUpdate, DietState, DietSummary, Food, FoodInput, ImportResponse, Meal, MealRowUpdate,
    TimingRow, TimingTemplate, TimingTemplateInput, TimingUpdate, TotalsUpdate,
};
use crate::nutrition::build_summary;
use crate::state::{AppState, now_millis};
use crate::storage::{DIET_KEY, TEMPLATES_KEY, merge_top_level, persist_slice};
use axum::{
    Json,
    body::Bytes,
    extract::{Path, State},
    response::IntoResponse,
};
use tracing::{info, warn};

async fn mutate_diet<R>(
    state: &AppState,
    change: impl FnOnce(&mut DietState) -> Result<R, AppError>,
) -> Result<R, AppError> {
    mutate(state.store.as_ref(), DIET_KEY, &state.diet, change).await
}

pub async fn get_diet(State(state): State<AppState>) -> Json<DietState> {
    Json(state.diet.lock().await.clone())
}

pub async fn get_summary(State(state): State<AppState>) -> Json<DietSummary> {
    let diet = state.diet.lock().await;
    Json(build_summary(&diet, &state.config.thresholds))
}

pub async fn update_client(
    State(state): State<AppState>,
    Json(update): Json<ClientUpdate>,
) -> Result<Json<DietState>, AppError> {
    let diet = mutate_diet(&state, |diet| {
        diet.update_client(update);
        Ok(diet.clone())
    })
    .await?;
    Ok(Json(diet))
}

pub async fn update_totals(
    State(state): State<AppState>,
    Json(update): Json<TotalsUpdate>,
) -> Result<Json<DietState>, AppError> {
    let diet = mutate_diet(&state, |diet| {
        diet.update_totals(update);
        Ok(diet.clone())
    })
    .await?;
    Ok(Json(diet))
}

pub async fn update_timing(
    State(state): State<AppState>,
    Path(index): Path<usize>,
    Json(update): Json<TimingUpdate>,
) -> Result<Json<TimingRow>, AppError> {
    let row = mutate_diet(&state, |diet| diet.update_timing(index, update)).await?;
    Ok(Json(row))
}

pub async fn update_meal_row(
    State(state): State<AppState>,
    Path((meal, row)): Path<(usize, usize)>,
    Json(update): Json<MealRowUpdate>,
) -> Result<Json<Meal>, AppError> {
    let meal = mutate_diet(&state, |diet| diet.update_meal_row(meal, row, update)).await?;
    Ok(Json(meal))
}

pub async fn clear_meal(
    State(state): State<AppState>,
    Path(index): Path<usize>,
) -> Result<Json<DietState>, AppError> {
    let diet = mutate_diet(&state, |diet| {
        diet.clear_meal(index)?;
        Ok(diet.clone())
    })
    .await?;
    Ok(Json(diet))
}

pub async fn clear_all_meals(State(state): State<AppState>) -> Result<Json<DietState>, AppError> {
    let diet = mutate_diet(&state, |diet| {
        diet.clear_all_meals();
        Ok(diet.clone())
    })
    .await?;
    Ok(Json(diet))
}

pub async fn meal_foods(
    State(state): State<AppState>,
    Path(index): Path<usize>,
) -> Result<Json<Vec<Food>>, AppError> {
    let diet = state.diet.lock().await;
    if index >= diet.meals.len() {
        return Err(AppError::not_found(format!("no meal {index}")));
    }
    Ok(Json(diet.foods_for_meal(index)))
}

pub async fn autofill_meal(
    State(state): State<AppState>,
    Path(index): Path<usize>,
) -> Result<Json<Meal>, AppError> {
    let policy = AllocationPolicy::default();
    let meal = mutate_diet(&state, |diet| diet.autofill_meal(index, &policy)).await?;
    info!(meal = index, "meal autofilled");
    Ok(Json(meal))
}

pub async fn autofill_all(State(state): State<AppState>) -> Result<Json<DietState>, AppError> {
    let policy = AllocationPolicy::default();
    let diet = mutate_diet(&state, |diet| {
        diet.autofill_all(&policy);
        Ok(diet.clone())
    })
    .await?;
    info!("menu autofilled");
    Ok(Json(diet))
}

pub async fn toggle_suitability(State(state): State<AppState>) -> Result<Json<DietState>, AppError> {
    let diet = mutate_diet(&state, |diet| {
        diet.toggle_suitability();
        Ok(diet.clone())
    })
    .await?;
    Ok(Json(diet))
}

pub async fn reset(State(state): State<AppState>) -> Result<Json<DietState>, AppError> {
    let mut diet = state.diet.lock().await;
    state.store.remove(DIET_KEY).await?;
    *diet = DietState::default();
    info!("diet state reset");
    Ok(Json(diet.clone()))
}

pub async fn export_diet(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let diet = state.diet.lock().await;
    let body = serde_json::to_string_pretty(&*diet).map_err(AppError::internal)?;
    Ok(attachment(&diet.export_filename(), body))
}

pub async fn import_diet(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<ImportResponse>, AppError> {
    let mut diet = state.diet.lock().await;
    let imported = merge_top_level(&*diet, &body).map_err(|err| {
        warn!("rejected diet import: {err}");
        AppError::from(err)
    })?;

    persist_slice(state.store.as_ref(), DIET_KEY, &imported).await?;
    *diet = imported;
    info!("diet imported");

    Ok(Json(ImportResponse {
        imported: true,
        message: "Menu importato con successo".to_string(),
    }))
}

pub async fn list_foods(State(state): State<AppState>) -> Json<Vec<Food>> {
    Json(state.diet.lock().await.foods.clone())
}

pub async fn create_food(
    State(state): State<AppState>,
    Json(input): Json<FoodInput>,
) -> Result<Json<Food>, AppError> {
    let food = mutate_diet(&state, |diet| diet.add_food(input, now_millis())).await?;
    info!(id = %food.id, "food added");
    Ok(Json(food))
}

pub async fn update_food(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<FoodInput>,
) -> Result<Json<Food>, AppError> {
    let food = mutate_diet(&state, |diet| diet.update_food(&id, input)).await?;
    Ok(Json(food))
}

pub async fn list_templates(State(state): State<AppState>) -> Json<Vec<TimingTemplate>> {
    Json(state.templates.lock().await.clone())
}

pub async fn save_timing_template(
    State(state): State<AppState>,
    Json(input): Json<TimingTemplateInput>,
) -> Result<Json<TimingTemplate>, AppError> {
    let template = mutate(state.store.as_ref(), TEMPLATES_KEY, &state.templates, |templates| {
        save_template(templates, input, now_millis())
    })
    .await?;
    Ok(Json(template))
}

pub async fn delete_timing_template(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<TimingTemplate>>, AppError> {
    let templates = mutate(state.store.as_ref(), TEMPLATES_KEY, &state.templates, |templates| {
        if !delete_template(templates, &id) {
            return Err(AppError::not_found(format!("no template {id}")));
        }
        Ok(templates.clone())
    })
    .await?;
    Ok(Json(templates))
}

pub async fn load_timing_template(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DietState>, AppError> {
    let template = state
        .templates
        .lock()
        .await
        .iter()
        .find(|t| t.id == id)
        .cloned()
        .ok_or_else(|| AppError::not_found(format!("no template {id}")))?;

    let diet = mutate_diet(&state, |diet| {
        diet.apply_template(&template);
        Ok(diet.clone())
    })
    .await?;
    info!(template = %template.name, "timing template loaded");
    Ok(Json(diet))
}
