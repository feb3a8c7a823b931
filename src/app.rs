use crate::handlers::{self, diet, supplements, training};
use crate::state::AppState;
use axum::{
    Router,
    routing::{delete, get, post, put},
};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .merge(diet_routes())
        .merge(supplement_routes())
        .merge(training_routes())
        .with_state(state)
}

fn diet_routes() -> Router<AppState> {
    Router::new()
        .route("/api/diet", get(diet::get_diet))
        .route("/api/diet/client", put(diet::update_client))
        .route("/api/diet/totals", put(diet::update_totals))
        .route("/api/diet/timing/:index", put(diet::update_timing))
        .route("/api/diet/summary", get(diet::get_summary))
        .route("/api/diet/meals", delete(diet::clear_all_meals))
        .route("/api/diet/meals/:meal", delete(diet::clear_meal))
        .route("/api/diet/meals/:meal/rows/:row", put(diet::update_meal_row))
        .route("/api/diet/meals/:meal/foods", get(diet::meal_foods))
        .route("/api/diet/meals/:meal/autofill", post(diet::autofill_meal))
        .route("/api/diet/autofill", post(diet::autofill_all))
        .route("/api/diet/suitability/toggle", post(diet::toggle_suitability))
        .route("/api/diet/reset", post(diet::reset))
        .route("/api/diet/export", get(diet::export_diet))
        .route("/api/diet/import", post(diet::import_diet))
        .route("/api/foods", get(diet::list_foods).post(diet::create_food))
        .route("/api/foods/:id", put(diet::update_food))
        .route(
            "/api/timing-templates",
            get(diet::list_templates).post(diet::save_timing_template),
        )
        .route(
            "/api/timing-templates/:id",
            delete(diet::delete_timing_template),
        )
        .route("/api/timing-templates/:id/load", post(diet::load_timing_template))
}

fn supplement_routes() -> Router<AppState> {
    Router::new()
        .route("/api/supplements", get(supplements::get_supplements))
        .route("/api/supplements/catalog", post(supplements::add_supplement))
        .route(
            "/api/supplements/catalog/:id",
            put(supplements::update_supplement).delete(supplements::delete_supplement),
        )
        .route("/api/supplements/plan", put(supplements::update_plan_info))
        .route("/api/supplements/plan/rows/:row", put(supplements::update_plan_row))
        .route("/api/supplements/plan/save", post(supplements::save_plan))
        .route("/api/supplements/plan/new", post(supplements::new_plan))
        .route("/api/supplements/plan/clear", post(supplements::clear_plan))
        .route("/api/supplements/plan/export", get(supplements::export_plan))
        .route("/api/supplements/plans/:id", delete(supplements::delete_plan))
        .route("/api/supplements/plans/:id/load", post(supplements::load_plan))
}

fn training_routes() -> Router<AppState> {
    Router::new()
        .route("/api/splits", get(training::list_splits))
        .route(
            "/api/splits/:name",
            get(training::get_split)
                .put(training::put_split)
                .delete(training::delete_split),
        )
        .route("/api/splits/:name/volume", get(training::split_volume_chart))
        .route("/api/training/volume", post(training::volume))
}
