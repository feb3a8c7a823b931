use crate::autofill::{AllocationPolicy, autofill_day, autofill_meal};
use crate::catalog::default_foods;
use crate::errors::AppError;
use crate::meals::{MealTag, suitable_foods};
use crate::models::{
    ClientUpdate, DietState, Food, FoodInput, MEAL_COUNT, MEAL_ROWS, Meal, MealRow, MealRowUpdate,
    TimingRow, TimingTemplate, TimingTemplateInput, TimingUpdate, TotalsUpdate,
};
use crate::nutrition::meal_targets;
use crate::storage::Normalize;

const MAX_AMOUNT: f64 = 99_999.0;

pub fn clamp_amount(value: f64) -> f64 {
    if value.is_finite() {
        value.clamp(0.0, MAX_AMOUNT)
    } else {
        0.0
    }
}

/// Next free id of the form `<prefix><millis>`.
pub fn unique_id(prefix: &str, now_ms: i64, taken: impl Fn(&str) -> bool) -> String {
    let mut stamp = now_ms;
    loop {
        let id = format!("{prefix}{stamp}");
        if !taken(&id) {
            return id;
        }
        stamp += 1;
    }
}

pub fn empty_timing() -> Vec<TimingRow> {
    vec![TimingRow::default(); MEAL_COUNT]
}

pub fn empty_meals() -> Vec<Meal> {
    vec![Meal::default(); MEAL_COUNT]
}

impl Default for DietState {
    fn default() -> Self {
        Self {
            client: Default::default(),
            totals: Default::default(),
            timing: empty_timing(),
            foods: default_foods(),
            meals: empty_meals(),
            enforce_suitability: true,
        }
    }
}

impl Normalize for DietState {
    /// Pads or cuts timing, meals and rows back to the fixed 6 x 5 layout.
    fn normalize(&mut self) {
        self.timing.resize(MEAL_COUNT, TimingRow::default());
        self.meals.resize(MEAL_COUNT, Meal::default());
        for meal in &mut self.meals {
            meal.rows.resize(MEAL_ROWS, MealRow::default());
        }
    }
}

impl DietState {
    pub fn update_client(&mut self, update: ClientUpdate) {
        if let Some(nome) = update.nome {
            self.client.nome = nome;
        }
        if let Some(cognome) = update.cognome {
            self.client.cognome = cognome;
        }
        if let Some(peso) = update.peso {
            self.client.peso = clamp_amount(peso);
        }
    }

    pub fn update_totals(&mut self, update: TotalsUpdate) {
        if let Some(carbs) = update.carbs {
            self.totals.carbs = clamp_amount(carbs);
        }
        if let Some(protein) = update.protein {
            self.totals.protein = clamp_amount(protein);
        }
        if let Some(fat) = update.fat {
            self.totals.fat = clamp_amount(fat);
        }
    }

    pub fn update_timing(&mut self, index: usize, update: TimingUpdate) -> Result<TimingRow, AppError> {
        let row = self
            .timing
            .get_mut(index)
            .ok_or_else(|| AppError::not_found(format!("no timing row {index}")))?;
        if let Some(c) = update.c_perc {
            row.c_perc = clamp_amount(c);
        }
        if let Some(p) = update.p_perc {
            row.p_perc = clamp_amount(p);
        }
        if let Some(f) = update.f_perc {
            row.f_perc = clamp_amount(f);
        }
        Ok(*row)
    }

    fn meal_mut(&mut self, index: usize) -> Result<&mut Meal, AppError> {
        self.meals
            .get_mut(index)
            .ok_or_else(|| AppError::not_found(format!("no meal {index}")))
    }

    pub fn update_meal_row(
        &mut self,
        meal: usize,
        row: usize,
        update: MealRowUpdate,
    ) -> Result<Meal, AppError> {
        let target = self.meal_mut(meal)?;
        let entry = target
            .rows
            .get_mut(row)
            .ok_or_else(|| AppError::not_found(format!("no row {row} in meal {meal}")))?;
        if let Some(food_id) = update.food_id {
            entry.food_id = food_id;
        }
        if let Some(grams) = update.grams {
            entry.grams = clamp_amount(grams);
        }
        Ok(target.clone())
    }

    pub fn set_meal(&mut self, index: usize, meal: Meal) -> Result<(), AppError> {
        *self.meal_mut(index)? = meal;
        Ok(())
    }

    pub fn clear_meal(&mut self, index: usize) -> Result<(), AppError> {
        self.set_meal(index, Meal::default())
    }

    pub fn clear_all_meals(&mut self) {
        self.meals = empty_meals();
    }

    pub fn toggle_suitability(&mut self) -> bool {
        self.enforce_suitability = !self.enforce_suitability;
        self.enforce_suitability
    }

    pub fn add_food(&mut self, input: FoodInput, now_ms: i64) -> Result<Food, AppError> {
        let name = input
            .name
            .filter(|name| !name.trim().is_empty())
            .ok_or_else(|| AppError::bad_request("food name is required"))?;

        let id = unique_id("food_", now_ms, |id| self.foods.iter().any(|f| f.id == id));
        let food = Food {
            id,
            name,
            category: input.category.unwrap_or_default(),
            carbs: clamp_amount(input.carbs.unwrap_or(0.0)),
            protein: clamp_amount(input.protein.unwrap_or(0.0)),
            fat: clamp_amount(input.fat.unwrap_or(0.0)),
            suitable: input.suitable.unwrap_or_default(),
        };
        self.foods.push(food.clone());
        Ok(food)
    }

    pub fn update_food(&mut self, id: &str, input: FoodInput) -> Result<Food, AppError> {
        let food = self
            .foods
            .iter_mut()
            .find(|f| f.id == id)
            .ok_or_else(|| AppError::not_found(format!("no food {id}")))?;

        if let Some(name) = input.name.filter(|name| !name.trim().is_empty()) {
            food.name = name;
        }
        if let Some(category) = input.category {
            food.category = category;
        }
        if let Some(carbs) = input.carbs {
            food.carbs = clamp_amount(carbs);
        }
        if let Some(protein) = input.protein {
            food.protein = clamp_amount(protein);
        }
        if let Some(fat) = input.fat {
            food.fat = clamp_amount(fat);
        }
        if let Some(suitable) = input.suitable {
            food.suitable = suitable;
        }
        Ok(food.clone())
    }

    pub fn foods_for_meal(&self, index: usize) -> Vec<Food> {
        suitable_foods(&self.foods, self.enforce_suitability, MealTag::for_meal(index))
    }

    pub fn autofill_meal(&mut self, index: usize, policy: &AllocationPolicy) -> Result<Meal, AppError> {
        let target = meal_targets(&self.timing, &self.totals)
            .get(index)
            .copied()
            .ok_or_else(|| AppError::not_found(format!("no timing row {index}")))?;
        let meal = autofill_meal(index, &target, &self.foods_for_meal(index), policy);
        self.set_meal(index, meal.clone())?;
        Ok(meal)
    }

    pub fn autofill_all(&mut self, policy: &AllocationPolicy) {
        let mut meals = autofill_day(self, policy);
        meals.resize(MEAL_COUNT, Meal::default());
        self.meals = meals;
    }

    pub fn apply_template(&mut self, template: &TimingTemplate) {
        self.timing = template.timing.clone();
        self.timing.resize(MEAL_COUNT, TimingRow::default());
    }

    pub fn export_filename(&self) -> String {
        let cognome = if self.client.cognome.is_empty() {
            "cliente"
        } else {
            self.client.cognome.as_str()
        };
        format!("menu_{cognome}_{}.json", self.client.nome)
    }
}

/// Inserts a template or replaces the one with the same id.
pub fn save_template(
    templates: &mut Vec<TimingTemplate>,
    input: TimingTemplateInput,
    now_ms: i64,
) -> Result<TimingTemplate, AppError> {
    if input.name.trim().is_empty() {
        return Err(AppError::bad_request("template name is required"));
    }

    let id = match input.id.filter(|id| !id.is_empty()) {
        Some(id) => id,
        None => unique_id("template_", now_ms, |id| templates.iter().any(|t| t.id == id)),
    };
    let mut timing = input.timing;
    timing.resize(MEAL_COUNT, TimingRow::default());

    let template = TimingTemplate {
        id,
        name: input.name,
        description: input.description,
        timing,
    };

    match templates.iter_mut().find(|t| t.id == template.id) {
        Some(existing) => *existing = template.clone(),
        None => templates.push(template.clone()),
    }
    Ok(template)
}

pub fn delete_template(templates: &mut Vec<TimingTemplate>, id: &str) -> bool {
    let before = templates.len();
    templates.retain(|t| t.id != id);
    templates.len() != before
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FoodCategory;

    fn planned_state() -> DietState {
        let mut state = DietState::default();
        state.update_totals(TotalsUpdate {
            carbs: Some(300.0),
            protein: Some(150.0),
            fat: Some(70.0),
        });
        state.timing = vec![
            TimingRow { c_perc: 25.0, p_perc: 20.0, f_perc: 15.0 },
            TimingRow { c_perc: 10.0, p_perc: 15.0, f_perc: 20.0 },
            TimingRow { c_perc: 25.0, p_perc: 20.0, f_perc: 15.0 },
            TimingRow { c_perc: 10.0, p_perc: 15.0, f_perc: 20.0 },
            TimingRow { c_perc: 25.0, p_perc: 20.0, f_perc: 15.0 },
            TimingRow { c_perc: 5.0, p_perc: 10.0, f_perc: 15.0 },
        ];
        state
    }

    #[test]
    fn default_state_has_fixed_layout() {
        let state = DietState::default();
        assert_eq!(state.timing.len(), MEAL_COUNT);
        assert_eq!(state.meals.len(), MEAL_COUNT);
        assert!(state.meals.iter().all(|m| m.rows.len() == MEAL_ROWS));
        assert!(state.enforce_suitability);
    }

    #[test]
    fn meal_row_updates_clamp_grams() {
        let mut state = DietState::default();
        let meal = state
            .update_meal_row(
                2,
                0,
                MealRowUpdate {
                    food_id: Some("riso".to_string()),
                    grams: Some(-30.0),
                },
            )
            .unwrap();
        assert_eq!(meal.rows[0], MealRow::new("riso", 0.0));

        assert!(state.update_meal_row(9, 0, MealRowUpdate::default()).is_err());
        assert!(state.update_meal_row(0, 9, MealRowUpdate::default()).is_err());
    }

    #[test]
    fn added_foods_get_unique_ids() {
        let mut state = DietState::default();
        let input = || FoodInput {
            name: Some("Farro".to_string()),
            category: Some(FoodCategory::Carb),
            carbs: Some(67.0),
            ..FoodInput::default()
        };
        let first = state.add_food(input(), 1_700_000_000_000).unwrap();
        let second = state.add_food(input(), 1_700_000_000_000).unwrap();
        assert_eq!(first.id, "food_1700000000000");
        assert_ne!(first.id, second.id);

        assert!(state.add_food(FoodInput::default(), 1).is_err());
    }

    #[test]
    fn food_edits_are_in_place() {
        let mut state = DietState::default();
        let count = state.foods.len();
        let edited = state
            .update_food(
                "riso",
                FoodInput {
                    protein: Some(7.5),
                    ..FoodInput::default()
                },
            )
            .unwrap();
        assert_eq!(edited.protein, 7.5);
        assert_eq!(state.foods.len(), count);
        assert!(state.update_food("nope", FoodInput::default()).is_err());
    }

    #[test]
    fn autofill_all_fills_every_meal_with_fixed_rows() {
        let mut state = planned_state();
        state.autofill_all(&AllocationPolicy::default());

        assert_eq!(state.meals.len(), MEAL_COUNT);
        for meal in &state.meals {
            assert_eq!(meal.rows.len(), MEAL_ROWS);
            assert!(meal.rows[3].is_empty() && meal.rows[4].is_empty());
        }
        // riso is not tagged for breakfast, so the first suitable carb stands in.
        assert_eq!(state.meals[0].rows[0].food_id, "pane");
        assert_eq!(state.meals[2].rows[0].food_id, "riso");
    }

    #[test]
    fn autofill_respects_suitability() {
        let mut state = planned_state();
        state.autofill_meal(0, &AllocationPolicy::default()).unwrap();
        let breakfast_ids: Vec<String> =
            state.foods_for_meal(0).into_iter().map(|f| f.id).collect();
        for row in state.meals[0].rows.iter().filter(|r| !r.is_empty()) {
            assert!(breakfast_ids.contains(&row.food_id), "{}", row.food_id);
        }
    }

    #[test]
    fn templates_insert_then_replace() {
        let mut templates = Vec::new();
        let saved = save_template(
            &mut templates,
            TimingTemplateInput {
                id: None,
                name: "Massa".to_string(),
                description: String::new(),
                timing: vec![TimingRow { c_perc: 50.0, p_perc: 50.0, f_perc: 50.0 }],
            },
            42,
        )
        .unwrap();
        assert_eq!(saved.id, "template_42");
        assert_eq!(saved.timing.len(), MEAL_COUNT);

        save_template(
            &mut templates,
            TimingTemplateInput {
                id: Some(saved.id.clone()),
                name: "Massa 2".to_string(),
                description: "rivisto".to_string(),
                timing: vec![],
            },
            43,
        )
        .unwrap();
        assert_eq!(templates.len(), 1);
        assert_eq!(templates[0].name, "Massa 2");

        assert!(delete_template(&mut templates, "template_42"));
        assert!(!delete_template(&mut templates, "template_42"));
    }

    #[test]
    fn oversized_template_keeps_six_meals() {
        let mut templates = Vec::new();
        let saved = save_template(
            &mut templates,
            TimingTemplateInput {
                id: None,
                name: "Otto pasti".to_string(),
                description: String::new(),
                timing: vec![TimingRow { c_perc: 12.5, p_perc: 12.5, f_perc: 12.5 }; 8],
            },
            7,
        )
        .unwrap();
        assert_eq!(saved.timing.len(), MEAL_COUNT);

        // Templates stored before trimming can still carry extra rows.
        let stored = TimingTemplate {
            timing: vec![TimingRow { c_perc: 12.5, p_perc: 12.5, f_perc: 12.5 }; 8],
            ..saved
        };
        let mut state = planned_state();
        state.apply_template(&stored);
        state.autofill_all(&AllocationPolicy::default());

        assert_eq!(state.timing.len(), MEAL_COUNT);
        assert_eq!(state.meals.len(), MEAL_COUNT);
    }

    #[test]
    fn normalize_restores_fixed_layout() {
        let mut state = DietState::default();
        state.timing.clear();
        state.meals = vec![Meal { rows: vec![MealRow::new("riso", 80.0)] }; 9];

        state.normalize();

        assert_eq!(state.timing.len(), MEAL_COUNT);
        assert_eq!(state.meals.len(), MEAL_COUNT);
        assert!(state.meals.iter().all(|m| m.rows.len() == MEAL_ROWS));
        assert_eq!(state.meals[0].rows[0], MealRow::new("riso", 80.0));
    }

    #[test]
    fn export_name_uses_client() {
        let mut state = DietState::default();
        assert_eq!(state.export_filename(), "menu_cliente_.json");
        state.update_client(ClientUpdate {
            nome: Some("Anna".to_string()),
            cognome: Some("Rossi".to_string()),
            peso: None,
        });
        assert_eq!(state.export_filename(), "menu_Rossi_Anna.json");
    }
}
