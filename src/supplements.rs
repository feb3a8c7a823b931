use crate::catalog::default_supplements;
use crate::diet::{clamp_amount, unique_id};
use crate::errors::AppError;
use crate::models::{
    PlanInfoUpdate, Supplement, SupplementInput, SupplementPlan, SupplementRow,
    SupplementRowUpdate, SupplementsState,
};
use crate::storage::Normalize;

pub const PLAN_ROWS: usize = 6;

pub fn empty_plan(now_ms: i64) -> SupplementPlan {
    SupplementPlan {
        id: now_ms.to_string(),
        name: String::new(),
        client_name: String::new(),
        rows: vec![SupplementRow::default(); PLAN_ROWS],
    }
}

impl Default for SupplementsState {
    fn default() -> Self {
        Self {
            supplements: default_supplements(),
            plans: Vec::new(),
            current_plan: Some(empty_plan(chrono::Utc::now().timestamp_millis())),
        }
    }
}

impl Normalize for SupplementsState {}

impl SupplementsState {
    pub fn add_supplement(&mut self, input: SupplementInput, now_ms: i64) -> Result<Supplement, AppError> {
        let name = input
            .name
            .filter(|name| !name.trim().is_empty())
            .ok_or_else(|| AppError::bad_request("supplement name is required"))?;

        let id = unique_id("", now_ms, |id| self.supplements.iter().any(|s| s.id == id));
        let supplement = Supplement {
            id,
            name,
            category: input.category.unwrap_or_default(),
            unit: input.unit.unwrap_or_else(|| "g".to_string()),
            notes: input.notes,
        };
        self.supplements.push(supplement.clone());
        Ok(supplement)
    }

    pub fn update_supplement(&mut self, id: &str, input: SupplementInput) -> Result<Supplement, AppError> {
        let supplement = self
            .supplements
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| AppError::not_found(format!("no supplement {id}")))?;

        if let Some(name) = input.name.filter(|name| !name.trim().is_empty()) {
            supplement.name = name;
        }
        if let Some(category) = input.category {
            supplement.category = category;
        }
        if let Some(unit) = input.unit {
            supplement.unit = unit;
        }
        if input.notes.is_some() {
            supplement.notes = input.notes;
        }
        Ok(supplement.clone())
    }

    pub fn delete_supplement(&mut self, id: &str) -> bool {
        let before = self.supplements.len();
        self.supplements.retain(|s| s.id != id);
        self.supplements.len() != before
    }

    fn plan_mut(&mut self) -> Result<&mut SupplementPlan, AppError> {
        self.current_plan
            .as_mut()
            .ok_or_else(|| AppError::not_found("no current plan"))
    }

    pub fn update_plan_info(&mut self, update: PlanInfoUpdate) -> Result<SupplementPlan, AppError> {
        let plan = self.plan_mut()?;
        if let Some(name) = update.name {
            plan.name = name;
        }
        if let Some(client_name) = update.client_name {
            plan.client_name = client_name;
        }
        Ok(plan.clone())
    }

    pub fn update_plan_row(
        &mut self,
        index: usize,
        update: SupplementRowUpdate,
    ) -> Result<SupplementPlan, AppError> {
        let plan = self.plan_mut()?;
        let row = plan
            .rows
            .get_mut(index)
            .ok_or_else(|| AppError::not_found(format!("no plan row {index}")))?;
        if let Some(supplement_id) = update.supplement_id {
            row.supplement_id = supplement_id;
        }
        if let Some(quantity) = update.quantity {
            row.quantity = clamp_amount(quantity);
        }
        if let Some(timing) = update.timing {
            row.timing = timing;
        }
        Ok(plan.clone())
    }

    /// Stores the current plan, replacing a saved plan with the same id.
    pub fn save_plan(&mut self) -> Result<SupplementPlan, AppError> {
        let plan = self.plan_mut()?.clone();
        match self.plans.iter_mut().find(|p| p.id == plan.id) {
            Some(existing) => *existing = plan.clone(),
            None => self.plans.push(plan.clone()),
        }
        Ok(plan)
    }

    pub fn load_plan(&mut self, id: &str) -> Result<SupplementPlan, AppError> {
        let plan = self
            .plans
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or_else(|| AppError::not_found(format!("no plan {id}")))?;
        self.current_plan = Some(plan.clone());
        Ok(plan)
    }

    pub fn delete_plan(&mut self, id: &str) -> bool {
        let before = self.plans.len();
        self.plans.retain(|p| p.id != id);
        self.plans.len() != before
    }

    pub fn new_plan(&mut self, now_ms: i64) -> SupplementPlan {
        let id = unique_id("", now_ms, |id| self.plans.iter().any(|p| p.id == id));
        let plan = SupplementPlan {
            id,
            ..empty_plan(now_ms)
        };
        self.current_plan = Some(plan.clone());
        plan
    }

    pub fn clear_plan(&mut self) -> Result<SupplementPlan, AppError> {
        let plan = self.plan_mut()?;
        plan.rows = vec![SupplementRow::default(); PLAN_ROWS];
        Ok(plan.clone())
    }
}

pub fn plan_export_filename(plan: &SupplementPlan) -> String {
    let client = if plan.client_name.is_empty() {
        "cliente"
    } else {
        plan.client_name.as_str()
    };
    format!("piano_integrazione_{client}.json")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_state_starts_with_an_empty_plan() {
        let state = SupplementsState::default();
        assert_eq!(state.supplements.len(), 18);
        let plan = state.current_plan.expect("current plan");
        assert_eq!(plan.rows.len(), PLAN_ROWS);
        assert!(state.plans.is_empty());
    }

    #[test]
    fn save_inserts_then_replaces() {
        let mut state = SupplementsState::default();
        state
            .update_plan_info(PlanInfoUpdate {
                name: Some("Cut".to_string()),
                client_name: Some("Rossi".to_string()),
            })
            .unwrap();
        state.save_plan().unwrap();
        state
            .update_plan_row(
                0,
                SupplementRowUpdate {
                    supplement_id: Some("creatine".to_string()),
                    quantity: Some(5.0),
                    timing: Some("post".to_string()),
                },
            )
            .unwrap();
        let saved = state.save_plan().unwrap();

        assert_eq!(state.plans.len(), 1);
        assert_eq!(state.plans[0].rows[0].supplement_id, "creatine");
        assert_eq!(plan_export_filename(&saved), "piano_integrazione_Rossi.json");
    }

    #[test]
    fn load_replaces_current_plan() {
        let mut state = SupplementsState::default();
        let saved = state.save_plan().unwrap();
        state.new_plan(saved.id.parse::<i64>().unwrap());
        assert_ne!(state.current_plan.as_ref().unwrap().id, saved.id);

        state.load_plan(&saved.id).unwrap();
        assert_eq!(state.current_plan.as_ref().unwrap().id, saved.id);
        assert!(state.load_plan("missing").is_err());
        assert!(state.delete_plan(&saved.id));
    }

    #[test]
    fn catalog_edits() {
        let mut state = SupplementsState::default();
        let added = state
            .add_supplement(
                SupplementInput {
                    name: Some("Elettroliti".to_string()),
                    category: Some("Minerali".to_string()),
                    ..SupplementInput::default()
                },
                7,
            )
            .unwrap();
        assert_eq!(added.id, "7");
        assert_eq!(added.unit, "g");

        let updated = state
            .update_supplement(
                "7",
                SupplementInput {
                    unit: Some("cpr".to_string()),
                    ..SupplementInput::default()
                },
            )
            .unwrap();
        assert_eq!(updated.unit, "cpr");
        assert!(state.delete_supplement("7"));
        assert!(!state.delete_supplement("7"));
    }

    #[test]
    fn clear_resets_rows_only() {
        let mut state = SupplementsState::default();
        state
            .update_plan_info(PlanInfoUpdate {
                name: Some("Bulk".to_string()),
                client_name: None,
            })
            .unwrap();
        state
            .update_plan_row(
                1,
                SupplementRowUpdate {
                    quantity: Some(3.0),
                    ..SupplementRowUpdate::default()
                },
            )
            .unwrap();
        let cleared = state.clear_plan().unwrap();
        assert_eq!(cleared.name, "Bulk");
        assert!(cleared.rows.iter().all(|r| r.quantity == 0.0));
    }
}
