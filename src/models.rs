use crate::meals::MealTag;
use crate::nutrition::{DayStatus, MealDeltaStatus, SumStatus};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const MEAL_COUNT: usize = 6;
pub const MEAL_ROWS: usize = 5;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum FoodCategory {
    #[default]
    Carb,
    Protein,
    Fat,
    Mixed,
}

/// Catalog entry. Macro values are grams per 100 g of food.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Food {
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub category: FoodCategory,
    #[serde(default)]
    pub carbs: f64,
    #[serde(default)]
    pub protein: f64,
    #[serde(default)]
    pub fat: f64,
    #[serde(default)]
    pub suitable: Vec<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct TimingRow {
    pub c_perc: f64,
    pub p_perc: f64,
    pub f_perc: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct MealRow {
    pub food_id: String,
    pub grams: f64,
}

impl MealRow {
    pub fn new(food_id: impl Into<String>, grams: f64) -> Self {
        Self {
            food_id: food_id.into(),
            grams,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.food_id.is_empty()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Meal {
    pub rows: Vec<MealRow>,
}

impl Default for Meal {
    fn default() -> Self {
        Self {
            rows: vec![MealRow::default(); MEAL_ROWS],
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct MacroTotals {
    pub carbs: f64,
    pub protein: f64,
    pub fat: f64,
}

/// Per-meal macro amounts in grams, keyed the way the meal cards show them.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq)]
pub struct MacroAmounts {
    pub c: f64,
    pub p: f64,
    pub f: f64,
}

impl MacroAmounts {
    pub fn new(c: f64, p: f64, f: f64) -> Self {
        Self { c, p, f }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct ClientData {
    pub nome: String,
    pub cognome: String,
    pub peso: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DietState {
    pub client: ClientData,
    pub totals: MacroTotals,
    pub timing: Vec<TimingRow>,
    pub foods: Vec<Food>,
    pub meals: Vec<Meal>,
    pub enforce_suitability: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TimingTemplate {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub timing: Vec<TimingRow>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Supplement {
    pub id: String,
    pub name: String,
    pub category: String,
    pub unit: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct SupplementRow {
    pub supplement_id: String,
    pub quantity: f64,
    pub timing: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SupplementPlan {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub client_name: String,
    #[serde(default)]
    pub rows: Vec<SupplementRow>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SupplementsState {
    pub supplements: Vec<Supplement>,
    pub plans: Vec<SupplementPlan>,
    pub current_plan: Option<SupplementPlan>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct Exercise {
    pub id: String,
    pub day: u32,
    pub muscle_group: String,
    pub exercise_type: String,
    pub stimulo_tecnica: String,
    pub incremento_settimana: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SavedSplit {
    pub saved_at: i64,
    #[serde(default)]
    pub exercises: Vec<Exercise>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<BTreeMap<u32, String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub num_days: Option<u32>,
}

pub type SavedSplits = BTreeMap<String, SavedSplit>;
pub type TimingTemplates = Vec<TimingTemplate>;

#[derive(Debug, Deserialize, Default)]
pub struct ClientUpdate {
    pub nome: Option<String>,
    pub cognome: Option<String>,
    pub peso: Option<f64>,
}

#[derive(Debug, Deserialize, Default)]
pub struct TotalsUpdate {
    pub carbs: Option<f64>,
    pub protein: Option<f64>,
    pub fat: Option<f64>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct TimingUpdate {
    pub c_perc: Option<f64>,
    pub p_perc: Option<f64>,
    pub f_perc: Option<f64>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct MealRowUpdate {
    pub food_id: Option<String>,
    pub grams: Option<f64>,
}

#[derive(Debug, Deserialize, Default)]
pub struct FoodInput {
    pub name: Option<String>,
    pub category: Option<FoodCategory>,
    pub carbs: Option<f64>,
    pub protein: Option<f64>,
    pub fat: Option<f64>,
    pub suitable: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
pub struct TimingTemplateInput {
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub timing: Vec<TimingRow>,
}

#[derive(Debug, Deserialize, Default)]
pub struct SupplementInput {
    pub name: Option<String>,
    pub category: Option<String>,
    pub unit: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct PlanInfoUpdate {
    pub name: Option<String>,
    pub client_name: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct SupplementRowUpdate {
    pub supplement_id: Option<String>,
    pub quantity: Option<f64>,
    pub timing: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveSplitRequest {
    #[serde(default)]
    pub exercises: Vec<Exercise>,
    pub notes: Option<BTreeMap<u32, String>>,
    pub num_days: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct VolumeRequest {
    #[serde(default)]
    pub exercises: Vec<Exercise>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TimingSums {
    pub sums: MacroAmounts,
    pub carbs: SumStatus,
    pub protein: SumStatus,
    pub fat: SumStatus,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MealDeltaStatuses {
    pub c: MealDeltaStatus,
    pub p: MealDeltaStatus,
    pub f: MealDeltaStatus,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MealSummary {
    pub index: usize,
    pub name: String,
    pub tag: MealTag,
    pub target: MacroAmounts,
    pub actual: MacroAmounts,
    /// Contribution of each row, in row order.
    pub rows: Vec<MacroAmounts>,
    pub delta: MacroAmounts,
    pub status: MealDeltaStatuses,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DayMetric {
    pub label: String,
    pub unit: String,
    pub target: f64,
    pub actual: f64,
    pub delta: f64,
    pub percentage: f64,
    pub status: DayStatus,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DietSummary {
    pub targets: Vec<MacroAmounts>,
    pub meals: Vec<MealSummary>,
    pub timing: TimingSums,
    pub day: Vec<DayMetric>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ImportResponse {
    pub imported: bool,
    pub message: String,
}
