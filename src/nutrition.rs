//! Macro targets, per-meal aggregation and delta classification for a diet.
//!
//! Everything here is pure: callers pass the timing table, daily totals and the
//! food catalog, and get rounded gram amounts back.

use crate::meals::{MealTag, meal_name};
use crate::models::{
    DayMetric, DietState, DietSummary, Food, MacroAmounts, MacroTotals, MealDeltaStatuses,
    MealRow, MealSummary, TimingRow, TimingSums,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeltaThresholds {
    /// Meal-level band in grams inside which a macro counts as on target.
    pub meal_tolerance: f64,
    pub day_ok: f64,
    pub day_warn: f64,
    /// Distance from 100% inside which a timing column counts as complete.
    pub timing_sum_tolerance: f64,
}

impl Default for DeltaThresholds {
    fn default() -> Self {
        Self {
            meal_tolerance: 0.5,
            day_ok: 5.0,
            day_warn: 20.0,
            timing_sum_tolerance: 0.1,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SumStatus {
    Complete,
    Over,
    Under,
}

impl SumStatus {
    pub fn classify(sum: f64, tolerance: f64) -> Self {
        if (sum - 100.0).abs() < tolerance {
            SumStatus::Complete
        } else if sum > 100.0 {
            SumStatus::Over
        } else {
            SumStatus::Under
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MealDeltaStatus {
    OnTarget,
    Over,
    Under,
}

impl MealDeltaStatus {
    pub fn classify(delta: f64, tolerance: f64) -> Self {
        if delta.abs() < tolerance {
            MealDeltaStatus::OnTarget
        } else if delta > 0.0 {
            MealDeltaStatus::Over
        } else {
            MealDeltaStatus::Under
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DayStatus {
    Ok,
    Warning,
    Off,
}

impl DayStatus {
    pub fn classify(delta: f64, thresholds: &DeltaThresholds) -> Self {
        let abs = delta.abs();
        if abs < thresholds.day_ok {
            DayStatus::Ok
        } else if abs < thresholds.day_warn {
            DayStatus::Warning
        } else {
            DayStatus::Off
        }
    }
}

pub fn round1(value: f64) -> f64 {
    if !value.is_finite() {
        return 0.0;
    }
    (value * 10.0).round() / 10.0
}

pub fn round5(value: f64) -> f64 {
    if !value.is_finite() {
        return 0.0;
    }
    (value / 5.0).round() * 5.0
}

pub fn kcal_from(c: f64, p: f64, f: f64) -> f64 {
    (c * 4.0 + p * 4.0 + f * 9.0).round()
}

pub fn meal_targets(timing: &[TimingRow], totals: &MacroTotals) -> Vec<MacroAmounts> {
    timing
        .iter()
        .map(|row| {
            MacroAmounts::new(
                round1(totals.carbs * row.c_perc / 100.0),
                round1(totals.protein * row.p_perc / 100.0),
                round1(totals.fat * row.f_perc / 100.0),
            )
        })
        .collect()
}

pub fn column_sums(timing: &[TimingRow]) -> MacroAmounts {
    timing.iter().fold(MacroAmounts::default(), |acc, row| {
        MacroAmounts::new(acc.c + row.c_perc, acc.p + row.p_perc, acc.f + row.f_perc)
    })
}

pub fn timing_sums(timing: &[TimingRow], thresholds: &DeltaThresholds) -> TimingSums {
    let sums = column_sums(timing);
    let tolerance = thresholds.timing_sum_tolerance;
    TimingSums {
        carbs: SumStatus::classify(sums.c, tolerance),
        protein: SumStatus::classify(sums.p, tolerance),
        fat: SumStatus::classify(sums.f, tolerance),
        sums,
    }
}

fn food_index(foods: &[Food]) -> HashMap<&str, &Food> {
    foods.iter().map(|food| (food.id.as_str(), food)).collect()
}

fn raw_row_macros(row: &MealRow, index: &HashMap<&str, &Food>) -> MacroAmounts {
    match index.get(row.food_id.as_str()) {
        Some(food) if row.grams > 0.0 => {
            let factor = row.grams / 100.0;
            MacroAmounts::new(food.carbs * factor, food.protein * factor, food.fat * factor)
        }
        _ => MacroAmounts::default(),
    }
}

pub fn row_macros(row: &MealRow, foods: &[Food]) -> MacroAmounts {
    let m = raw_row_macros(row, &food_index(foods));
    MacroAmounts::new(round1(m.c), round1(m.p), round1(m.f))
}

pub fn meal_totals(rows: &[MealRow], foods: &[Food]) -> MacroAmounts {
    let index = food_index(foods);
    let acc = rows.iter().fold(MacroAmounts::default(), |acc, row| {
        let m = raw_row_macros(row, &index);
        MacroAmounts::new(acc.c + m.c, acc.p + m.p, acc.f + m.f)
    });
    MacroAmounts::new(round1(acc.c), round1(acc.p), round1(acc.f))
}

pub fn day_totals(meal_totals: &[MacroAmounts]) -> MacroAmounts {
    let acc = meal_totals.iter().fold(MacroAmounts::default(), |acc, m| {
        MacroAmounts::new(acc.c + m.c, acc.p + m.p, acc.f + m.f)
    });
    MacroAmounts::new(round1(acc.c), round1(acc.p), round1(acc.f))
}

pub fn delta(actual: &MacroAmounts, target: &MacroAmounts) -> MacroAmounts {
    MacroAmounts::new(
        round1(actual.c - target.c),
        round1(actual.p - target.p),
        round1(actual.f - target.f),
    )
}

fn day_metric(
    label: &str,
    unit: &str,
    target: f64,
    actual: f64,
    thresholds: &DeltaThresholds,
) -> DayMetric {
    let delta = round1(actual - target);
    let percentage = if target > 0.0 {
        (actual / target * 100.0).round()
    } else {
        0.0
    };

    DayMetric {
        label: label.to_string(),
        unit: unit.to_string(),
        target,
        actual,
        delta,
        percentage,
        status: DayStatus::classify(delta, thresholds),
    }
}

pub fn build_summary(state: &DietState, thresholds: &DeltaThresholds) -> DietSummary {
    let targets = meal_targets(&state.timing, &state.totals);
    let actuals: Vec<MacroAmounts> = state
        .meals
        .iter()
        .map(|meal| meal_totals(&meal.rows, &state.foods))
        .collect();

    let meals = actuals
        .iter()
        .enumerate()
        .map(|(index, actual)| {
            let target = targets.get(index).copied().unwrap_or_default();
            let delta = delta(actual, &target);
            let rows = state.meals[index]
                .rows
                .iter()
                .map(|row| row_macros(row, &state.foods))
                .collect();
            MealSummary {
                index,
                name: meal_name(index),
                tag: MealTag::for_meal(index),
                target,
                actual: *actual,
                rows,
                status: MealDeltaStatuses {
                    c: MealDeltaStatus::classify(delta.c, thresholds.meal_tolerance),
                    p: MealDeltaStatus::classify(delta.p, thresholds.meal_tolerance),
                    f: MealDeltaStatus::classify(delta.f, thresholds.meal_tolerance),
                },
                delta,
            }
        })
        .collect();

    let actual = day_totals(&actuals);
    let target = &state.totals;
    let day = vec![
        day_metric(
            "Calorie",
            "kcal",
            kcal_from(target.carbs, target.protein, target.fat),
            kcal_from(actual.c, actual.p, actual.f),
            thresholds,
        ),
        day_metric("Carboidrati", "g", target.carbs, actual.c, thresholds),
        day_metric("Proteine", "g", target.protein, actual.p, thresholds),
        day_metric("Grassi", "g", target.fat, actual.f, thresholds),
    ];

    DietSummary {
        timing: timing_sums(&state.timing, thresholds),
        targets,
        meals,
        day,
    }
}
