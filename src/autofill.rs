//! Single-food-per-macro meal allocation.
//!
//! Food choice is driven by ordered tier tables: the first tier whose condition
//! holds names the preferred food ids, and the first catalog entry carrying one of
//! those ids wins. When no preferred food is available the first food of the
//! category is used.

use crate::meals::{MealTag, suitable_foods};
use crate::models::{DietState, Food, FoodCategory, MacroAmounts, Meal, MealRow, MEAL_ROWS};
use crate::nutrition::{meal_targets, round5};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Condition {
    CarbTargetAtLeast(f64),
    FatBudgetAtMost(f64),
    MealIs(MealTag),
    Always,
}

#[derive(Debug, Clone, Copy)]
pub struct Tier {
    pub when: Condition,
    pub prefer: &'static [&'static str],
}

pub static CARB_TIERS: &[Tier] = &[
    Tier {
        when: Condition::CarbTargetAtLeast(50.0),
        prefer: &["riso", "riso_basmati"],
    },
    Tier {
        when: Condition::CarbTargetAtLeast(25.0),
        prefer: &["pasta", "pane"],
    },
    Tier {
        when: Condition::CarbTargetAtLeast(15.0),
        prefer: &["avena", "crema_riso", "banana"],
    },
];

pub static PROTEIN_TIERS: &[Tier] = &[
    Tier {
        when: Condition::FatBudgetAtMost(6.0),
        prefer: &["pollo", "tacchino", "albumi", "skyr", "yog0"],
    },
    Tier {
        when: Condition::MealIs(MealTag::Prenanna),
        prefer: &["caseina", "skyr", "yog0", "fiocchi_latte_light"],
    },
    Tier {
        when: Condition::Always,
        prefer: &["bresaola", "tonno", "merluzzo"],
    },
];

pub static FAT_TIERS: &[Tier] = &[
    Tier {
        when: Condition::MealIs(MealTag::Breakfast),
        prefer: &["burro_arachidi", "mandorle", "evoo"],
    },
    Tier {
        when: Condition::MealIs(MealTag::Prenanna),
        prefer: &["mandorle", "dark90", "burro_mandorle"],
    },
    Tier {
        when: Condition::Always,
        prefer: &["evoo", "tahini"],
    },
];

#[derive(Debug, Clone, Copy)]
pub struct AllocationPolicy {
    pub carb: &'static [Tier],
    pub protein: &'static [Tier],
    pub fat: &'static [Tier],
}

impl Default for AllocationPolicy {
    fn default() -> Self {
        Self {
            carb: CARB_TIERS,
            protein: PROTEIN_TIERS,
            fat: FAT_TIERS,
        }
    }
}

/// Inputs a tier condition is evaluated against.
#[derive(Debug, Clone, Copy)]
struct Context {
    tag: MealTag,
    carb_target: f64,
    fat_budget: f64,
}

impl Condition {
    fn holds(&self, ctx: &Context) -> bool {
        match *self {
            Condition::CarbTargetAtLeast(min) => ctx.carb_target >= min,
            Condition::FatBudgetAtMost(max) => ctx.fat_budget <= max,
            Condition::MealIs(tag) => ctx.tag == tag,
            Condition::Always => true,
        }
    }
}

fn pick<'a>(foods: &[&'a Food], tiers: &[Tier], ctx: &Context) -> Option<&'a Food> {
    let preferred = tiers
        .iter()
        .find(|tier| tier.when.holds(ctx))
        .and_then(|tier| {
            foods
                .iter()
                .find(|food| tier.prefer.iter().any(|id| *id == food.id))
        });

    preferred.or_else(|| foods.first()).copied()
}

fn density(value: f64) -> f64 {
    if value > 0.0 && value.is_finite() { value } else { 1.0 }
}

fn grams_for(target: f64, food: Option<&Food>, per_100g: impl Fn(&Food) -> f64) -> f64 {
    match food {
        Some(food) => (target.max(0.0) / density(per_100g(food))) * 100.0,
        None => 0.0,
    }
}

fn incidental(grams: f64, food: Option<&Food>, per_100g: impl Fn(&Food) -> f64) -> f64 {
    food.map(|food| grams / 100.0 * per_100g(food).max(0.0))
        .unwrap_or(0.0)
}

fn row_for(food: Option<&Food>, grams: f64) -> MealRow {
    match food {
        Some(food) => MealRow::new(food.id.clone(), round5(grams).max(0.0)),
        None => MealRow::default(),
    }
}

/// Builds a meal that approximates `target` with one carb, one protein and one fat food.
pub fn autofill_meal(
    meal_index: usize,
    target: &MacroAmounts,
    available: &[Food],
    policy: &AllocationPolicy,
) -> Meal {
    let of = |category: FoodCategory| -> Vec<&Food> {
        available.iter().filter(|f| f.category == category).collect()
    };
    let carb_foods = of(FoodCategory::Carb);
    let protein_foods = of(FoodCategory::Protein);
    let fat_foods = of(FoodCategory::Fat);

    let mut ctx = Context {
        tag: MealTag::for_meal(meal_index),
        carb_target: target.c,
        fat_budget: target.f,
    };

    let carb = pick(&carb_foods, policy.carb, &ctx);
    let grams_carb = grams_for(target.c, carb, |f| f.carbs);

    let rem_p = (target.p - incidental(grams_carb, carb, |f| f.protein)).max(0.0);
    let mut rem_f = (target.f - incidental(grams_carb, carb, |f| f.fat)).max(0.0);

    ctx.fat_budget = rem_f;
    let protein = pick(&protein_foods, policy.protein, &ctx);
    let grams_prot = grams_for(rem_p, protein, |f| f.protein);
    rem_f = (rem_f - incidental(grams_prot, protein, |f| f.fat)).max(0.0);

    ctx.fat_budget = rem_f;
    let fat = pick(&fat_foods, policy.fat, &ctx);
    let grams_fat = grams_for(rem_f, fat, |f| f.fat);

    let mut rows = vec![
        row_for(carb, grams_carb),
        row_for(protein, grams_prot),
        row_for(fat, grams_fat),
    ];
    rows.resize(MEAL_ROWS, MealRow::default());

    Meal { rows }
}

/// Allocates every meal of the day against the foods suitable for it.
pub fn autofill_day(state: &DietState, policy: &AllocationPolicy) -> Vec<Meal> {
    meal_targets(&state.timing, &state.totals)
        .iter()
        .enumerate()
        .map(|(index, target)| {
            let available =
                suitable_foods(&state.foods, state.enforce_suitability, MealTag::for_meal(index));
            autofill_meal(index, target, &available, policy)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::default_foods;

    fn food(id: &str, category: FoodCategory, c: f64, p: f64, f: f64) -> Food {
        Food {
            id: id.to_string(),
            name: id.to_string(),
            category,
            carbs: c,
            protein: p,
            fat: f,
            suitable: vec![],
        }
    }

    #[test]
    fn single_carb_food_scales_to_target() {
        let foods = vec![food("patate", FoodCategory::Carb, 20.0, 0.0, 0.0)];
        let meal = autofill_meal(
            1,
            &MacroAmounts::new(60.0, 0.0, 0.0),
            &foods,
            &AllocationPolicy::default(),
        );

        assert_eq!(meal.rows[0], MealRow::new("patate", 300.0));
        assert!(meal.rows[1].is_empty());
        assert!(meal.rows[2].is_empty());
        assert_eq!(meal.rows.len(), MEAL_ROWS);
    }

    #[test]
    fn heavy_carb_target_prefers_rice_tier() {
        let foods = vec![
            food("pane", FoodCategory::Carb, 50.0, 9.0, 3.0),
            food("riso_basmati", FoodCategory::Carb, 78.0, 8.0, 1.0),
        ];
        let meal = autofill_meal(
            2,
            &MacroAmounts::new(80.0, 0.0, 0.0),
            &foods,
            &AllocationPolicy::default(),
        );
        assert_eq!(meal.rows[0].food_id, "riso_basmati");

        let light = autofill_meal(
            2,
            &MacroAmounts::new(30.0, 0.0, 0.0),
            &foods,
            &AllocationPolicy::default(),
        );
        assert_eq!(light.rows[0].food_id, "pane");
    }

    #[test]
    fn tight_fat_budget_prefers_lean_protein() {
        let foods = vec![
            food("bresaola", FoodCategory::Protein, 0.0, 32.0, 2.6),
            food("pollo", FoodCategory::Protein, 0.0, 23.0, 1.5),
        ];
        let meal = autofill_meal(
            2,
            &MacroAmounts::new(0.0, 30.0, 4.0),
            &foods,
            &AllocationPolicy::default(),
        );
        assert_eq!(meal.rows[1].food_id, "pollo");

        let roomy = autofill_meal(
            2,
            &MacroAmounts::new(0.0, 30.0, 15.0),
            &foods,
            &AllocationPolicy::default(),
        );
        assert_eq!(roomy.rows[1].food_id, "bresaola");
    }

    #[test]
    fn last_meal_prefers_slow_protein_and_its_own_fats() {
        let foods = vec![
            food("tonno", FoodCategory::Protein, 0.0, 25.0, 1.0),
            food("caseina", FoodCategory::Protein, 3.0, 80.0, 1.5),
            food("evoo", FoodCategory::Fat, 0.0, 0.0, 100.0),
            food("mandorle", FoodCategory::Fat, 5.0, 21.0, 50.0),
        ];
        let meal = autofill_meal(
            5,
            &MacroAmounts::new(0.0, 30.0, 20.0),
            &foods,
            &AllocationPolicy::default(),
        );
        assert_eq!(meal.rows[1].food_id, "caseina");
        assert_eq!(meal.rows[2].food_id, "mandorle");
    }

    #[test]
    fn empty_categories_leave_rows_unresolved() {
        let meal = autofill_meal(
            0,
            &MacroAmounts::new(50.0, 40.0, 20.0),
            &[],
            &AllocationPolicy::default(),
        );
        assert!(meal.rows.iter().all(|row| row.is_empty() && row.grams == 0.0));
    }

    #[test]
    fn zero_density_does_not_blow_up() {
        let foods = vec![food("acqua", FoodCategory::Carb, 0.0, 0.0, 0.0)];
        let meal = autofill_meal(
            1,
            &MacroAmounts::new(12.0, 0.0, 0.0),
            &foods,
            &AllocationPolicy::default(),
        );
        assert_eq!(meal.rows[0].grams, 1200.0);
    }

    #[test]
    fn allocation_is_deterministic_and_snapped_to_five() {
        let foods = default_foods();
        let policy = AllocationPolicy::default();
        let targets = [
            MacroAmounts::new(75.0, 30.0, 10.5),
            MacroAmounts::new(18.3, 22.1, 7.7),
            MacroAmounts::new(0.0, 0.0, 0.0),
            MacroAmounts::new(120.0, 55.5, 3.0),
        ];

        for index in 0..6 {
            for target in &targets {
                let first = autofill_meal(index, target, &foods, &policy);
                let second = autofill_meal(index, target, &foods, &policy);
                assert_eq!(first, second);
                for row in &first.rows {
                    assert!(row.grams.is_finite() && row.grams >= 0.0);
                    assert_eq!(row.grams % 5.0, 0.0, "{row:?}");
                }
            }
        }
    }
}
