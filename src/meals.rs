use crate::models::Food;
use serde::{Deserialize, Serialize};

pub const MEAL_NAMES: [&str; 6] = [
    "Colazione",
    "1° Spuntino",
    "Pranzo",
    "2° Spuntino",
    "Cena",
    "Prenanna",
];

/// Tag that matches a food's `suitable` list.
pub const ANY_MEAL: &str = "any";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum MealTag {
    Breakfast,
    Snack,
    Lunch,
    Dinner,
    Prenanna,
}

impl MealTag {
    pub fn for_meal(index: usize) -> Self {
        match index {
            0 => MealTag::Breakfast,
            2 => MealTag::Lunch,
            4 => MealTag::Dinner,
            5 => MealTag::Prenanna,
            _ => MealTag::Snack,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MealTag::Breakfast => "breakfast",
            MealTag::Snack => "snack",
            MealTag::Lunch => "lunch",
            MealTag::Dinner => "dinner",
            MealTag::Prenanna => "prenanna",
        }
    }
}

pub fn meal_name(index: usize) -> String {
    MEAL_NAMES
        .get(index)
        .map(|name| name.to_string())
        .unwrap_or_else(|| format!("Pasto {}", index + 1))
}

pub fn is_suitable(food: &Food, tag: MealTag) -> bool {
    food.suitable.is_empty()
        || food
            .suitable
            .iter()
            .any(|t| t == ANY_MEAL || t == tag.as_str())
}

/// Foods usable for a meal, in catalog order.
pub fn suitable_foods(foods: &[Food], enforce: bool, tag: MealTag) -> Vec<Food> {
    if !enforce {
        return foods.to_vec();
    }

    foods
        .iter()
        .filter(|food| is_suitable(food, tag))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FoodCategory;

    fn food(id: &str, suitable: &[&str]) -> Food {
        Food {
            id: id.to_string(),
            name: id.to_string(),
            category: FoodCategory::Carb,
            carbs: 10.0,
            protein: 1.0,
            fat: 1.0,
            suitable: suitable.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn tag_lookup_is_fixed() {
        let tags: Vec<MealTag> = (0..7).map(MealTag::for_meal).collect();
        assert_eq!(
            tags,
            vec![
                MealTag::Breakfast,
                MealTag::Snack,
                MealTag::Lunch,
                MealTag::Snack,
                MealTag::Dinner,
                MealTag::Prenanna,
                MealTag::Snack,
            ]
        );
    }

    #[test]
    fn filter_disabled_returns_full_catalog() {
        let foods = vec![food("a", &["lunch"]), food("b", &["breakfast"]), food("c", &[])];
        for index in 0..6 {
            assert_eq!(suitable_foods(&foods, false, MealTag::for_meal(index)), foods);
        }
    }

    #[test]
    fn filter_keeps_untagged_any_and_matching() {
        let foods = vec![
            food("lunch_only", &["lunch"]),
            food("untagged", &[]),
            food("anywhere", &["any"]),
            food("breakfast_only", &["breakfast"]),
        ];

        let ids: Vec<String> = suitable_foods(&foods, true, MealTag::Breakfast)
            .into_iter()
            .map(|f| f.id)
            .collect();
        assert_eq!(ids, vec!["untagged", "anywhere", "breakfast_only"]);
    }

    #[test]
    fn meal_names_fall_back_past_the_table() {
        assert_eq!(meal_name(0), "Colazione");
        assert_eq!(meal_name(5), "Prenanna");
        assert_eq!(meal_name(6), "Pasto 7");
    }
}
