use crate::models::{Food, FoodCategory, Supplement};

// (id, name, category, carbs, protein, fat per 100 g, suitable meal tags)
type FoodSeed = (
    &'static str,
    &'static str,
    FoodCategory,
    f64,
    f64,
    f64,
    &'static [&'static str],
);

const LUNCH_DINNER: &[&str] = &["lunch", "dinner"];
const MORNING: &[&str] = &["breakfast", "snack"];
const ANY: &[&str] = &["any"];

const FOOD_SEEDS: &[FoodSeed] = &[
    ("riso", "Riso", FoodCategory::Carb, 80.0, 7.0, 0.6, LUNCH_DINNER),
    ("riso_basmati", "Riso basmati", FoodCategory::Carb, 78.0, 8.0, 0.9, LUNCH_DINNER),
    ("pasta", "Pasta di semola", FoodCategory::Carb, 72.0, 12.5, 1.5, LUNCH_DINNER),
    ("pane", "Pane comune", FoodCategory::Carb, 55.0, 8.5, 1.2, &["breakfast", "lunch", "dinner"]),
    ("patate", "Patate", FoodCategory::Carb, 17.0, 2.0, 0.1, LUNCH_DINNER),
    ("avena", "Fiocchi d'avena", FoodCategory::Carb, 60.0, 13.0, 7.0, MORNING),
    ("crema_riso", "Crema di riso", FoodCategory::Carb, 85.0, 6.5, 0.5, MORNING),
    ("gallette", "Gallette di riso", FoodCategory::Carb, 80.0, 8.0, 2.8, ANY),
    ("banana", "Banana", FoodCategory::Carb, 20.0, 1.2, 0.3, MORNING),
    ("mela", "Mela", FoodCategory::Carb, 14.0, 0.3, 0.2, ANY),
    ("pollo", "Petto di pollo", FoodCategory::Protein, 0.0, 23.0, 1.5, LUNCH_DINNER),
    ("tacchino", "Fesa di tacchino", FoodCategory::Protein, 0.0, 24.0, 1.2, LUNCH_DINNER),
    ("albumi", "Albumi", FoodCategory::Protein, 0.7, 11.0, 0.2, &["breakfast", "lunch", "dinner"]),
    ("skyr", "Skyr", FoodCategory::Protein, 4.0, 11.0, 0.2, &["breakfast", "snack", "prenanna"]),
    ("yog0", "Yogurt greco 0%", FoodCategory::Protein, 4.0, 10.0, 0.0, &["breakfast", "snack", "prenanna"]),
    ("caseina", "Caseine micellari", FoodCategory::Protein, 4.0, 80.0, 1.5, &["prenanna"]),
    ("fiocchi_latte_light", "Fiocchi di latte light", FoodCategory::Protein, 2.5, 12.5, 1.5, &["snack", "prenanna"]),
    ("whey", "Proteine whey", FoodCategory::Protein, 6.0, 78.0, 6.0, MORNING),
    ("bresaola", "Bresaola", FoodCategory::Protein, 0.0, 32.0, 2.6, &["snack", "lunch", "dinner"]),
    ("tonno", "Tonno al naturale", FoodCategory::Protein, 0.0, 25.0, 1.0, LUNCH_DINNER),
    ("merluzzo", "Merluzzo", FoodCategory::Protein, 0.0, 17.0, 0.7, LUNCH_DINNER),
    ("uova", "Uova intere", FoodCategory::Mixed, 0.7, 12.5, 10.0, &["breakfast", "lunch", "dinner"]),
    ("evoo", "Olio extravergine d'oliva", FoodCategory::Fat, 0.0, 0.0, 100.0, ANY),
    ("burro_arachidi", "Burro d'arachidi", FoodCategory::Fat, 12.0, 25.0, 50.0, MORNING),
    ("mandorle", "Mandorle", FoodCategory::Fat, 5.0, 21.0, 50.0, &["breakfast", "snack", "prenanna"]),
    ("burro_mandorle", "Burro di mandorle", FoodCategory::Fat, 6.0, 21.0, 55.0, &["breakfast", "snack", "prenanna"]),
    ("dark90", "Cioccolato fondente 90%", FoodCategory::Fat, 14.0, 10.0, 55.0, &["snack", "prenanna"]),
    ("tahini", "Tahina", FoodCategory::Fat, 10.0, 17.0, 54.0, LUNCH_DINNER),
    ("avocado", "Avocado", FoodCategory::Fat, 1.8, 2.0, 15.0, &["breakfast", "lunch", "dinner"]),
];

pub fn default_foods() -> Vec<Food> {
    FOOD_SEEDS
        .iter()
        .map(|&(id, name, category, carbs, protein, fat, suitable)| Food {
            id: id.to_string(),
            name: name.to_string(),
            category,
            carbs,
            protein,
            fat,
            suitable: suitable.iter().map(|tag| tag.to_string()).collect(),
        })
        .collect()
}

const SUPPLEMENT_SEEDS: &[(&str, &str, &str, &str)] = &[
    ("whey", "Proteine Whey", "Proteine", "g"),
    ("casein", "Proteine Caseine", "Proteine", "g"),
    ("bcaa", "BCAA", "Aminoacidi", "g"),
    ("eaa", "EAA", "Aminoacidi", "g"),
    ("glutamine", "Glutammina", "Aminoacidi", "g"),
    ("creatine", "Creatina Monoidrato", "Performance", "g"),
    ("beta-alanine", "Beta-Alanina", "Performance", "g"),
    ("citrulline", "Citrullina Malato", "Performance", "g"),
    ("preworkout", "Pre-Workout", "Performance", "scoop"),
    ("caffeine", "Caffeina", "Stimolanti", "mg"),
    ("omega3", "Omega-3", "Acidi Grassi", "g"),
    ("vitD", "Vitamina D3", "Vitamine", "UI"),
    ("vitC", "Vitamina C", "Vitamine", "mg"),
    ("multivit", "Multivitaminico", "Vitamine", "cpr"),
    ("magnesium", "Magnesio", "Minerali", "mg"),
    ("zinc", "Zinco", "Minerali", "mg"),
    ("ashwagandha", "Ashwagandha", "Adattogeni", "mg"),
    ("melatonin", "Melatonina", "Sonno", "mg"),
];

pub fn default_supplements() -> Vec<Supplement> {
    SUPPLEMENT_SEEDS
        .iter()
        .map(|&(id, name, category, unit)| Supplement {
            id: id.to_string(),
            name: name.to_string(),
            category: category.to_string(),
            unit: unit.to_string(),
            notes: None,
        })
        .collect()
}
