use serde::{Deserialize, Serialize};

/// Per-serving contribution of one pool entry. Styles may subtract
/// (steaming, raw preparations), so the fields are signed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NutritionProfile {
    #[serde(default)]
    pub calories: i32,
    #[serde(default)]
    pub protein: i32,
    #[serde(default)]
    pub carbs: i32,
    #[serde(default)]
    pub fat: i32,
}

impl NutritionProfile {
    pub const fn new(calories: i32, protein: i32, carbs: i32, fat: i32) -> Self {
        Self { calories, protein, carbs, fat }
    }
}

/// Estimated facts for a whole dish, grams for the macros.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NutritionFacts {
    pub calories: u32,
    pub protein: u32,
    pub carbs: u32,
    pub fat: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NutritionBounds {
    pub min_calories: u32,
    pub max_calories: u32,
    pub max_macro_grams: u32,
}

impl Default for NutritionBounds {
    fn default() -> Self {
        Self {
            min_calories: 150,
            max_calories: 900,
            max_macro_grams: 80,
        }
    }
}

impl NutritionBounds {
    pub fn contains(&self, facts: &NutritionFacts) -> bool {
        (self.min_calories..=self.max_calories).contains(&facts.calories)
            && facts.protein <= self.max_macro_grams
            && facts.carbs <= self.max_macro_grams
            && facts.fat <= self.max_macro_grams
    }
}

// Never panics: an inverted range collapses onto `max`.
fn clamp(value: i32, min: u32, max: u32) -> u32 {
    value.max(0).unsigned_abs().max(min).min(max)
}

/// Sums the lookup-table profiles of the dish components and clamps the total
/// into `bounds`.
pub fn estimate(parts: &[NutritionProfile], bounds: &NutritionBounds) -> NutritionFacts {
    let total = parts.iter().fold(NutritionProfile::default(), |acc, p| NutritionProfile {
        calories: acc.calories.saturating_add(p.calories),
        protein: acc.protein.saturating_add(p.protein),
        carbs: acc.carbs.saturating_add(p.carbs),
        fat: acc.fat.saturating_add(p.fat),
    });

    NutritionFacts {
        calories: clamp(total.calories, bounds.min_calories, bounds.max_calories),
        protein: clamp(total.protein, 0, bounds.max_macro_grams),
        carbs: clamp(total.carbs, 0, bounds.max_macro_grams),
        fat: clamp(total.fat, 0, bounds.max_macro_grams),
    }
}
