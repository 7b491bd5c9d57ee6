use serde::{Deserialize, Serialize};

use crate::food::analysis::nutrition::NutritionFacts;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cuisine {
    WestAfrican,
    Japanese,
}

impl Cuisine {
    pub fn label(&self) -> &'static str {
        match self {
            Cuisine::WestAfrican => "West African",
            Cuisine::Japanese => "Japanese",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ingredient {
    pub name: String,
    pub cuisine: Cuisine,
}

/// One generated fusion dish. Built once by the generator and replaced, never
/// edited, by the next generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DishCombo {
    /// Display id, doubles as the image seed.
    pub id: u64,
    pub title: String,
    pub description: String,
    /// Always `[west_african, japanese]`.
    pub ingredients: [Ingredient; 2],
    pub style: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nutrition: Option<NutritionFacts>,
}

impl DishCombo {
    pub fn west_african(&self) -> &Ingredient {
        &self.ingredients[0]
    }

    pub fn japanese(&self) -> &Ingredient {
        &self.ingredients[1]
    }
}

pub fn compose_title(west_african: &str, japanese: &str, style: &str) -> String {
    format!("{} {} with {}", style, west_african, japanese)
}

pub fn compose_description(west_african: &str, japanese: &str, style: &str) -> String {
    format!(
        "{} meets {} in a {} creation, where West African warmth meets Japanese precision",
        west_african,
        japanese.to_lowercase(),
        style.to_lowercase()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_templates_are_deterministic() {
        let a = compose_description("Suya Beef", "Yuzu Kosho", "Tempura");
        let b = compose_description("Suya Beef", "Yuzu Kosho", "Tempura");
        assert_eq!(a, b);
        assert_eq!(
            a,
            "Suya Beef meets yuzu kosho in a tempura creation, where West African warmth meets Japanese precision"
        );
        assert_eq!(compose_title("Plantain", "Miso", "Donburi Bowl"), "Donburi Bowl Plantain with Miso");
    }

    #[test]
    fn test_cuisine_labels() {
        assert_eq!(Cuisine::WestAfrican.label(), "West African");
        assert_eq!(Cuisine::Japanese.label(), "Japanese");
    }

    #[test]
    fn test_cuisine_serializes_snake_case() {
        let json = serde_json::to_string(&Cuisine::WestAfrican).unwrap();
        assert_eq!(json, "\"west_african\"");
    }
}
