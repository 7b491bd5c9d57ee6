pub mod nutrition;

pub use nutrition::{estimate, NutritionBounds, NutritionFacts, NutritionProfile};
