pub mod analysis;
pub mod dish;
pub mod generator;
pub mod pools;

// Re-export common types
pub use dish::{Cuisine, DishCombo, Ingredient};
pub use generator::ComboGenerator;
pub use pools::Pools;
