use colored::Colorize;

use crate::food::DishCombo;
use crate::image::{ImageResult, ImageSource};

pub fn print_dish(dish: &DishCombo) {
    println!("\n🍽️  {}", dish.title.bright_yellow().bold());
    println!("{}", dish.description.truecolor(255, 236, 179));
    println!(
        "🏷️  {} ({}) | {} ({}) | {}",
        dish.west_african().name.green(),
        dish.west_african().cuisine.label(),
        dish.japanese().name.red(),
        dish.japanese().cuisine.label(),
        dish.style.cyan()
    );

    if let Some(facts) = &dish.nutrition {
        println!(
            "🥗 ~{} kcal | protein {}g | carbs {}g | fat {}g",
            facts.calories.to_string().bright_green(),
            facts.protein,
            facts.carbs,
            facts.fat
        );
    }
    println!("🎲 Seed: {}", dish.id.to_string().dimmed());
}

pub fn print_image(image: &ImageResult) {
    let source = match image.source {
        ImageSource::Primary => "primary".green(),
        ImageSource::Fallback => "fallback".yellow(),
    };
    println!("🖼️  Image ({}): {}", source, image.url.bright_blue().underline());
    if let Some(reason) = &image.primary_error {
        println!("   {}", format!("primary service unavailable: {}", reason).dimmed());
    }
    println!();
}
