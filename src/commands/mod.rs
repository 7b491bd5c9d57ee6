use colored::Colorize;
use std::path::Path;

use crate::error::FusionError;
use crate::image::ImageFetcher;
use crate::progress::with_progress;
use crate::session::FusionSession;

pub mod display;
mod system;

use display::{print_dish, print_image};

pub struct CommandHandler {
    session: FusionSession,
    fetcher: ImageFetcher,
    open_images: bool,
}

impl CommandHandler {
    pub fn new(session: FusionSession, open_images: bool) -> Self {
        Self {
            session,
            fetcher: ImageFetcher::default(),
            open_images,
        }
    }

    pub async fn handle_command(&mut self, input: &str) -> Result<(), String> {
        let input = input.trim();

        match input.to_lowercase().as_str() {
            "" | "generate" | "g" => return self.generate().await,
            "text" => return self.generate_text(),
            "show" => return self.show(),
            "open" => return self.open_current(),
            "help" | "exit" | "quit" => return system::handle_command(input),
            "image" => {
                println!("Please provide a prompt.");
                println!("Usage: image <prompt>");
                return Ok(());
            }
            "save" => {
                println!("Please provide a file path.");
                println!("Usage: save <path>");
                return Ok(());
            }
            _ => {}
        }

        if let Some(prompt) = strip_command(input, "image") {
            return self.custom_image(prompt).await;
        }

        if let Some(path) = strip_command(input, "save") {
            return self.save(Path::new(path)).await;
        }

        Err(format!("Unknown command '{}'. Type 'help' for available commands.", input))
    }

    pub async fn generate(&mut self) -> Result<(), String> {
        let (dish, image) = with_progress("Generating visual...", self.session.next_dish())
            .await
            .map_err(|e| e.to_string())?;
        print_dish(dish);
        print_image(image);

        if self.open_images {
            self.open_current()?;
        }
        Ok(())
    }

    pub fn generate_text(&mut self) -> Result<(), String> {
        let dish = self.session.next_dish_text();
        print_dish(dish);
        println!();
        Ok(())
    }

    fn show(&self) -> Result<(), String> {
        let dish = self
            .session
            .dish()
            .ok_or_else(|| "No dish yet. Type 'generate' to create one.".to_string())?;
        print_dish(dish);
        match self.session.image() {
            Some(image) => print_image(image),
            None => println!("{}\n", format!("Image: {}", self.session.phase().label()).dimmed()),
        }
        Ok(())
    }

    async fn custom_image(&self, prompt: &str) -> Result<(), String> {
        if prompt.is_empty() {
            return Err("Please provide a prompt. Usage: image <prompt>".to_string());
        }
        let image = with_progress("Generating visual...", self.session.acquirer().acquire_image(prompt)).await;
        print_image(&image);
        Ok(())
    }

    fn open_current(&self) -> Result<(), String> {
        let image = self
            .session
            .image()
            .ok_or_else(|| "No image to open. Type 'generate' first.".to_string())?;
        webbrowser::open(&image.url).map_err(|e| format!("Failed to open browser: {}", e))?;
        Ok(())
    }

    pub async fn save(&mut self, path: &Path) -> Result<(), String> {
        let bytes = match self.session.download_image(&self.fetcher).await {
            Ok(bytes) => bytes,
            Err(FusionError::ImageTotalFailure(reason)) => {
                return Err(format!("❌ Image failed to load ({}). Try 'generate' for a new dish.", reason));
            }
            Err(e) => return Err(e.to_string()),
        };

        tokio::fs::write(path, &bytes)
            .await
            .map_err(|e| format!("Failed to write {}: {}", path.display(), e))?;
        println!("💾 Saved {} bytes to {}", bytes.len(), path.display().to_string().bright_yellow());
        Ok(())
    }
}

/// Splits `<name> <argument>` with the name matched case-insensitively. The
/// argument keeps its case.
fn strip_command<'a>(input: &'a str, name: &str) -> Option<&'a str> {
    let (head, rest) = input.split_once(char::is_whitespace)?;
    head.eq_ignore_ascii_case(name).then(|| rest.trim())
}
