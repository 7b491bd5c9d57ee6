pub fn handle_command(input: &str) -> Result<(), String> {
    match input.to_lowercase().as_str() {
        "help" => {
            println!("\n🍳 Fusion Kitchen Commands:");
            println!("  generate        - New dish with an image (or just press Enter)");
            println!("  text            - New dish, no image");
            println!("  show            - Show the current dish again");
            println!();

            println!("🖼️ Image Commands:");
            println!("  image <prompt>  - Generate an image for your own prompt");
            println!("  save <path>     - Download the current dish image");
            println!("  open            - Open the current dish image in your browser");
            println!();

            println!("⚙️ System Commands:");
            println!("  help  - Show this help menu");
            println!("  exit  - Exit the program");
            Ok(())
        },
        "exit" | "quit" => {
            println!("👋 Goodbye!");
            std::process::exit(0);
        },
        _ => Err("Unknown system command. Type 'help' for available commands.".to_string())
    }
}
