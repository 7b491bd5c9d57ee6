use fusion_kitchen::api::{self, AppState};
use fusion_kitchen::commands::CommandHandler;
use fusion_kitchen::config::FusionConfig;
use fusion_kitchen::food::{ComboGenerator, Pools};
use fusion_kitchen::image::ImageAcquirer;
use fusion_kitchen::session::FusionSession;
use clap::Parser;
use colored::Colorize;
use dotenv::dotenv;
use log::info;
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use rustyline::Editor;
use std::net::SocketAddr;
use std::path::PathBuf;
use tokio::net::TcpListener;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "West Africa meets Japan in a culinary experiment", long_about = None)]
struct Args {
    /// Generate a single dish and exit
    #[arg(long)]
    once: bool,

    /// Seed the generator for reproducible dishes
    #[arg(long)]
    seed: Option<u64>,

    /// Skip the image request (only with --once)
    #[arg(long)]
    no_image: bool,

    /// Download the dish image to this path (only with --once)
    #[arg(long)]
    save: Option<PathBuf>,

    /// Open each image in the browser
    #[arg(long)]
    open: bool,

    /// JSON file with custom ingredient and style pools
    #[arg(long)]
    pools: Option<PathBuf>,

    #[arg(long)]
    api: bool,

    #[arg(long, default_value = "3000")]
    port: u16,
}

type AppResult<T> = Result<T, Box<dyn std::error::Error + Send + Sync>>;

#[tokio::main]
async fn main() -> AppResult<()> {
    // Load environment variables
    dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let mut config = FusionConfig::from_env()?;
    if args.pools.is_some() {
        config.pools_path = args.pools.clone();
    }

    // Bad pool files stop us here, before any dish is generated.
    let pools = Pools::load(config.pools_path.as_deref())?;
    let acquirer = ImageAcquirer::from_config(&config)?;

    if args.api {
        run_api_server(&args, AppState::new(pools, acquirer)).await
    } else {
        let generator = match args.seed {
            Some(seed) => ComboGenerator::seeded(pools, seed)?,
            None => ComboGenerator::from_entropy(pools)?,
        };
        let handler = CommandHandler::new(FusionSession::new(generator, acquirer), args.open);

        if args.once {
            run_once(&args, handler).await
        } else {
            run_cli_mode(handler).await
        }
    }
}

async fn run_once(args: &Args, mut handler: CommandHandler) -> AppResult<()> {
    if args.no_image {
        handler.generate_text()?;
        return Ok(());
    }

    handler.generate().await?;
    if let Some(path) = &args.save {
        handler.save(path).await?;
    }
    Ok(())
}

async fn run_cli_mode(mut handler: CommandHandler) -> AppResult<()> {
    println!("{}", "🍱 West Africa meets Japan in a culinary experiment.".bright_yellow());
    handler.handle_command("help").await?;

    // Start with a dish on screen
    if let Err(e) = handler.generate().await {
        println!("{}", e.red());
    }

    let mut rl = Editor::<(), DefaultHistory>::new()?;

    loop {
        match rl.readline("🍳 ") {
            Ok(line) => {
                let input = line.trim();
                let _ = rl.add_history_entry(input);

                if let Err(e) = handler.handle_command(input).await {
                    println!("{}", e.red());
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("CTRL-C");
                break;
            }
            Err(ReadlineError::Eof) => {
                println!("CTRL-D");
                break;
            }
            Err(err) => {
                println!("Error: {:?}", err);
                break;
            }
        }
    }
    Ok(())
}

async fn run_api_server(args: &Args, state: AppState) -> AppResult<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], args.port));
    let app = api::create_api(state);

    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|e| format!("Failed to bind to {}: {}", addr, e))?;

    info!("API server listening on {}", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| format!("Server error: {}", e))?;

    Ok(())
}
