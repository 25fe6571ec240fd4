mod config;
mod input;
mod offline;
mod state;
mod ui;

use clap::Parser;
use common::games::SessionRng;
use common::games::snake::{FileHighScoreStore, SnakeSessionSettings};
use common::{log, logger};
use eframe::egui;
use tokio::sync::mpsc;

use config::{get_config_manager, resolve_path};
use offline::run_snake_game;
use state::{ClientCommand, CommandSender, SharedState};
use ui::SnakeApp;

#[derive(Parser)]
#[command(name = "snake_desktop")]
struct Args {
    /// Config file; defaults to snake_desktop_config.yaml next to the executable
    #[arg(long)]
    config: Option<String>,

    /// Seed for food placement
    #[arg(long)]
    seed: Option<u64>,

    #[arg(long)]
    use_log_prefix: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let prefix = if args.use_log_prefix {
        Some("Snake".to_string())
    } else {
        None
    };
    logger::init_logger(prefix);

    let config = get_config_manager(args.config.as_deref()).get_config()?;
    let settings = SnakeSessionSettings::from(&config.snake);
    let high_score_path = resolve_path(&config.high_score_file);
    log!("High scores stored in {}", high_score_path);

    let rng = match args.seed {
        Some(seed) => SessionRng::new(seed),
        None => SessionRng::from_random(),
    };

    let shared_state = SharedState::new(config.recent_scores);
    let (command_tx, command_rx) = mpsc::unbounded_channel();
    let command_sender = CommandSender::new(command_tx);

    let shared_state_clone = shared_state.clone();
    let session_thread = std::thread::spawn(move || {
        let rt = match tokio::runtime::Runtime::new() {
            Ok(rt) => rt,
            Err(e) => {
                log!("Failed to start tokio runtime: {}", e);
                shared_state_clone.set_error(format!("Failed to start runtime: {}", e));
                return;
            }
        };
        let store = FileHighScoreStore::from_yaml_file(&high_score_path);
        rt.block_on(run_snake_game(
            shared_state_clone,
            command_rx,
            settings,
            store,
            rng,
        ));
    });

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([
                config.snake.viewport_width as f32,
                config.snake.viewport_height as f32,
            ])
            .with_resizable(false)
            .with_title("Snake"),
        ..Default::default()
    };

    let app = SnakeApp::new(shared_state, command_sender.clone(), &config.snake);
    let run_result = eframe::run_native("Snake", options, Box::new(|_cc| Ok(Box::new(app))));

    command_sender.send(ClientCommand::Shutdown);
    if session_thread.join().is_err() {
        log!("Session thread panicked");
    }

    run_result?;
    Ok(())
}
