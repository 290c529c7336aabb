//! 2048 storage entry point
//!
//! On web, sets up logging and the clear-storage button. The game scripts
//! create their own `LocalStorageManager` through the JS bindings.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod web {
    use std::rc::Rc;

    use game2048_storage::Settings;
    use game2048_storage::platform::{self, clear_button};

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("2048 storage starting...");

        let manager = match platform::open(&Settings::from_location()) {
            Ok(manager) => Rc::new(manager),
            Err(e) => {
                log::error!("Invalid storage settings: {e}");
                return;
            }
        };
        log::info!("Best score: {}", manager.get_best_score());

        if clear_button::install(manager) {
            log::info!("Clear storage button ready");
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    web::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use game2048_storage::{SavedGame, Settings, platform};

    env_logger::init();
    log::info!("2048 storage (native) starting...");

    let settings = Settings::from_env();
    log::info!("Data file: {}", settings.data_file().display());
    let manager = match platform::open(&settings) {
        Ok(manager) => manager,
        Err(e) => {
            log::error!("Invalid storage settings: {e}");
            std::process::exit(2);
        }
    };

    println!("Best score: {}", manager.get_best_score());
    match manager.get_game_state::<SavedGame>() {
        Ok(Some(game)) => println!(
            "Saved game: score {}, best tile {}, {}",
            game.score,
            game.grid.max_tile().unwrap_or(0),
            if game.is_resumable() { "resumable" } else { "finished" }
        ),
        Ok(None) => println!("No game in progress"),
        Err(e) => log::error!("Saved game unreadable: {e}"),
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
