//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `tutorspet_core` linkage end to end: config, logging, storage.
//! - Print the displayed student and date lists in a deterministic format.
//!
//! Usage: `tutorspet_cli [config.json]`

use log::info;
use tutorspet_core::db::open_db;
use tutorspet_core::sample::{sample_address_book, sample_dates_book};
use tutorspet_core::{init_logging, BookStorage, CoreConfig, ModelManager, SqliteBookStorage};

const DEFAULT_CONFIG_PATH: &str = "config.json";

fn main() {
    if let Err(err) = run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());
    let config = CoreConfig::load(&config_path)?;
    if let Some(log_dir) = &config.log_dir {
        init_logging(&config.log_level, log_dir)?;
    }

    if let Some(parent) = config.data_db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let mut conn = open_db(&config.data_db_path)?;
    let mut storage = SqliteBookStorage::try_new(&mut conn)?;

    let address_book = match storage.load_address_book()? {
        Some(book) => book,
        None => {
            let book = sample_address_book();
            storage.save_address_book(&book)?;
            book
        }
    };
    let dates_book = match storage.load_dates_book()? {
        Some(book) => book,
        None => {
            let book = sample_dates_book();
            storage.save_dates_book(&book)?;
            book
        }
    };

    let model = ModelManager::new(address_book, dates_book);
    println!("tutorspet_core version={}", tutorspet_core::core_version());
    for (position, person) in model.transformed_persons().iter().enumerate() {
        println!("{}. {}", position + 1, person);
    }
    for (position, date) in model.transformed_dates().iter().enumerate() {
        println!("{}. {}", position + 1, date);
    }
    info!(
        "event=cli_run module=cli status=ok persons={} dates={}",
        model.transformed_persons().len(),
        model.transformed_dates().len()
    );
    Ok(())
}
