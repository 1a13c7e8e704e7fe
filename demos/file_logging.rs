//! File logging example
//!
//! Demonstrates the rotating file sink selected by a non-empty `file`.
//!
//! Run with: cargo run --example file_logging

use xlog::{field, Config, Result};

fn main() -> Result<()> {
    println!("=== xlog - File Logging Example ===\n");

    let config = Config::file("logs/application.log", "debug")
        .with_max_backups(5)
        .with_max_age_days(7);
    xlog::init(&config);

    println!("1. Logging to {}:", config.file);
    xlog::info(&[&"Application started"]);
    xlog::debugf(format_args!("Loaded {} settings", 12));
    xlog::warnw("Using default settings", &["missing".into(), "timeout".into()]);

    println!("\n2. Performing some operations:");
    for i in 1..=5 {
        xlog::infof(format_args!("Processing item {}/5", i));
        if i == 3 {
            xlog::warnz("Item took longer than expected", &[field::int("item", i)]);
        }
    }

    xlog::info(&[&"All operations completed"]);
    xlog::sync()?;

    println!("\n=== Example completed successfully! ===");
    println!("Check '{}' for the log output", config.file);

    Ok(())
}
