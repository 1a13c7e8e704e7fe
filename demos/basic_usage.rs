//! Basic usage example
//!
//! Demonstrates the package-level functions in all four call styles.
//!
//! Run with: cargo run --example basic_usage

use xlog::{debugf, field, infow, warnf, Config, LoggerOptions};

fn main() {
    println!("=== xlog - Basic Usage Example ===\n");

    println!("1. Before init (debug level, standard output):");
    xlog::debug(&[&"default logger", &"is ready"]);

    println!("\n2. After init at info level:");
    xlog::init(&Config::stdout("info"));
    xlog::debug(&[&"This debug message will not appear"]);
    xlog::info(&[&"Application", &"started"]);

    println!("\n3. Format style:");
    let port = 8080;
    xlog::infof(format_args!("Listening on port {}", port));
    warnf!("{} of {} workers busy", 7, 8);
    debugf!("hidden: {}", "below threshold");

    println!("\n4. Key/value style:");
    xlog::infow("request served", &["path".into(), "/health".into(), "status".into(), 200u16.into()]);
    infow!("cache stats", "hits", 42u64, "ratio", 0.93);
    infow!("odd list", "orphan");

    println!("\n5. Typed fields:");
    xlog::errorz(
        "upstream failed",
        &[field::string("host", "db-1"), field::duration("after", std::time::Duration::from_millis(250))],
    );

    println!("\n6. Derived logger:");
    let db = xlog::with_options(LoggerOptions::new().named("db").fields(vec![field::int("shard", 3)]));
    db.info("connected", &[]);

    if let Err(e) = xlog::sync() {
        eprintln!("flush failed: {}", e);
    }
    println!("\n=== Example completed successfully! ===");
}
