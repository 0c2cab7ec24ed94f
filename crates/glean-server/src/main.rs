//! Glean server binary
//!
//! Starts the HTTP server for text analysis.

use glean_server::{config::AppConfig, start_server, ServerError};
use std::env;
use std::process;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // Load .env file if present (before reading any configuration)
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

async fn run() -> Result<(), ServerError> {
    let args: Vec<String> = env::args().collect();

    let mut config = if args.len() > 2 && args[1] == "--config" {
        AppConfig::from_file(&args[2])?
    } else if args.len() > 1 && args[1] == "--help" {
        print_help();
        process::exit(0);
    } else {
        eprintln!("No config file specified, using defaults");
        eprintln!("Usage: glean-server --config <path-to-config.toml>");
        eprintln!();
        AppConfig::default()
    };

    config.apply_env_overrides()?;

    start_server(config).await?;

    Ok(())
}

fn print_help() {
    println!("Glean Server - Text analysis over HTTP");
    println!();
    println!("USAGE:");
    println!("    glean-server [--config <path-to-config.toml>]");
    println!();
    println!("OPTIONS:");
    println!("    --config <file>    Load configuration from TOML file");
    println!("    --help             Print this help message");
    println!();
    println!("ENDPOINTS:");
    println!("    POST /analyze              Analyze {{\"text\": \"...\"}} and store the result");
    println!("    GET  /search?topic=<t>     Records whose topics or keywords contain <t>");
    println!("    GET  /analyses/<id>        Fetch one record");
    println!("    GET  /health               Provider and locale");
    println!();
    println!("ENVIRONMENT (overrides the config file, also read from .env):");
    println!("    GLEAN_LLM_PROVIDER         stub | ollama");
    println!("    GLEAN_OLLAMA_BASE_URL      Ollama base URL");
    println!("    GLEAN_OLLAMA_MODEL         Ollama model name");
    println!("    GLEAN_DEFAULT_LOCALE       Locale reported by /health");
    println!("    GLEAN_DB_PATH              SQLite database path");
    println!("    RUST_LOG                   Log filter (default: info)");
    println!();
}
