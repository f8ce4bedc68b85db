//! Server command implementation

use std::path::Path;

use anyhow::Result;
use fintrack_server::{ServerConfig, ALLOWED_ORIGINS_ENV, API_KEYS_ENV};

use super::open_db;

pub async fn cmd_serve(
    db_path: &Path,
    host: &str,
    port: u16,
    no_auth: bool,
    no_encrypt: bool,
) -> Result<()> {
    println!("🚀 Starting fintrack web server...");
    println!("   Database: {}", db_path.display());
    println!("   Listening: http://{}:{}", host, port);

    let config = ServerConfig::from_env(!no_auth);

    if no_auth {
        println!();
        println!("   ⚠️  Authentication DISABLED - do not expose to network!");
        println!("   All requests act as 'local-dev' unless an access header is present");
    } else {
        println!("   🔒 Authentication: access-proxy header or API key");
        if config.api_keys.is_empty() {
            println!(
                "      Set {} (user=key,...) to enable API keys",
                API_KEYS_ENV
            );
        } else {
            println!(
                "   🔑 API keys: {} configured ({})",
                config.api_keys.len(),
                API_KEYS_ENV
            );
        }
    }
    if !config.allowed_origins.is_empty() {
        println!(
            "   🌐 CORS origins: {} ({})",
            config.allowed_origins.join(", "),
            ALLOWED_ORIGINS_ENV
        );
    }
    if no_encrypt {
        println!("   ⚠️  Encryption DISABLED (--no-encrypt)");
    }
    println!();
    println!("   Press Ctrl+C to stop");

    let db = open_db(db_path, no_encrypt)?;

    fintrack_server::serve_with_config(db, host, port, config).await?;

    Ok(())
}
