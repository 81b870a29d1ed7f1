//! Read secrets from a vault with the blocking API
//!
//! Configuration comes from the environment:
//!
//! - `VAULT_ADDR` (default `http://127.0.0.1:8200`)
//! - `VAULT_SECRET_PATH` (default `secret`)
//! - `VAULT_TOKEN_SOURCE`: `environment`, `file` or `login` (default `environment`)
//! - `VAULT_APP_ID`, `VAULT_USER_ID` for `login`
//!
//! Usage: `cargo run --example read_secret -- key1 key2:field`

use tracing::{error, info};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};
use vault_reader_sdk::blocking::{VaultClient, VaultToken};
use vault_reader_sdk::{TokenSource, VaultConfig, VaultConfigBuilder};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();

    let config = load_config()?;
    let mut token = VaultToken::from_config(&config)?;
    token.acquire(&config)?;

    let client = VaultClient::from_config(&config, token.token().ok_or("no vault token")?)?;

    for arg in std::env::args().skip(1) {
        let (key, field) = arg.split_once(':').unwrap_or((arg.as_str(), "value"));
        match client.read_field(key, field) {
            Ok(Some(value)) => println!("{}:{} = {} characters", key, field, value.len()),
            Ok(None) => println!("{}:{} is not set", key, field),
            Err(e) => error!(%e, "read failed"),
        }
    }

    // Tokens read from env or file belong to someone else
    if config.token_source == TokenSource::Login {
        token.revoke()?;
        info!("token revoked");
    }
    Ok(())
}

fn init_logging() {
    let fmt_layer = fmt::layer().with_target(false);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}

fn load_config() -> Result<VaultConfig, Box<dyn std::error::Error>> {
    let base_url =
        std::env::var("VAULT_ADDR").unwrap_or_else(|_| "http://127.0.0.1:8200".to_string());
    let secret_path = std::env::var("VAULT_SECRET_PATH").unwrap_or_else(|_| "secret".to_string());
    let source: TokenSource = std::env::var("VAULT_TOKEN_SOURCE")
        .unwrap_or_else(|_| "environment".to_string())
        .parse()?;

    let mut builder = VaultConfigBuilder::new(base_url)
        .secret_path(secret_path)
        .token_source(source)
        .user_agent_extra("demos/read_secret");
    if let Ok(app_id) = std::env::var("VAULT_APP_ID") {
        builder = builder.app_id(app_id);
    }
    if let Ok(user_id) = std::env::var("VAULT_USER_ID") {
        builder = builder.user_id(user_id);
    }

    Ok(builder.build()?)
}
