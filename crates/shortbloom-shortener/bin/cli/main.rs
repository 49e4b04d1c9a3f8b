mod cli;

use crate::cli::{StorageBackendArg, CLI};
use clap::Parser;
use shortbloom_filter::BloomFilter;
use shortbloom_generator::RandomGenerator;
use shortbloom_shortener::{Shortener, ShortenerConfig, ShortenerService};
use shortbloom_storage::{InMemoryRepository, RedisRepository, RedisRepositoryConfig};
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = CLI::parse();
    init_tracing(config.log_json);

    info!(
        storage_backend = %config.storage,
        bloom_bits = config.bloom_bits(),
        bloom_hashes = config.bloom_hashes,
        max_attempts = config.max_attempts,
        "starting shortener"
    );

    let filter = BloomFilter::new(config.bloom_bits(), config.bloom_hashes)?;
    let shortener_config = ShortenerConfig::builder()
        .max_attempts(config.max_attempts)
        .build();
    let base_url = config.base_url.as_deref();

    match config.storage {
        StorageBackendArg::InMemory => {
            let service = ShortenerService::with_config(
                InMemoryRepository::new(),
                RandomGenerator::new(),
                filter,
                shortener_config,
            )?;
            run(&service, base_url).await?;
        }
        StorageBackendArg::Redis => {
            let redis_url = config
                .redis_url
                .ok_or("redis url is required when storage backend is redis")?;
            let repository = RedisRepository::new(
                RedisRepositoryConfig::builder()
                    .url(redis_url)
                    .op_timeout(Duration::from_millis(config.redis_timeout_ms))
                    .build(),
            )?;
            let service = ShortenerService::with_config(
                repository,
                RandomGenerator::new(),
                filter,
                shortener_config,
            )?;
            run(&service, base_url).await?;
        }
    }

    Ok(())
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

/// Processes stdin line by line until EOF, writing one result line per input.
async fn run<S: Shortener>(
    shortener: &S,
    base_url: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    while let Some(line) = lines.next_line().await? {
        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        let output = if input.contains("://") {
            match shortener.create(input).await {
                Ok(code) => match base_url {
                    Some(base_url) => code.to_url(base_url),
                    None => code.to_string(),
                },
                Err(e) => {
                    error!(url = input, error = %e, "failed to shorten url");
                    format!("error: {e}")
                }
            }
        } else {
            match shortener.resolve(input).await {
                Ok(Some(url)) => url,
                Ok(None) => "not found".to_string(),
                Err(e) => {
                    error!(code = input, error = %e, "failed to resolve short code");
                    format!("error: {e}")
                }
            }
        };

        stdout.write_all(output.as_bytes()).await?;
        stdout.write_all(b"\n").await?;
        stdout.flush().await?;
    }

    Ok(())
}
