//! Chain Store watcher
//!
//! Connects a chain store to a JSON-RPC endpoint and prints every published
//! snapshot as a JSON line.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use chain_store::{create_chain_store, ClientBinding, Config, Readable};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    tracing::info!(key = %config.store_key, "Starting chain store watcher");

    let store = create_chain_store(ClientBinding::alloy(), &config.store_key);
    let _session = store.connect_json_rpc_provider(&config.rpc_url, config.signer_source()?).await?;

    let mut updates = store.store().subscribe();
    println!("{}", serde_json::to_string(&updates.current().summary())?);

    loop {
        tokio::select! {
            update = updates.next() => match update {
                Some(state) => println!("{}", serde_json::to_string(&state.summary())?),
                None => break,
            },
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Shutting down");
                break;
            }
        }
    }

    Ok(())
}
