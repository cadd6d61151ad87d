//! Integration tests against a real JSON-RPC endpoint.
//!
//! Run with: `cargo test --test test_live_rpc -- --ignored`

mod common;

use chain_store::{create_chain_store, ClientBinding, Readable, SignerSource};

/// Connect to the configured endpoint and read its chain.
#[tokio::test]
#[ignore = "Requires network access and environment variables"]
async fn test_connect_live_endpoint() {
    let config = skip_if_no_rpc!();

    let store = create_chain_store(ClientBinding::alloy(), &config.store_key);
    let result = store.connect_json_rpc_provider(&config.rpc_url, SignerSource::Default).await;

    assert!(result.is_ok(), "connect should succeed: {:?}", result.err());

    let state = store.store().get();
    assert!(state.is_connected());
    assert!(state.chain_id.is_some());

    println!("Live state: {}", serde_json::to_string(&state.summary()).unwrap());
}
