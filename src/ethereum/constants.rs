//! Ethereum network constants.
//!
//! Contains well-known chain IDs, EIP-1193 method names and store defaults.

// ============================================================================
// Chain IDs
// ============================================================================

/// Ethereum Mainnet chain ID.
pub const ETHEREUM_MAINNET_CHAIN_ID: u64 = 1;

/// Sepolia testnet chain ID.
pub const SEPOLIA_CHAIN_ID: u64 = 11155111;

/// Holesky testnet chain ID.
pub const HOLESKY_CHAIN_ID: u64 = 17000;

/// Chain ID used by local Ganache-style development nodes.
pub const LOCALHOST_CHAIN_ID: u64 = 1337;

/// Hardhat / Anvil development chain ID.
pub const HARDHAT_CHAIN_ID: u64 = 31337;

// ============================================================================
// EIP-1193 methods
// ============================================================================

/// Ask the wallet to expose its accounts to the caller.
pub const ETH_REQUEST_ACCOUNTS: &str = "eth_requestAccounts";

/// List accounts the wallet already exposes.
pub const ETH_ACCOUNTS: &str = "eth_accounts";

/// Current chain id as a hex quantity.
pub const ETH_CHAIN_ID: &str = "eth_chainId";

/// Read-only contract call.
pub const ETH_CALL: &str = "eth_call";

// ============================================================================
// Store defaults
// ============================================================================

/// Account index used when no signer is specified.
pub const DEFAULT_SIGNER_INDEX: usize = 0;

/// Registry key used by the binary when none is configured.
pub const DEFAULT_STORE_KEY: &str = "main";
