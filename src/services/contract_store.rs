//! Contract store: a contract handle that follows a signer or provider store.

use std::sync::Arc;

use alloy::{json_abi::JsonAbi, primitives::Address};

use crate::{
    error::{AppError, Result},
    ethereum::{AsRunner, ClientBinding, Contract},
    reactive::{Derived, Readable},
};

/// Derive a contract store from a store of signers or providers.
///
/// Every upstream publish yields a freshly built [`Contract`] bound to the new
/// value when it is a signer or provider, and `None` otherwise.
///
/// # Errors
/// Returns an error, before subscribing to anything, if no client is bound,
/// `address` or `abi` is empty, or `address` is not a valid address.
pub fn create_contract_store<S, R>(
    binding: &ClientBinding,
    address: &str,
    abi: JsonAbi,
    source: R,
) -> Result<Derived<Option<Contract>>>
where
    S: AsRunner + Clone + Send + Sync + 'static,
    R: Readable<S> + 'static,
{
    binding.client()?;

    if address.trim().is_empty() || abi.is_empty() {
        return Err(AppError::InvalidContract("address or abi cannot be empty".into()));
    }

    let address: Address =
        address.trim().parse().map_err(|_| AppError::InvalidAddress(address.to_string()))?;
    let abi = Arc::new(abi);

    tracing::debug!(contract = %address, "Contract store created");

    Ok(Derived::new(source, move |value: &S| {
        value.as_runner().map(|runner| Contract::new(address, Arc::clone(&abi), runner))
    }))
}
