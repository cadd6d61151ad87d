//! Contract handles built on a JSON ABI.

use std::sync::Arc;

use alloy::{
    dyn_abi::{DynSolValue, FunctionExt, JsonAbiExt},
    json_abi::{Function, JsonAbi},
    primitives::{Address, Bytes},
    rpc::types::TransactionRequest,
};

use super::provider::{ChainProvider, ChainSigner};
use crate::error::{AppError, Result};

/// What a contract handle is bound to.
#[derive(Debug, Clone)]
pub enum ContractRunner {
    Signer(Arc<dyn ChainSigner>),
    Provider(Arc<dyn ChainProvider>),
}

impl ContractRunner {
    /// Provider used for read calls.
    pub fn provider(&self) -> Option<Arc<dyn ChainProvider>> {
        match self {
            ContractRunner::Signer(signer) => signer.provider(),
            ContractRunner::Provider(provider) => Some(Arc::clone(provider)),
        }
    }
}

/// Values a contract store can bind contracts to.
///
/// Anything that is neither a signer nor a provider yields `None`.
pub trait AsRunner {
    fn as_runner(&self) -> Option<ContractRunner>;
}

impl AsRunner for ContractRunner {
    fn as_runner(&self) -> Option<ContractRunner> {
        Some(self.clone())
    }
}

impl<T: AsRunner> AsRunner for Option<T> {
    fn as_runner(&self) -> Option<ContractRunner> {
        self.as_ref().and_then(AsRunner::as_runner)
    }
}

impl AsRunner for Arc<dyn ChainSigner> {
    fn as_runner(&self) -> Option<ContractRunner> {
        Some(ContractRunner::Signer(Arc::clone(self)))
    }
}

impl AsRunner for Arc<dyn ChainProvider> {
    fn as_runner(&self) -> Option<ContractRunner> {
        Some(ContractRunner::Provider(Arc::clone(self)))
    }
}

/// Contract at `address`, described by `abi`, bound to a signer or provider.
#[derive(Debug, Clone)]
pub struct Contract {
    address: Address,
    abi: Arc<JsonAbi>,
    runner: ContractRunner,
}

impl Contract {
    pub fn new(address: Address, abi: Arc<JsonAbi>, runner: ContractRunner) -> Self {
        Self { address, abi, runner }
    }

    pub fn address(&self) -> Address {
        self.address
    }

    pub fn abi(&self) -> &JsonAbi {
        &self.abi
    }

    pub fn runner(&self) -> &ContractRunner {
        &self.runner
    }

    /// ABI-encode a call to `function`, selector included.
    ///
    /// Overloaded functions resolve to the first declaration.
    pub fn encode_call(&self, function: &str, args: &[DynSolValue]) -> Result<Bytes> {
        let input = self.function(function)?.abi_encode_input(args)?;
        Ok(input.into())
    }

    /// Call `function` without broadcasting and decode its outputs.
    pub async fn call(&self, function: &str, args: &[DynSolValue]) -> Result<Vec<DynSolValue>> {
        let data = self.encode_call(function, args)?;
        let provider = self.runner.provider().ok_or(AppError::NoProvider)?;

        let tx = TransactionRequest::default().to(self.address).input(data.into());
        let output = provider.call(&tx).await?;

        tracing::debug!(contract = %self.address, function = function, "Contract call returned");

        Ok(self.function(function)?.abi_decode_output(&output)?)
    }

    fn function(&self, name: &str) -> Result<&Function> {
        self.abi
            .function(name)
            .and_then(|overloads| overloads.first())
            .ok_or_else(|| AppError::Abi(format!("function `{name}` not found in ABI")))
    }
}

/// Parse a JSON ABI (the array form emitted by solc).
pub fn parse_abi(json: &str) -> Result<JsonAbi> {
    serde_json::from_str(json).map_err(|e| AppError::Abi(e.to_string()))
}
