//! Flash-swap callee collaborator interface.
//!
//! A callee contract supplies the debt-token payment for a bid by
//! borrowing and repaying within one transaction, funded by immediately
//! selling the won collateral. Resolution of the deployed callee and the
//! construction of its calldata are transport concerns behind this seam.

use anyhow::Result;
use async_trait::async_trait;

/// Resolver for flash-swap callee contracts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CalleeResolver: Send + Sync {
    /// Deployed callee address able to swap the given collateral symbol.
    fn callee_address(&self, network: &str, symbol: &str) -> Result<String>;

    /// Build the callee's calldata for a collateral type, directing any
    /// surplus to `profit_address`.
    async fn build_calldata(
        &self,
        network: &str,
        collateral_type: &str,
        profit_address: &str,
    ) -> Result<String>;

    /// Human-readable name of a known callee, for event inspection.
    fn callee_name(&self, network: &str, address: &str) -> Option<String>;
}
