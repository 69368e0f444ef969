//! External reference price collaborator interface.
//!
//! The price a quote returns may depend on the trade size (pool depth,
//! slippage), so the contract is a function of `(symbol, amount)`, not of
//! the symbol alone. Quotes may legitimately fail or time out; callers
//! degrade per auction instead of propagating.

use anyhow::Result;
use async_trait::async_trait;
use bigdecimal::BigDecimal;

/// Source of live market prices for collateral tokens, denominated in
/// debt-token units per unit of collateral.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PriceSource: Send + Sync {
    /// Quote the market unit price for selling `amount` of `symbol`.
    async fn quote(&self, network: &str, symbol: &str, amount: &BigDecimal) -> Result<BigDecimal>;
}
