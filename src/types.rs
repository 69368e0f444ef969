//! Shared types for the keeper core.
//!
//! These types form the data model used across all modules. They are
//! designed to be stable so that chain, engine, and authorization modules
//! can depend on them without circular references.

use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

// ---------------------------------------------------------------------------
// Auctions
// ---------------------------------------------------------------------------

/// An auction as listed by discovery, before any per-auction status read.
///
/// `id` uniquely identifies the auction across its entire lifetime even as
/// the numeric fields change between enrichment passes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuctionInitialInfo {
    /// Composite natural key: `{collateral_type}:{auction_id}`.
    pub id: String,
    /// Numeric sale id within the collateral type's auction house.
    pub auction_id: u64,
    /// Collateral type identifier ("ilk"), e.g. `ETH-A`.
    pub collateral_type: String,
    /// Display symbol of the collateral token, e.g. `ETH`.
    pub collateral_symbol: String,
    /// Address of the liquidated position's owner.
    pub vault_owner: String,
    /// Collateral lot remaining, in whole collateral units.
    pub amount_collateral: BigDecimal,
    /// Outstanding debt the auction must recover, in debt-token units.
    pub debt_dai: BigDecimal,
    /// Auction expiry timestamp.
    pub till: DateTime<Utc>,
    /// Auction creation timestamp.
    pub start: DateTime<Utc>,
    /// Listed as active and not yet expired. Refined by enrichment.
    pub is_active: bool,
    pub is_finished: bool,
    pub is_restarting: bool,
    /// Seconds between price drops for this collateral type.
    pub step: u64,
    /// Multiplicative price cut applied every `step` seconds.
    pub cut: BigDecimal,
}

/// An auction enriched with its live on-chain status and, when the
/// external price source cooperated, market valuation fields.
///
/// Inactive auctions carry zeroed monetary fields; auctions whose price
/// quote failed carry `None` market fields, which callers must treat as
/// "unknown, do not bid".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Auction {
    pub id: String,
    pub auction_id: u64,
    pub collateral_type: String,
    pub collateral_symbol: String,
    pub vault_owner: String,
    pub amount_collateral: BigDecimal,
    pub debt_dai: BigDecimal,
    pub till: DateTime<Utc>,
    pub start: DateTime<Utc>,
    pub is_active: bool,
    pub is_finished: bool,
    pub is_restarting: bool,
    pub step: u64,
    pub cut: BigDecimal,
    /// Current auction price per unit of collateral, in debt-token units.
    pub amount_per_collateral: BigDecimal,
    /// Value of the full lot at the current auction price.
    pub amount_dai: BigDecimal,
    /// Reference market price per unit of collateral, if quoted.
    pub market_price_per_collateral: Option<BigDecimal>,
    /// Relative discount of the auction price against market: positive
    /// when the auction is above market, negative when it is cheaper.
    pub market_value: Option<BigDecimal>,
    /// Expected profit of taking this auction, in debt-token units.
    pub transaction_profit: Option<BigDecimal>,
}

impl fmt::Display for Auction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] lot: {} {} | price: {} | debt: {} | active: {}",
            self.id,
            self.amount_collateral,
            self.collateral_symbol,
            self.amount_per_collateral,
            self.debt_dai,
            self.is_active,
        )
    }
}

impl Auction {
    /// Expected profit, if the auction is active and was valuated.
    pub fn expected_profit(&self) -> Option<&BigDecimal> {
        self.transaction_profit.as_ref()
    }
}

// ---------------------------------------------------------------------------
// Transactions
// ---------------------------------------------------------------------------

/// Opaque handle for a submitted transaction, as returned by the chain
/// client collaborator.
pub type TxHandle = String;

/// Identifier assigned by the transaction tracker once it picked a
/// submission up.
pub type TransactionId = String;

/// Lifecycle stages reported during a transaction's life. The core passes
/// these through to the caller's notifier without interpreting them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionStatus {
    Submitted,
    Confirmed,
    Rejected(String),
}

/// Progress sink handed to transaction-submitting operations.
pub type Notifier = Arc<dyn Fn(TransactionStatus) + Send + Sync>;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Failure taxonomy of the keeper core.
///
/// Batch operations never let one item's failure abort its siblings: the
/// per-type and per-auction variants are logged and excluded from results.
/// Single-item operations (bid, restart, authorize) propagate directly.
#[derive(Debug, Error)]
pub enum KeeperError {
    #[error("unknown collateral type: {0}")]
    UnknownCollateralType(String),

    #[error("auction discovery failed for {collateral_type}: {cause}")]
    Discovery {
        collateral_type: String,
        cause: anyhow::Error,
    },

    #[error("price quote failed for {symbol} on auction {auction_id}: {cause}")]
    PriceQuote {
        auction_id: String,
        symbol: String,
        cause: anyhow::Error,
    },

    #[error("malformed take calldata in transaction {tx_hash}: {reason}")]
    Decode { tx_hash: String, reason: String },
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
