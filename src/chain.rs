//! Chain client collaborator interface.
//!
//! Narrow, explicitly typed seam to the on-chain world. The keeper core
//! never talks to an RPC endpoint directly; a transport implements this
//! trait and owns retries, timeouts, and ABI encoding. All amounts cross
//! this boundary as integer strings at the scale documented per field.

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::types::{Notifier, TxHandle};

// ---------------------------------------------------------------------------
// Well-known contract names
// ---------------------------------------------------------------------------

/// Debt-token join adapter; grantee of the wallet-level permission and
/// spender of the debt-token allowance.
pub const JOIN_DAI: &str = "MCD_JOIN_DAI";
/// Surplus auction house; grantee of the surplus-level permission and
/// spender of the governance-token allowance.
pub const FLAPPER: &str = "MCD_FLAP";
/// Debt token contract.
pub const TOKEN_DAI: &str = "MCD_DAI";
/// Governance token contract.
pub const TOKEN_GOV: &str = "MCD_GOV";

// ---------------------------------------------------------------------------
// Raw records
// ---------------------------------------------------------------------------

/// One sale record as listed by a collateral type's auction house.
#[derive(Debug, Clone, PartialEq)]
pub struct RawSaleRecord {
    pub sale_id: u64,
    /// Collateral type identifier the record belongs to.
    pub ilk: String,
    /// Address of the liquidated vault's owner.
    pub usr: String,
    /// Remaining collateral lot, WAD-scaled integer string.
    pub lot: String,
    /// Outstanding debt, RAD-scaled integer string.
    pub tab: String,
    pub active: bool,
    pub created: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
}

/// Live status of one auction, read per enrichment pass.
#[derive(Debug, Clone, PartialEq)]
pub struct RawAuctionStatus {
    /// Current price per collateral unit, RAY-scaled integer string.
    pub price: String,
    /// Remaining collateral lot, WAD-scaled integer string.
    pub lot: String,
    /// Outstanding debt, RAD-scaled integer string.
    pub tab: String,
    /// Set when the price decayed below the viable floor and the auction
    /// must be restarted before it can be taken again.
    pub needs_redo: bool,
}

/// Price-decay parameters of a collateral type's auction house.
#[derive(Debug, Clone, PartialEq)]
pub struct RawCalcParameters {
    /// Seconds between price drops.
    pub step: u64,
    /// Multiplicative cut factor per step, RAY-scaled integer string.
    pub cut: String,
}

/// One historical `take` call against an auction house.
#[derive(Debug, Clone, PartialEq)]
pub struct RawTakeEvent {
    pub tx_hash: String,
    pub from: String,
    pub block_number: Option<u64>,
    pub block_date: Option<DateTime<Utc>>,
    /// Hex-encoded transaction input, decodable via
    /// [`ChainClient::decode_take_calldata`].
    pub input: String,
}

/// Parameters of a decoded `take` call.
#[derive(Debug, Clone, PartialEq)]
pub struct RawTakeCalldata {
    pub auction_id: u64,
    /// Collateral amount requested, WAD-scaled integer string.
    pub taken_amount: String,
    /// Highest acceptable unit price, RAY-scaled integer string.
    pub max_acceptable_price: String,
    /// Flash-swap callee, or the bidder's own wallet for funded bids.
    pub callee_or_wallet: String,
    pub callee_data: String,
}

// ---------------------------------------------------------------------------
// Trait
// ---------------------------------------------------------------------------

/// Abstraction over the lending protocol's on-chain surface.
///
/// Read methods never mutate chain state and are safe to repeat. Write
/// methods return a [`TxHandle`] immediately; confirmation tracking is the
/// transaction tracker collaborator's job.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ChainClient: Send + Sync {
    /// List all sale records of one collateral type's auction house.
    /// An empty list is a legitimate answer, not an error.
    async fn list_sale_records(
        &self,
        network: &str,
        collateral_type: &str,
    ) -> Result<Vec<RawSaleRecord>>;

    /// Read the live status of one auction.
    async fn read_auction_status(
        &self,
        network: &str,
        collateral_type: &str,
        auction_id: u64,
    ) -> Result<RawAuctionStatus>;

    /// Read the price-decay parameters of one collateral type.
    async fn read_calc_parameters(
        &self,
        network: &str,
        collateral_type: &str,
    ) -> Result<RawCalcParameters>;

    /// Submit a `take` (bid) call. `amount` is WAD-scaled, `max_price`
    /// RAY-scaled; both are integer strings truncated by the caller.
    #[allow(clippy::too_many_arguments)]
    async fn submit_take(
        &self,
        network: &str,
        collateral_type: &str,
        auction_id: u64,
        amount: &str,
        max_price: &str,
        callee: &str,
        callee_data: &str,
    ) -> Result<TxHandle>;

    /// Submit a `redo` call resetting a decayed auction's starting price.
    async fn submit_redo(
        &self,
        network: &str,
        collateral_type: &str,
        auction_id: u64,
        recipient: &str,
    ) -> Result<TxHandle>;

    /// Resolve a well-known contract name to its deployed address.
    async fn contract_address(&self, network: &str, name: &str) -> Result<String>;

    /// Whether `owner` granted the protocol-level permission to `grantee`.
    async fn read_permission(&self, network: &str, owner: &str, grantee: &str) -> Result<bool>;

    /// Grant (or revoke) the protocol-level permission to `grantee` on
    /// behalf of the configured wallet.
    async fn set_permission(
        &self,
        network: &str,
        grantee: &str,
        revoke: bool,
        notifier: Option<Notifier>,
    ) -> Result<TxHandle>;

    /// Current ERC-20 allowance, WAD-scaled integer string.
    async fn read_allowance(
        &self,
        network: &str,
        token: &str,
        owner: &str,
        spender: &str,
    ) -> Result<String>;

    /// Approve `spender` for `amount_raw` (WAD-scaled integer string).
    async fn approve(
        &self,
        network: &str,
        token: &str,
        spender: &str,
        amount_raw: &str,
        notifier: Option<Notifier>,
    ) -> Result<TxHandle>;

    /// List historical `take` calls against one auction house.
    async fn list_take_events(
        &self,
        network: &str,
        collateral_type: &str,
    ) -> Result<Vec<RawTakeEvent>>;

    /// Decode the input of a `take` transaction. Fails on malformed
    /// calldata; callers isolate the failure per record.
    fn decode_take_calldata(&self, input: &str) -> Result<RawTakeCalldata>;
}
