//! Bid executor.
//!
//! Assembles the flash-swap funded `take` call for an auction a caller
//! decided to act on, and the `redo` call for auctions whose price
//! decayed below the viable floor. Submission failures propagate to the
//! caller: bidding is an intentional action whose failure must be
//! visible, never silently retried.

use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::info;

use crate::callee::CalleeResolver;
use crate::chain::ChainClient;
use crate::tracker::TransactionTracker;
use crate::types::{Auction, Notifier, TransactionId, TxHandle};
use crate::units::{self, Scale};

pub struct BidExecutor {
    chain: Arc<dyn ChainClient>,
    callees: Arc<dyn CalleeResolver>,
    tracker: Arc<dyn TransactionTracker>,
}

impl BidExecutor {
    pub fn new(
        chain: Arc<dyn ChainClient>,
        callees: Arc<dyn CalleeResolver>,
        tracker: Arc<dyn TransactionTracker>,
    ) -> Self {
        Self {
            chain,
            callees,
            tracker,
        }
    }

    /// Bid on an auction, funded by a flash swap through the resolved
    /// callee. The requested amount and the highest acceptable price are
    /// truncated, never rounded up: the bid must not ask for more than
    /// intended or accept a worse price than was computed.
    pub async fn bid(
        &self,
        network: &str,
        auction: &Auction,
        profit_address: &str,
        notifier: Option<Notifier>,
    ) -> Result<TransactionId> {
        let callee = self
            .callees
            .callee_address(network, &auction.collateral_symbol)
            .with_context(|| format!("No callee for {}", auction.collateral_symbol))?;
        let callee_data = self
            .callees
            .build_calldata(network, &auction.collateral_type, profit_address)
            .await
            .context("Building callee calldata failed")?;

        let amount = units::from_decimal(&auction.amount_collateral, Scale::Wad);
        let max_price = units::from_decimal(&auction.amount_per_collateral, Scale::Ray);

        let handle = self
            .chain
            .submit_take(
                network,
                &auction.collateral_type,
                auction.auction_id,
                &amount,
                &max_price,
                &callee,
                &callee_data,
            )
            .await?;

        info!(
            auction_id = %auction.id,
            amount = %amount,
            max_price = %max_price,
            callee = %callee,
            "Bid submitted"
        );

        self.tracker.track(handle, notifier).await
    }

    /// Restart an auction whose price decayed below the viable floor,
    /// directing the restart incentive to `profit_address`. No profit
    /// computation is involved.
    pub async fn restart(
        &self,
        network: &str,
        collateral_type: &str,
        auction_id: u64,
        profit_address: &str,
    ) -> Result<TxHandle> {
        let handle = self
            .chain
            .submit_redo(network, collateral_type, auction_id, profit_address)
            .await?;
        info!(collateral_type, auction_id, "Restart submitted");
        Ok(handle)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
