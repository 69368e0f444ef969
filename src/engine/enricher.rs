//! Auction enrichment.
//!
//! Reads each active auction's live status from its auction house and
//! converts the raw fixed-point fields into the current unit price and
//! the remaining collateral and debt. Read-only and idempotent; safe to
//! repeat every scan cycle.

use anyhow::Result;
use bigdecimal::{BigDecimal, Zero};
use futures::future::join_all;
use std::sync::Arc;
use tracing::{info, warn};

use crate::chain::ChainClient;
use crate::types::{Auction, AuctionInitialInfo};
use crate::units::{self, Scale};

pub struct AuctionEnricher {
    chain: Arc<dyn ChainClient>,
}

impl AuctionEnricher {
    pub fn new(chain: Arc<dyn ChainClient>) -> Self {
        Self { chain }
    }

    /// Enrich one auction with its live on-chain status.
    ///
    /// Inactive auctions short-circuit to zeroed monetary fields without
    /// a contract call. Active auctions refine `is_active` to the inverse
    /// of the contract's `needs_redo` flag.
    pub async fn enrich(&self, network: &str, info: AuctionInitialInfo) -> Result<Auction> {
        if !info.is_active {
            return Ok(inactive_auction(info));
        }

        let status = self
            .chain
            .read_auction_status(network, &info.collateral_type, info.auction_id)
            .await?;

        let price = units::to_decimal(&status.price, Scale::Ray)?;
        let lot = units::to_decimal(&status.lot, Scale::Wad)?;
        let tab = units::to_decimal(&status.tab, Scale::Rad)?;

        Ok(Auction {
            id: info.id,
            auction_id: info.auction_id,
            collateral_type: info.collateral_type,
            collateral_symbol: info.collateral_symbol,
            vault_owner: info.vault_owner,
            amount_dai: &lot * &price,
            amount_collateral: lot,
            debt_dai: tab,
            till: info.till,
            start: info.start,
            is_active: !status.needs_redo,
            is_finished: info.is_finished,
            is_restarting: info.is_restarting,
            step: info.step,
            cut: info.cut,
            amount_per_collateral: price,
            market_price_per_collateral: None,
            market_value: None,
            transaction_profit: None,
        })
    }

    /// Enrich a whole batch concurrently. A single auction's failed
    /// status read is logged and excluded; siblings are unaffected.
    pub async fn enrich_all(
        &self,
        network: &str,
        infos: Vec<AuctionInitialInfo>,
    ) -> Vec<Auction> {
        let count = infos.len();
        let results = join_all(infos.into_iter().map(|info| {
            let id = info.id.clone();
            let enriched = self.enrich(network, info);
            async move { (id, enriched.await) }
        }))
        .await;

        let mut auctions = Vec::with_capacity(count);
        for (id, result) in results {
            match result {
                Ok(auction) => auctions.push(auction),
                Err(e) => {
                    warn!(auction_id = %id, error = %e, "Status read failed, excluding auction");
                }
            }
        }

        info!(enriched = auctions.len(), of = count, "Auction enrichment complete");
        auctions
    }
}

/// An inactive auction keeps its listing amounts but zeroes the derived
/// monetary fields, regardless of whatever stale status the contract
/// would still report.
fn inactive_auction(info: AuctionInitialInfo) -> Auction {
    Auction {
        id: info.id,
        auction_id: info.auction_id,
        collateral_type: info.collateral_type,
        collateral_symbol: info.collateral_symbol,
        vault_owner: info.vault_owner,
        amount_collateral: info.amount_collateral,
        debt_dai: info.debt_dai,
        till: info.till,
        start: info.start,
        is_active: false,
        is_finished: info.is_finished,
        is_restarting: info.is_restarting,
        step: info.step,
        cut: info.cut,
        amount_per_collateral: BigDecimal::zero(),
        amount_dai: BigDecimal::zero(),
        market_price_per_collateral: None,
        market_value: None,
        transaction_profit: None,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
