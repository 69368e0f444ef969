//! Market valuation and the profit model.
//!
//! Quotes an external reference price for each active auction's lot,
//! derives the relative discount against the auction price, and computes
//! the expected profit of taking the auction under the protocol's
//! debt-capped settlement rule. A failed quote degrades only its own
//! auction: the auction comes back without market fields, which callers
//! must read as "unknown, do not bid".

use bigdecimal::{BigDecimal, Zero};
use futures::future::join_all;
use std::sync::Arc;
use tracing::{info, warn};

use crate::pricing::PriceSource;
use crate::types::{Auction, KeeperError};

pub struct MarketValuator {
    prices: Arc<dyn PriceSource>,
}

impl MarketValuator {
    pub fn new(prices: Arc<dyn PriceSource>) -> Self {
        Self { prices }
    }

    /// Attach market price, discount, and expected profit to an auction.
    /// No-op for inactive auctions; never fails.
    pub async fn valuate(&self, network: &str, mut auction: Auction) -> Auction {
        if !auction.is_active {
            return auction;
        }

        let market_price = match self
            .prices
            .quote(network, &auction.collateral_symbol, &auction.amount_collateral)
            .await
        {
            Ok(price) => price,
            Err(cause) => {
                let err = KeeperError::PriceQuote {
                    auction_id: auction.id.clone(),
                    symbol: auction.collateral_symbol.clone(),
                    cause,
                };
                warn!(auction_id = %auction.id, error = %err, "Returning auction without market fields");
                return auction;
            }
        };

        // A zero on either side would divide by zero below; neither can
        // price a live auction meaningfully, so leave the fields unset.
        if market_price.is_zero() || auction.amount_per_collateral.is_zero() {
            warn!(
                auction_id = %auction.id,
                market_price = %market_price,
                auction_price = %auction.amount_per_collateral,
                "Degenerate price, skipping valuation"
            );
            return auction;
        }

        let market_value =
            (&auction.amount_per_collateral - &market_price) / &market_price;
        let profit = transaction_profit(
            &auction.amount_collateral,
            &auction.amount_per_collateral,
            &auction.debt_dai,
            &market_price,
        );

        auction.market_price_per_collateral = Some(market_price);
        auction.market_value = Some(market_value);
        auction.transaction_profit = Some(profit);
        auction
    }

    /// Valuate a whole batch concurrently. Items are never dropped; a
    /// failed quote leaves that item's market fields unset.
    pub async fn valuate_all(&self, network: &str, auctions: Vec<Auction>) -> Vec<Auction> {
        let valuated = join_all(
            auctions
                .into_iter()
                .map(|auction| self.valuate(network, auction)),
        )
        .await;

        info!(
            total = valuated.len(),
            valuated = valuated
                .iter()
                .filter(|a| a.market_value.is_some())
                .count(),
            "Market valuation complete"
        );
        valuated
    }
}

/// Expected profit of taking an auction, in debt-token units.
///
/// The protocol settles a bid as the largest fraction of the lot such
/// that the amount owed does not exceed the outstanding debt:
/// - while the lot's market value does not cover the debt, the bidder
///   takes the whole lot and pays the auction price for it;
/// - once it does, only `debt / auction price` units transfer and the
///   bidder pays exactly the debt.
///
/// A negative result is a loss and is reported as such, not hidden.
pub fn transaction_profit(
    lot: &BigDecimal,
    auction_unit_price: &BigDecimal,
    debt: &BigDecimal,
    market_unit_price: &BigDecimal,
) -> BigDecimal {
    let total_market_value = lot * market_unit_price;
    if total_market_value <= *debt {
        return total_market_value - (lot * auction_unit_price);
    }
    let purchasable = debt / auction_unit_price;
    (&purchasable * market_unit_price) - debt
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
