//! Auction pipeline: discovery, enrichment, valuation, bidding.

pub mod discovery;
pub mod enricher;
pub mod executor;
pub mod valuator;

use std::sync::Arc;

use anyhow::Result;
use tracing::info;

use crate::chain::ChainClient;
use crate::pricing::PriceSource;
use crate::types::Auction;
use discovery::AuctionDiscovery;
use enricher::AuctionEnricher;
use valuator::MarketValuator;

/// The three-stage auction pipeline.
///
/// Each stage fans out over the whole batch, awaits all items, and
/// concatenates the results before the next stage begins. Per-item
/// failures degrade the item (or exclude it), never the batch.
pub struct AuctionPipeline {
    discovery: AuctionDiscovery,
    enricher: AuctionEnricher,
    valuator: MarketValuator,
}

impl AuctionPipeline {
    pub fn new(chain: Arc<dyn ChainClient>, prices: Arc<dyn PriceSource>) -> Self {
        Self {
            discovery: AuctionDiscovery::new(Arc::clone(&chain)),
            enricher: AuctionEnricher::new(chain),
            valuator: MarketValuator::new(prices),
        }
    }

    /// Build the pipeline from already-constructed stages. Useful when a
    /// stage needs a non-default collateral list.
    pub fn from_stages(
        discovery: AuctionDiscovery,
        enricher: AuctionEnricher,
        valuator: MarketValuator,
    ) -> Self {
        Self {
            discovery,
            enricher,
            valuator,
        }
    }

    /// Discover, enrich, and valuate every auction on the network.
    ///
    /// This is the main entry point called by an outer scan cycle.
    pub async fn fetch_all_auctions(&self, network: &str) -> Result<Vec<Auction>> {
        let initial = self.discovery.list_auctions(network).await;
        let enriched = self.enricher.enrich_all(network, initial).await;
        let valuated = self.valuator.valuate_all(network, enriched).await;

        info!(
            total = valuated.len(),
            profitable = valuated
                .iter()
                .filter(|a| a.expected_profit().is_some())
                .count(),
            "Auction pipeline complete"
        );

        Ok(valuated)
    }
}
