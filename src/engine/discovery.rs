//! Auction discovery.
//!
//! Fans out across all registered collateral types, lists each type's
//! sale records, and attaches the type's static price-decay parameters.
//! Activity is pre-filtered from the listing alone (`active` flag and
//! expiry) so that the expensive per-auction status read in the next
//! stage is only paid for auctions that can still be won.

use anyhow::Result;
use chrono::{DateTime, Utc};
use futures::future::join_all;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::chain::{ChainClient, RawSaleRecord};
use crate::collaterals::{CollateralConfig, COLLATERALS};
use crate::types::{AuctionInitialInfo, KeeperError};
use crate::units::{self, Scale};

pub struct AuctionDiscovery {
    chain: Arc<dyn ChainClient>,
    collaterals: &'static [CollateralConfig],
}

impl AuctionDiscovery {
    /// Create a discovery stage over the full collateral registry.
    pub fn new(chain: Arc<dyn ChainClient>) -> Self {
        Self::with_collaterals(chain, COLLATERALS)
    }

    /// Create a discovery stage over a custom collateral list.
    pub fn with_collaterals(
        chain: Arc<dyn ChainClient>,
        collaterals: &'static [CollateralConfig],
    ) -> Self {
        Self { chain, collaterals }
    }

    /// List every auction across all collateral types.
    ///
    /// One collateral type's failure is logged and excluded; the merged
    /// successes are returned. Degraded completeness is acceptable, total
    /// failure is not.
    pub async fn list_auctions(&self, network: &str) -> Vec<AuctionInitialInfo> {
        let fetches = self
            .collaterals
            .iter()
            .map(|config| self.list_for_type(network, config));
        let groups = join_all(fetches).await;

        let mut auctions = Vec::new();
        let mut failed_types = 0u32;
        for (config, group) in self.collaterals.iter().zip(groups) {
            match group {
                Ok(group) => {
                    if group.is_empty() {
                        debug!(collateral_type = config.ilk, "No auctions listed");
                    }
                    auctions.extend(group);
                }
                Err(e) => {
                    failed_types += 1;
                    warn!(
                        collateral_type = config.ilk,
                        error = %e,
                        "Auction discovery failed, continuing without"
                    );
                }
            }
        }

        info!(
            total = auctions.len(),
            collateral_types = self.collaterals.len(),
            failed_types,
            "Auction discovery complete"
        );

        auctions
    }

    /// List one collateral type's auctions, fetching sale records and
    /// decay parameters concurrently.
    async fn list_for_type(
        &self,
        network: &str,
        config: &CollateralConfig,
    ) -> Result<Vec<AuctionInitialInfo>, KeeperError> {
        let fetch = async {
            let (records, params) = tokio::try_join!(
                self.chain.list_sale_records(network, config.ilk),
                self.chain.read_calc_parameters(network, config.ilk),
            )?;
            let cut = units::to_decimal(&params.cut, Scale::Ray)?;
            let now = Utc::now();
            records
                .into_iter()
                .map(|record| initial_info(record, config.symbol, params.step, &cut, now))
                .collect::<Result<Vec<_>>>()
        };
        fetch.await.map_err(|cause| KeeperError::Discovery {
            collateral_type: config.ilk.to_string(),
            cause,
        })
    }
}

fn initial_info(
    record: RawSaleRecord,
    symbol: &str,
    step: u64,
    cut: &bigdecimal::BigDecimal,
    now: DateTime<Utc>,
) -> Result<AuctionInitialInfo> {
    Ok(AuctionInitialInfo {
        id: format!("{}:{}", record.ilk, record.sale_id),
        auction_id: record.sale_id,
        collateral_symbol: symbol.to_string(),
        vault_owner: record.usr,
        amount_collateral: units::to_decimal(&record.lot, Scale::Wad)?,
        debt_dai: units::to_decimal(&record.tab, Scale::Rad)?,
        till: record.end_date,
        start: record.created,
        is_active: record.active && record.end_date > now,
        is_finished: false,
        is_restarting: false,
        step,
        cut: cut.clone(),
        collateral_type: record.ilk,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
