//! Historical take-event inspection.
//!
//! Lists past `take` calls against the auction houses and decodes their
//! parameters into display-ready rows, e.g. for auditing which callees
//! won which auctions at what price. Malformed calldata is a per-record
//! condition: the row is kept with its decode error attached and the
//! siblings are unaffected.

use anyhow::Result;
use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use futures::future::join_all;
use serde::Serialize;
use std::sync::Arc;
use tracing::{info, warn};

use crate::callee::CalleeResolver;
use crate::chain::{ChainClient, RawTakeEvent};
use crate::collaterals::{self, CollateralConfig, COLLATERALS};
use crate::types::KeeperError;
use crate::units::{self, Scale};

/// One historical bid, decoded.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TakeEvent {
    pub tx_hash: String,
    pub from: String,
    pub block_number: Option<u64>,
    pub block_date: Option<DateTime<Utc>>,
    pub collateral_type: String,
    pub auction_id: Option<u64>,
    /// Collateral amount requested, in whole collateral units.
    pub taken_amount: Option<BigDecimal>,
    /// Highest unit price the bidder accepted, in debt-token units.
    pub max_acceptable_price: Option<BigDecimal>,
    pub callee_or_wallet: Option<String>,
    pub callee_data: Option<String>,
    /// Name of the callee if it is a known flash-swap contract.
    pub callee_name: Option<String>,
    /// Decode failure for this record, if any.
    pub error: Option<String>,
}

pub struct TakeEventScanner {
    chain: Arc<dyn ChainClient>,
    callees: Arc<dyn CalleeResolver>,
    collaterals: &'static [CollateralConfig],
}

impl TakeEventScanner {
    pub fn new(chain: Arc<dyn ChainClient>, callees: Arc<dyn CalleeResolver>) -> Self {
        Self::with_collaterals(chain, callees, COLLATERALS)
    }

    pub fn with_collaterals(
        chain: Arc<dyn ChainClient>,
        callees: Arc<dyn CalleeResolver>,
        collaterals: &'static [CollateralConfig],
    ) -> Self {
        Self {
            chain,
            callees,
            collaterals,
        }
    }

    /// All historical take events for one collateral type.
    pub async fn fetch_take_events(
        &self,
        network: &str,
        collateral_type: &str,
    ) -> Result<Vec<TakeEvent>> {
        collaterals::by_ilk(collateral_type)?;
        let raws = self.chain.list_take_events(network, collateral_type).await?;
        let rows = raws
            .into_iter()
            .map(|raw| self.row(network, collateral_type, raw))
            .collect::<Vec<_>>();
        info!(collateral_type, rows = rows.len(), "Take events fetched");
        Ok(rows)
    }

    /// Take events across all collateral types, one type's failure
    /// isolated like in discovery.
    pub async fn fetch_all_take_events(&self, network: &str) -> Vec<TakeEvent> {
        let fetches = self
            .collaterals
            .iter()
            .map(|config| self.fetch_take_events(network, config.ilk));
        let groups = join_all(fetches).await;

        let mut rows = Vec::new();
        for (config, group) in self.collaterals.iter().zip(groups) {
            match group {
                Ok(group) => rows.extend(group),
                Err(e) => {
                    warn!(
                        collateral_type = config.ilk,
                        error = %e,
                        "Take event scan failed, continuing without"
                    );
                }
            }
        }
        rows
    }

    fn row(&self, network: &str, collateral_type: &str, raw: RawTakeEvent) -> TakeEvent {
        let mut row = TakeEvent {
            tx_hash: raw.tx_hash.clone(),
            from: raw.from,
            block_number: raw.block_number,
            block_date: raw.block_date,
            collateral_type: collateral_type.to_string(),
            auction_id: None,
            taken_amount: None,
            max_acceptable_price: None,
            callee_or_wallet: None,
            callee_data: None,
            callee_name: None,
            error: None,
        };

        let decoded = self
            .chain
            .decode_take_calldata(&raw.input)
            .and_then(|params| {
                let taken = units::to_decimal(&params.taken_amount, Scale::Wad)?;
                let max_price = units::to_decimal(&params.max_acceptable_price, Scale::Ray)?;
                Ok((params, taken, max_price))
            });

        match decoded {
            Ok((params, taken, max_price)) => {
                row.auction_id = Some(params.auction_id);
                row.taken_amount = Some(taken);
                row.max_acceptable_price = Some(max_price);
                row.callee_name = self.callees.callee_name(network, &params.callee_or_wallet);
                row.callee_or_wallet = Some(params.callee_or_wallet);
                row.callee_data = Some(params.callee_data);
            }
            Err(e) => {
                let err = KeeperError::Decode {
                    tx_hash: raw.tx_hash,
                    reason: e.to_string(),
                };
                warn!(error = %err, "Keeping record with decode error");
                row.error = Some(e.to_string());
            }
        }
        row
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
