//! End-to-end pipeline tests: discovery through valuation and bidding,
//! against the simulated chain.

use bigdecimal::{BigDecimal, Zero};
use std::str::FromStr;
use std::sync::Arc;

use keeper::chain::RawAuctionStatus;
use keeper::engine::executor::BidExecutor;
use keeper::engine::AuctionPipeline;
use keeper::history::TakeEventScanner;
use keeper::types::TransactionStatus;

use crate::mock_chain::{
    capturing_notifier, RecordingTracker, SimulatedChain, StaticCallees, TablePriceSource,
};

fn dec(s: &str) -> BigDecimal {
    BigDecimal::from_str(s).unwrap()
}

/// Chain with one failing collateral type (ETH-A) and two WBTC-A sales:
/// an active auction priced below market and an expired one.
fn seeded_chain() -> SimulatedChain {
    let chain = SimulatedChain::new("0x00000000000000000000000000000000000000a1");
    chain.fail_type("ETH-A");

    chain.add_sale(SimulatedChain::sample_sale("WBTC-A", 1, true, 3));
    chain.set_status(
        "WBTC-A",
        1,
        RawAuctionStatus {
            price: "1000000000000000000000000000".to_string(), // 1.0 RAY
            lot: "100000000000000000000".to_string(),          // 100 WAD
            tab: "90000000000000000000000000000000000000000000000".to_string(), // 90 RAD
            needs_redo: false,
        },
    );
    chain.add_sale(SimulatedChain::sample_sale("WBTC-A", 2, true, -1));

    chain
}

fn seeded_prices() -> TablePriceSource {
    let prices = TablePriceSource::new();
    prices.set_price("WBTC", dec("1.2"));
    prices
}

#[tokio::test]
async fn test_pipeline_discovers_enriches_and_valuates() {
    let chain = Arc::new(seeded_chain());
    let prices = Arc::new(seeded_prices());
    let pipeline = AuctionPipeline::new(chain, prices);

    let auctions = pipeline.fetch_all_auctions("mainnet").await.unwrap();

    // ETH-A failed and is excluded; both WBTC-A records survive.
    assert_eq!(auctions.len(), 2);
    assert!(auctions.iter().all(|a| a.collateral_type == "WBTC-A"));

    let active = auctions.iter().find(|a| a.auction_id == 1).unwrap();
    assert!(active.is_active);
    assert_eq!(active.amount_per_collateral, dec("1"));
    assert_eq!(active.amount_dai, dec("100"));
    // Debt-capped branch: 90/1.0 * 1.2 - 90 = 18.
    assert_eq!(active.transaction_profit, Some(dec("18")));
    let market_value = active.market_value.clone().unwrap();
    assert!(market_value < BigDecimal::zero(), "Auction is cheaper than market");

    // The expired auction was never enriched or quoted: zeroed and bare.
    let expired = auctions.iter().find(|a| a.auction_id == 2).unwrap();
    assert!(!expired.is_active);
    assert_eq!(expired.amount_per_collateral, BigDecimal::zero());
    assert_eq!(expired.amount_dai, BigDecimal::zero());
    assert!(expired.transaction_profit.is_none());
}

#[tokio::test]
async fn test_price_outage_degrades_only_the_affected_symbol() {
    let chain = Arc::new(seeded_chain());
    let prices = seeded_prices();
    prices.set_price("LINK", dec("7"));
    prices.fail_symbol("WBTC");

    chain.add_sale(SimulatedChain::sample_sale("LINK-A", 5, true, 3));
    chain.set_status(
        "LINK-A",
        5,
        RawAuctionStatus {
            price: "6000000000000000000000000000".to_string(), // 6.0 RAY
            lot: "10000000000000000000".to_string(),           // 10 WAD
            tab: "90000000000000000000000000000000000000000000000".to_string(),
            needs_redo: false,
        },
    );

    let pipeline = AuctionPipeline::new(chain, Arc::new(prices));
    let auctions = pipeline.fetch_all_auctions("mainnet").await.unwrap();

    let wbtc = auctions.iter().find(|a| a.id == "WBTC-A:1").unwrap();
    assert!(wbtc.is_active);
    assert!(wbtc.transaction_profit.is_none(), "Unquoted auction must stay unknown");

    let link = auctions.iter().find(|a| a.id == "LINK-A:5").unwrap();
    // Uncapped branch: 10 * 7 = 70 <= 90 debt, cost 10 * 6 = 60.
    assert_eq!(link.transaction_profit, Some(dec("10")));
}

#[tokio::test]
async fn test_needs_redo_is_restartable_not_biddable() {
    let chain = Arc::new(SimulatedChain::new("0x00000000000000000000000000000000000000a1"));
    chain.add_sale(SimulatedChain::sample_sale("WBTC-A", 9, true, 3));
    chain.set_status(
        "WBTC-A",
        9,
        RawAuctionStatus {
            price: "100000000000000000000000000".to_string(),
            lot: "100000000000000000000".to_string(),
            tab: "90000000000000000000000000000000000000000000000".to_string(),
            needs_redo: true,
        },
    );

    let pipeline = AuctionPipeline::new(chain.clone(), Arc::new(seeded_prices()));
    let auctions = pipeline.fetch_all_auctions("mainnet").await.unwrap();
    let decayed = auctions.iter().find(|a| a.auction_id == 9).unwrap();
    assert!(!decayed.is_active);

    // The caller restarts it instead of bidding.
    let executor = BidExecutor::new(
        chain.clone(),
        Arc::new(StaticCallees),
        Arc::new(RecordingTracker::new()),
    );
    let handle = executor
        .restart("mainnet", "WBTC-A", 9, "0xprofit")
        .await
        .unwrap();
    assert_eq!(handle, "0xredo-WBTC-A-9");
    assert_eq!(chain.redos(), vec![("WBTC-A".to_string(), 9, "0xprofit".to_string())]);
}

#[tokio::test]
async fn test_bid_submits_truncated_parameters_and_tracks() {
    let chain = Arc::new(seeded_chain());
    let prices = Arc::new(seeded_prices());
    let pipeline = AuctionPipeline::new(chain.clone(), prices);
    let auctions = pipeline.fetch_all_auctions("mainnet").await.unwrap();
    let target = auctions.iter().find(|a| a.auction_id == 1).unwrap();

    let tracker = Arc::new(RecordingTracker::new());
    let executor = BidExecutor::new(
        chain.clone(),
        Arc::new(StaticCallees),
        tracker.clone(),
    );

    let (notifier, statuses) = capturing_notifier();
    let tx = executor
        .bid("mainnet", target, "0xprofit", Some(notifier))
        .await
        .unwrap();
    assert_eq!(tx, "tracked-0xtake-WBTC-A-1");

    let takes = chain.takes();
    assert_eq!(takes.len(), 1);
    assert_eq!(takes[0].amount, "100000000000000000000");
    assert_eq!(takes[0].max_price, "1000000000000000000000000000");
    assert_eq!(takes[0].callee, "0xcallee-wbtc");
    assert_eq!(takes[0].callee_data, "0xdata-WBTC-A-0xprofit");

    assert_eq!(tracker.tracked(), vec!["0xtake-WBTC-A-1".to_string()]);
    assert_eq!(
        statuses.lock().clone(),
        vec![TransactionStatus::Submitted, TransactionStatus::Confirmed]
    );
}

#[tokio::test]
async fn test_take_event_scan_decodes_simulated_calldata() {
    use keeper::chain::RawTakeEvent;

    let chain = SimulatedChain::new("0x00000000000000000000000000000000000000a1");
    // Seed one well-formed and one malformed event through the listing.
    let chain = Arc::new(chain);
    {
        // Reuse the simulated calldata layout "id|amt|max|who|data".
        let good = RawTakeEvent {
            tx_hash: "0xgood".to_string(),
            from: "0x00000000000000000000000000000000000000aa".to_string(),
            block_number: Some(17_000_000),
            block_date: None,
            input: "3|1500000000000000000|2000000000000000000000000000|0xcallee-eth|0x".to_string(),
        };
        let bad = RawTakeEvent {
            tx_hash: "0xbad".to_string(),
            from: "0x00000000000000000000000000000000000000ab".to_string(),
            block_number: None,
            block_date: None,
            input: "garbage".to_string(),
        };
        chain.seed_take_events("ETH-A", vec![good, bad]);
    }

    let scanner = TakeEventScanner::new(chain, Arc::new(StaticCallees));
    let rows = scanner.fetch_take_events("mainnet", "ETH-A").await.unwrap();

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].auction_id, Some(3));
    assert_eq!(rows[0].taken_amount, Some(dec("1.5")));
    assert_eq!(rows[0].max_acceptable_price, Some(dec("2")));
    assert_eq!(rows[0].callee_name.as_deref(), Some("SimulatedCallee"));
    assert!(rows[1].error.is_some());
    assert!(rows[1].taken_amount.is_none());
}
