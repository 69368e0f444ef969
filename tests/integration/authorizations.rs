//! Authorization and allowance flows against the simulated chain.

use bigdecimal::BigDecimal;
use std::str::FromStr;
use std::sync::Arc;

use keeper::auth::AuthorizationCache;
use keeper::types::TransactionStatus;

use crate::mock_chain::{capturing_notifier, SimulatedChain};

const WALLET: &str = "0x00000000000000000000000000000000000000a1";

#[tokio::test]
async fn test_wallet_authorization_round_trip() {
    let chain = Arc::new(SimulatedChain::new(WALLET));
    let cache = AuthorizationCache::new(chain.clone());

    // Fresh wallet has no permission; the second check hits the cache.
    assert!(!cache
        .wallet_authorization_status("mainnet", WALLET)
        .await
        .unwrap());
    assert!(!cache
        .wallet_authorization_status("mainnet", WALLET)
        .await
        .unwrap());
    assert_eq!(chain.permission_reads().len(), 1);

    let (notifier, statuses) = capturing_notifier();
    cache
        .authorize_wallet("mainnet", WALLET, false, Some(notifier))
        .await
        .unwrap();
    assert_eq!(statuses.lock().clone(), vec![TransactionStatus::Submitted]);

    // The authorization evicted the cached status, so this read goes back
    // to the chain and observes the new grant.
    assert!(cache
        .wallet_authorization_status("mainnet", WALLET)
        .await
        .unwrap());
    assert_eq!(chain.permission_reads().len(), 2);
}

#[tokio::test]
async fn test_collateral_grants_are_cached_independently() {
    let chain = Arc::new(SimulatedChain::new(WALLET));
    let cache = AuthorizationCache::new(chain.clone());

    cache
        .collateral_authorization_status("mainnet", "ETH-A", WALLET)
        .await
        .unwrap();
    cache
        .collateral_authorization_status("mainnet", "WBTC-A", WALLET)
        .await
        .unwrap();
    assert_eq!(chain.permission_reads().len(), 2);

    cache
        .authorize_collateral("mainnet", WALLET, "ETH-A", false, None)
        .await
        .unwrap();

    // ETH-A re-fetches and sees the grant; WBTC-A stays cached as false.
    assert!(cache
        .collateral_authorization_status("mainnet", "ETH-A", WALLET)
        .await
        .unwrap());
    assert!(!cache
        .collateral_authorization_status("mainnet", "WBTC-A", WALLET)
        .await
        .unwrap());
    assert_eq!(chain.permission_reads().len(), 3);

    // The grantees resolved through the per-type clipper names.
    let reads = chain.permission_reads();
    assert!(reads.iter().any(|(_, g)| g == "0xaddr-MCD_CLIP_ETH_A"));
    assert!(reads.iter().any(|(_, g)| g == "0xaddr-MCD_CLIP_WBTC_A"));
}

#[tokio::test]
async fn test_revoking_surplus_permission_clears_the_grant() {
    let chain = Arc::new(SimulatedChain::new(WALLET));
    let cache = AuthorizationCache::new(chain.clone());

    cache
        .authorize_surplus("mainnet", WALLET, false, None)
        .await
        .unwrap();
    assert!(cache
        .surplus_authorization_status("mainnet", WALLET)
        .await
        .unwrap());

    cache
        .authorize_surplus("mainnet", WALLET, true, None)
        .await
        .unwrap();
    assert!(!cache
        .surplus_authorization_status("mainnet", WALLET)
        .await
        .unwrap());
}

#[tokio::test]
async fn test_dai_allowance_set_and_fetch() {
    let chain = Arc::new(SimulatedChain::new(WALLET));
    let cache = AuthorizationCache::new(chain.clone());

    let amount = BigDecimal::from_str("2.5").unwrap();
    cache
        .set_allowance_dai("mainnet", WALLET, Some(&amount), None)
        .await
        .unwrap();

    assert_eq!(
        chain.allowance_of("MCD_DAI", WALLET, "0xaddr-MCD_JOIN_DAI"),
        Some("2500000000000000000".to_string())
    );
    let fetched = cache.fetch_allowance_dai("mainnet", WALLET).await.unwrap();
    assert_eq!(fetched, amount);
}

#[tokio::test]
async fn test_unlimited_mkr_allowance() {
    let chain = Arc::new(SimulatedChain::new(WALLET));
    let cache = AuthorizationCache::new(chain.clone());

    cache
        .set_allowance_mkr("mainnet", WALLET, None, None)
        .await
        .unwrap();

    let raw = chain
        .allowance_of("MCD_GOV", WALLET, "0xaddr-MCD_FLAP")
        .unwrap();
    assert_eq!(
        raw,
        "115792089237316195423570985008687907853269984665640564039457584007913129639935"
    );

    // The fetched figure still converts cleanly at the token's scale.
    let fetched = cache.fetch_allowance_mkr("mainnet", WALLET).await.unwrap();
    assert!(fetched > BigDecimal::from(10u64.pow(18)));
}
