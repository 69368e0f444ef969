//! Static collateral registry.
//!
//! Maps each supported collateral type identifier ("ilk") to its display
//! symbol and the name of the auction house ("clipper") contract running
//! its liquidations. Loaded once at process start, never mutated.

use crate::types::KeeperError;

/// Immutable registry entry for one collateral type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollateralConfig {
    pub ilk: &'static str,
    pub symbol: &'static str,
}

/// All collateral types the keeper watches.
pub const COLLATERALS: &[CollateralConfig] = &[
    CollateralConfig { ilk: "ETH-A", symbol: "ETH" },
    CollateralConfig { ilk: "ETH-B", symbol: "ETH" },
    CollateralConfig { ilk: "ETH-C", symbol: "ETH" },
    CollateralConfig { ilk: "WSTETH-A", symbol: "WSTETH" },
    CollateralConfig { ilk: "WSTETH-B", symbol: "WSTETH" },
    CollateralConfig { ilk: "WBTC-A", symbol: "WBTC" },
    CollateralConfig { ilk: "WBTC-B", symbol: "WBTC" },
    CollateralConfig { ilk: "WBTC-C", symbol: "WBTC" },
    CollateralConfig { ilk: "LINK-A", symbol: "LINK" },
    CollateralConfig { ilk: "YFI-A", symbol: "YFI" },
    CollateralConfig { ilk: "UNI-A", symbol: "UNI" },
    CollateralConfig { ilk: "MATIC-A", symbol: "MATIC" },
];

/// Look up a collateral type by its ilk.
pub fn by_ilk(ilk: &str) -> Result<&'static CollateralConfig, KeeperError> {
    COLLATERALS
        .iter()
        .find(|c| c.ilk == ilk)
        .ok_or_else(|| KeeperError::UnknownCollateralType(ilk.to_string()))
}

/// Display symbol for a collateral type.
pub fn symbol_of(ilk: &str) -> Result<&'static str, KeeperError> {
    Ok(by_ilk(ilk)?.symbol)
}

/// Contract name of the auction house bound to a collateral type,
/// e.g. `ETH-A` -> `MCD_CLIP_ETH_A`.
pub fn clipper_name(ilk: &str) -> Result<String, KeeperError> {
    let config = by_ilk(ilk)?;
    Ok(format!("MCD_CLIP_{}", config.ilk.replace('-', "_")))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
