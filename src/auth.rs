//! Authorization and allowance management.
//!
//! Before a wallet can bid it must hold protocol-level permissions: a
//! wallet-level grant to the debt-token join adapter, a per-collateral
//! grant to that type's auction house, and (for surplus auctions) a grant
//! to the surplus auction house. Status reads are memoized per
//! `(network, wallet, grantee)`; issuing an authorization evicts exactly
//! that key, so the next read reflects the pending change while cached
//! entries for other wallets and collateral types stay valid and are not
//! re-fetched.

use anyhow::Result;
use bigdecimal::BigDecimal;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info};

use crate::chain::{ChainClient, FLAPPER, JOIN_DAI, TOKEN_DAI, TOKEN_GOV};
use crate::collaterals;
use crate::types::{Notifier, TxHandle};
use crate::units::{self, Scale};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct StatusKey {
    network: String,
    wallet: String,
    grantee: String,
}

impl StatusKey {
    fn new(network: &str, wallet: &str, grantee: &str) -> Self {
        Self {
            network: network.to_string(),
            wallet: wallet.to_string(),
            grantee: grantee.to_string(),
        }
    }
}

pub struct AuthorizationCache {
    chain: Arc<dyn ChainClient>,
    statuses: Mutex<HashMap<StatusKey, bool>>,
}

impl AuthorizationCache {
    pub fn new(chain: Arc<dyn ChainClient>) -> Self {
        Self {
            chain,
            statuses: Mutex::new(HashMap::new()),
        }
    }

    // -- Status checks ----------------------------------------------------

    /// Whether the wallet authorized the debt-token join adapter. Cached.
    pub async fn wallet_authorization_status(&self, network: &str, wallet: &str) -> Result<bool> {
        self.status(network, wallet, JOIN_DAI).await
    }

    /// Whether the wallet authorized a collateral type's auction house.
    /// Cached per collateral type.
    pub async fn collateral_authorization_status(
        &self,
        network: &str,
        collateral_type: &str,
        wallet: &str,
    ) -> Result<bool> {
        let clipper = collaterals::clipper_name(collateral_type)?;
        self.status(network, wallet, &clipper).await
    }

    /// Whether the wallet authorized the surplus auction house. Cached.
    pub async fn surplus_authorization_status(&self, network: &str, wallet: &str) -> Result<bool> {
        self.status(network, wallet, FLAPPER).await
    }

    async fn status(&self, network: &str, wallet: &str, grantee_name: &str) -> Result<bool> {
        let key = StatusKey::new(network, wallet, grantee_name);
        if let Some(&cached) = self.statuses.lock().get(&key) {
            debug!(wallet, grantee = grantee_name, "Authorization status cache hit");
            return Ok(cached);
        }

        let grantee = self.chain.contract_address(network, grantee_name).await?;
        let status = self.chain.read_permission(network, wallet, &grantee).await?;
        self.statuses.lock().insert(key, status);
        Ok(status)
    }

    fn evict(&self, network: &str, wallet: &str, grantee_name: &str) {
        self.statuses
            .lock()
            .remove(&StatusKey::new(network, wallet, grantee_name));
    }

    // -- Authorization mutations ------------------------------------------

    /// Grant (or revoke) the wallet-level permission. Evicts the wallet's
    /// cached status so the next read re-fetches.
    pub async fn authorize_wallet(
        &self,
        network: &str,
        wallet: &str,
        revoke: bool,
        notifier: Option<Notifier>,
    ) -> Result<TxHandle> {
        self.authorize(network, wallet, JOIN_DAI, revoke, notifier)
            .await
    }

    /// Grant (or revoke) the permission for one collateral type's auction
    /// house. Evicts that type's cached status only.
    pub async fn authorize_collateral(
        &self,
        network: &str,
        wallet: &str,
        collateral_type: &str,
        revoke: bool,
        notifier: Option<Notifier>,
    ) -> Result<TxHandle> {
        let clipper = collaterals::clipper_name(collateral_type)?;
        self.authorize(network, wallet, &clipper, revoke, notifier)
            .await
    }

    /// Grant (or revoke) the surplus-auction permission.
    pub async fn authorize_surplus(
        &self,
        network: &str,
        wallet: &str,
        revoke: bool,
        notifier: Option<Notifier>,
    ) -> Result<TxHandle> {
        self.authorize(network, wallet, FLAPPER, revoke, notifier)
            .await
    }

    async fn authorize(
        &self,
        network: &str,
        wallet: &str,
        grantee_name: &str,
        revoke: bool,
        notifier: Option<Notifier>,
    ) -> Result<TxHandle> {
        let grantee = self.chain.contract_address(network, grantee_name).await?;
        let handle = self
            .chain
            .set_permission(network, &grantee, revoke, notifier)
            .await?;
        self.evict(network, wallet, grantee_name);
        info!(wallet, grantee = grantee_name, revoke, "Authorization submitted");
        Ok(handle)
    }

    // -- Allowances --------------------------------------------------------

    /// Approve the debt-token join adapter to spend the wallet's debt
    /// tokens. `None` means effectively unlimited; a given amount is
    /// WAD-converted and truncated to an integer string.
    pub async fn set_allowance_dai(
        &self,
        network: &str,
        wallet: &str,
        amount: Option<&BigDecimal>,
        notifier: Option<Notifier>,
    ) -> Result<TxHandle> {
        let spender = self.chain.contract_address(network, JOIN_DAI).await?;
        self.approve(network, wallet, TOKEN_DAI, &spender, amount, notifier)
            .await
    }

    /// Current debt-token allowance granted to the join adapter.
    pub async fn fetch_allowance_dai(&self, network: &str, wallet: &str) -> Result<BigDecimal> {
        let spender = self.chain.contract_address(network, JOIN_DAI).await?;
        let raw = self
            .chain
            .read_allowance(network, TOKEN_DAI, wallet, &spender)
            .await?;
        units::to_decimal(&raw, Scale::Wad)
    }

    /// Approve the surplus auction house to spend the wallet's governance
    /// tokens.
    pub async fn set_allowance_mkr(
        &self,
        network: &str,
        wallet: &str,
        amount: Option<&BigDecimal>,
        notifier: Option<Notifier>,
    ) -> Result<TxHandle> {
        let spender = self.chain.contract_address(network, FLAPPER).await?;
        self.approve(network, wallet, TOKEN_GOV, &spender, amount, notifier)
            .await
    }

    /// Current governance-token allowance granted to the surplus auction
    /// house.
    pub async fn fetch_allowance_mkr(&self, network: &str, wallet: &str) -> Result<BigDecimal> {
        let spender = self.chain.contract_address(network, FLAPPER).await?;
        let raw = self
            .chain
            .read_allowance(network, TOKEN_GOV, wallet, &spender)
            .await?;
        units::to_decimal(&raw, Scale::Wad)
    }

    async fn approve(
        &self,
        network: &str,
        wallet: &str,
        token: &str,
        spender: &str,
        amount: Option<&BigDecimal>,
        notifier: Option<Notifier>,
    ) -> Result<TxHandle> {
        let raw = match amount {
            Some(amount) => units::from_decimal(amount, Scale::Wad),
            None => units::unlimited_allowance(),
        };
        let handle = self
            .chain
            .approve(network, token, spender, &raw, notifier)
            .await?;
        info!(wallet, token, spender, amount = %raw, "Allowance submitted");
        Ok(handle)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
