//! Collateral liquidation auction keeper core.
//!
//! Library crate exposing all modules for use by integration tests
//! and outer harnesses (transaction transports, dashboards, CLIs).

pub mod auth;
pub mod callee;
pub mod chain;
pub mod collaterals;
pub mod config;
pub mod engine;
pub mod history;
pub mod pricing;
pub mod tracker;
pub mod types;
pub mod units;
