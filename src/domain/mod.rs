//! Core domain types and logic.

pub mod market;
pub mod timeframe;
pub mod inputs;
pub mod watchlist;
pub mod trend;
pub mod sector;
pub mod signals;
pub mod sentiment;
pub mod flow;
pub mod allocation;
pub mod summary;
pub mod price_band;
pub mod session;
pub mod config_validation;
pub mod error;
