//! smartcap — capital allocation engine for Vietnamese equities.
//!
//! Hexagonal architecture: scoring and allocation logic in [`domain`], port
//! traits in [`ports`], concrete market-data, config and report
//! implementations in [`adapters`].

pub mod domain;
pub mod ports;
pub mod adapters;
pub mod cli;
