//! Client-side utilities for provisioning lending reserves.
//!
//! Includes configuration and program-id caching, token context helpers, PDA derivations, and
//! transaction submission.

pub mod config;
pub mod context;
pub mod logs;
pub mod pda;
pub mod provision;
pub mod transactions;

pub use logs::LogColor;
