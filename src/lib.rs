//! Capital Gains - tax owed on a sequence of buy/sell operations
//!
//! This library provides the position/tax state machine (weighted average
//! cost, tax-free threshold, loss carryforward) plus the JSON input decoding,
//! command dispatch and configuration used by the command-line tool.

pub mod commands;
pub mod config;
pub mod dispatcher;
pub mod error;
pub mod importers;
pub mod tax;
pub mod utils;
