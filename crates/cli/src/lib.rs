//! carprice CLI
//!
//! Command-line front-end for the used-car price prediction service.

pub mod client;
pub mod commands;
pub mod output;
