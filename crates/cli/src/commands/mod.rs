//! CLI Commands

pub mod config;
pub mod form;
pub mod options;
pub mod predict;
pub mod status;
