//! Command line front end for the SuiSui step-pattern engine.
//!
//! Exposes configuration, logging, and command dispatch so the `suisui`
//! binary stays a thin entrypoint.

pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
mod output;
