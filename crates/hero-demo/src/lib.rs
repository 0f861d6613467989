#![forbid(unsafe_code)]

//! Terminal playback of the hero confirmation dialog.
//!
//! The demo runs one scripted lifecycle (tap the trigger, wait for the
//! sheet, press a button, wait for the overlay to unmount) on a simulated
//! clock and either prints each frame as ANSI half-block cells or runs
//! headless and only reports the outcome.

pub mod cli;
pub mod error;
pub mod logging;
pub mod presenter;
pub mod script;

pub use cli::{Choice, Cli, run, run_from_env};
pub use error::{DemoError, Result};
pub use script::RunSummary;
