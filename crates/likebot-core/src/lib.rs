//! Core domain + event-processing logic for the like-button bot.
//!
//! This crate is intentionally framework-agnostic. Telegram and Redis live
//! behind ports (traits) implemented in adapter crates.

pub mod config;
pub mod dispatch;
pub mod domain;
pub mod errors;
pub mod events;
pub mod logging;
pub mod messaging;
pub mod pool;
pub mod store;

pub use errors::{Error, Result};
