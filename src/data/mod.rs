//! Data fetching and storage
//!
//! Handles:
//! - Yahoo Finance API for raw option chains
//! - Local caching and JSON chain snapshots

pub mod cache;
pub mod yahoo;

pub use cache::*;
pub use yahoo::*;
