//! Core types, API catalog, and configuration for strata.
//!
//! This crate provides the foundational data structures used across all
//! strata crates:
//! - [`types`] — Reference, violation, and suppression types
//! - [`catalog`] — The versioned [`ApiCatalog`](catalog::ApiCatalog) and its
//!   XML database loader
//! - [`config`] — Configuration loading from `strata.json`

pub mod catalog;
pub mod config;
pub mod types;
