//! The strata check engine: resolves scanned references against the API
//! catalog, applies persisted suppressions, and assembles the final report.
//!
//! The entry point is [`engine::check`], a pure function over externally
//! supplied inputs. Host wiring (config, file collection, rendering) lives
//! outside this crate.

pub mod engine;
pub mod report;
pub mod resolve;
pub mod suppress;

pub use engine::{check, ResourceInput, UnitInput};
pub use report::ScanReport;
