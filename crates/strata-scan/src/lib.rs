//! Scanners for strata: the compiled-unit walker and the UI-document
//! scanner, plus input collection for the CLI.
//!
//! - [`unit`] — the `.scu` compiled-unit format (model, reader, writer) and
//!   the reference scanner with debug-line resolution
//! - [`ui`] — UI-description document scanning (tag presence only)
//! - [`walker`] — project input collection

pub mod ui;
pub mod unit;
pub mod walker;

pub use unit::UnitError;
