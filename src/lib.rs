//! Core library for the roster-tools command line application.
//!
//! Two roster snapshots are read from a workbook ([`io::excel_read`]),
//! compared by email ([`diff`]), enriched with account fields and temporary
//! credentials ([`enrich`]), projected into output tables ([`format`]), and
//! written as CSV ([`io::csv_write`]). [`sync`] strings the stages together
//! and [`provision`] hands the joined table to an external program.

pub mod config;
pub mod diff;
pub mod enrich;
pub mod error;
pub mod format;
pub mod io;
pub mod model;
pub mod provision;
pub mod sync;

pub use config::{NamePolicy, RunConfig};
pub use error::{Result, ToolError};
