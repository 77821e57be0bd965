//! Structure classification and health scoring for Sponsored Products bulk sheets.
//!
//! The [`bulksheet`] module turns a bulk-sheet CSV export into a [`audit::LineItemTable`];
//! [`audit::AccountAudit`] classifies every campaign and scores the account.

pub mod audit;
pub mod bulksheet;
pub mod config;
pub mod error;
pub mod telemetry;
