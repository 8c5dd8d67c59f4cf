//! crcrisk-web: Web front end for the six-gene CRC recurrence risk signature.
//! Provides:
//!   - Expression input form and rendered risk report
//!   - JSON scoring API
//!   - Signature introspection and health endpoints

pub mod error;
pub mod form;
pub mod handlers;
pub mod report;
pub mod router;
pub mod state;
