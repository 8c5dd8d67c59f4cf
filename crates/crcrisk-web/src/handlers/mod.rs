//! HTTP handlers for all web routes.

pub mod api;
pub mod predict;
pub mod system;
