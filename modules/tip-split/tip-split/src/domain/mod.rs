//! Domain layer for the tip-split module
//!
//! Contains the calculation engine and the session that drives it.

pub mod engine;
pub mod error;
pub mod form;
pub mod session;
