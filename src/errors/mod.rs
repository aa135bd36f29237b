//! Error types and error handling for the front end.
//!
//! This module defines the errors the parser records. It includes:
//!
//! - Error structures with source position information
//! - Specific error variants for each kind of syntax violation
//! - Error names and suggestions used by diagnostics

pub mod errors;
