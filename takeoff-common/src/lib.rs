//! # Takeoff Common Library
//!
//! Shared code for the Takeoff service:
//! - Error and result types
//! - Configuration loading and root folder resolution
//! - Password hashing for the credential store
//! - Quantity sheet model and markdown-table parsing

pub mod config;
pub mod error;
pub mod hash;
pub mod sheet;

pub use error::{Error, Result};
pub use sheet::Sheet;
