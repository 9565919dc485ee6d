//! Core types shared by every part of the inventory.
//!
//! - [`InventoryError`] - the domain error enum
//! - [`ErrorContext`] - error plus suggestion/details for CLI display
//! - [`user_friendly_error`] - conversion from any [`anyhow::Error`]

pub mod error;

pub use error::{ErrorContext, InventoryError, user_friendly_error};
