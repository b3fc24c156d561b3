//! Domain layer for the userdeck plugin.
//!
//! Core types with no dependency on Zellij APIs: the [`UserRecord`] model and
//! the error taxonomy.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`user`]: User record model
//!
//! # Examples
//!
//! ```
//! use userdeck::domain::{LoadError, Result};
//!
//! fn fetch_status(code: u16) -> Result<()> {
//!     if (200..300).contains(&code) {
//!         Ok(())
//!     } else {
//!         Err(LoadError::Status(code).into())
//!     }
//! }
//! ```

pub mod error;
pub mod user;

pub use error::{LoadError, Result, UserdeckError};
pub use user::{Address, Company, Geo, UserRecord};
