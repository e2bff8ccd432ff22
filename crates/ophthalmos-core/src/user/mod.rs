//! User domain module.
//!
//! This module contains the account model and the account service trait.
//!
//! # Module Structure
//!
//! - `model`: User identifier and account record
//! - `service`: Account creation trait
//! - `store`: Local memory of the account in use
//!
//! # Usage
//!
//! ```ignore
//! use ophthalmos_core::user::{AccountService, AccountStore, UserAccount, UserId};
//! ```

mod model;
mod service;
mod store;

// Re-export public API
pub use model::{UserAccount, UserId};
pub use service::AccountService;
pub use store::AccountStore;
