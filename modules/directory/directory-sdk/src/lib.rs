//! Directory SDK
//!
//! This crate provides the public API for the `directory` module:
//!
//! - [`DirectoryClientV1`] - Public API trait for consumers
//! - [`PermissionRecord`], [`MembershipRecord`], [`ContactRecord`] - Stored records
//! - [`PermissionQuery`], [`MembershipQuery`], [`ContactQuery`] - Read query shapes
//! - [`DirectoryError`] - Error types
//!
//! ## Usage
//!
//! ```ignore
//! use directory_sdk::{DirectoryClientV1, PermissionQuery};
//!
//! let groups = client
//!     .list_permissions(PermissionQuery::ByServiceAndAction {
//!         service: "deploy".to_owned(),
//!         action: "read".to_owned(),
//!     })
//!     .await?;
//! ```

pub mod api;
pub mod error;
pub mod models;

// Re-export main types at crate root
pub use api::DirectoryClientV1;
pub use error::DirectoryError;
pub use models::{
    ContactQuery, ContactRecord, KEY_SEPARATOR, MembershipQuery, MembershipRecord, NewContact,
    NewMembership, NewPermission, PermissionQuery, PermissionRecord, WILDCARD, service_action_key,
};
