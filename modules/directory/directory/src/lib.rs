//! Directory Module
//!
//! Group permissions with wildcard-aware resolution, user-to-group
//! membership, and per-target contact information, served over REST.
//!
//! ## Architecture
//!
//! ### Contract Layer (`directory-sdk`)
//! - **Location:** `modules/directory/directory-sdk/`
//! - **Contains:** `DirectoryClientV1` trait, record and query models,
//!   `DirectoryError`
//!
//! ### API Layer (`directory::api`)
//! - **Location:** `src/api/rest/`
//! - **Contains:**
//!   - `routes.rs` - `/v1/...` routes and the health probe
//!   - `handlers.rs` - Request handlers per resource and path fallbacks
//!   - `middleware.rs` - Request id, tracing, version header, timeout, body limit, CORS
//!   - `dto.rs` - Request bodies and response envelopes
//!   - `error.rs` - HTTP error mapping (domain errors → `{"error": ...}`)
//! - **Rule:** May import `domain::service` and `domain::error::DomainError`
//!
//! ### Domain Layer (`directory::domain`)
//! - **Location:** `src/domain/`
//! - **Contains:**
//!   - `resolution.rs` - Wildcard matching and precedence merge
//!   - `service/` - Business operations per resource
//!   - `repos.rs` - Store collaborator traits
//!   - `error.rs` - Domain error types
//! - **Rule:** MUST NOT import `api::*` (one-way dependency only)
//!
//! ### Infrastructure Layer (`directory::infra`)
//! - **Location:** `src/infra/storage/`
//! - **Contains:** `SeaORM` entities, repositories and migrations
//! - **Rule:** ALL `SeaORM` query specifics contained here
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

// === PUBLIC API (from SDK) ===
pub use directory_sdk::{
    ContactQuery, ContactRecord, DirectoryClientV1, DirectoryError, MembershipQuery,
    MembershipRecord, NewContact, NewMembership, NewPermission, PermissionQuery, PermissionRecord,
};

// === MODULE DEFINITION ===
pub mod module;
pub use module::DirectoryModule;

// === INTERNAL MODULES ===
// WARNING: These modules are internal implementation details!
// They are exposed only for comprehensive testing and should NOT be used by external consumers.
#[doc(hidden)]
pub mod api;
#[doc(hidden)]
pub mod config;
#[doc(hidden)]
pub mod domain;
#[doc(hidden)]
pub mod infra;

#[cfg(test)]
mod test_support;
