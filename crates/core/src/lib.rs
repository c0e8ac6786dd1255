//! Newsdesk Core - Shared types library.
//!
//! This crate provides the domain types used across the Newsdesk crates:
//! - `admin` - The news administration panel
//! - `cli` - Operator tooling for admin credentials
//!
//! # Architecture
//!
//! The core crate contains only types and pure validation - no I/O, no
//! database access, no HTTP. This keeps it lightweight and easy to test.
//!
//! # Modules
//!
//! - [`types`] - Typed IDs, news drafts and validation, stored credentials,
//!   search filters and pagination

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
