//! Özlasteksan Core - Shared types library.
//!
//! This crate provides common types used across all Özlasteksan components:
//! - `site` - Public marketing/catalog site
//! - `client` - Offline cache worker and client-side list managers
//!
//! # Architecture
//!
//! The core crate contains only types and traits - no I/O, no HTTP clients.
//! This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, emails and phone
//!   numbers, plus the catalog `Product` record

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
