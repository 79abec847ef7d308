//! Commerce Routes Core - Shared types library.
//!
//! This crate provides the request-level types used by the custom admin and
//! store routes served by `commerce-routes-server`:
//! - typed values for every validated input (`Email`, `Rating`, `FeaturedLimit`, `AdminAction`)
//! - string-backed platform identifiers and generated ids
//! - the pure request validators and their `ValidationError`
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no database
//! access, no HTTP. Handlers call into it before touching any service.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for ids, emails, ratings, limits and statuses
//! - [`validation`] - Field validators producing typed values or a [`ValidationError`]

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;
pub mod validation;

pub use types::*;
pub use validation::ValidationError;
