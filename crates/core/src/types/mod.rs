//! Core types for the custom routes.
//!
//! This module provides type-safe wrappers for validated request values.

pub mod action;
pub mod email;
pub mod id;
pub mod limit;
pub mod rating;
pub mod status;

pub use action::{AdminAction, UnknownAction};
pub use email::{Email, EmailError};
pub use id::*;
pub use limit::{FeaturedLimit, LimitError};
pub use rating::{Rating, RatingError};
pub use status::*;
