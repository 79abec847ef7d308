//! Custom admin and store routes for the commerce platform.
//!
//! This crate provides the server as a library so the router can be driven
//! in tests against an in-memory [`services::CommerceServices`].

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod envelope;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
