//! Selectura Storefront commerce core.
//!
//! This crate provides the storefront's data layer as a library: a typed,
//! cached client for the remote commerce REST backend, the session cart
//! client, the auth client, and the pure helpers the UI layer renders with.
//! Page rendering itself lives with the UI collaborator, not here.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod auth;
pub mod config;
pub mod woo;
