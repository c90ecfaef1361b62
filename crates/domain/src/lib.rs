//! Domain layer for the Campus Portal backend.
//!
//! This crate contains:
//! - Domain models (profiles, departments, queries, complaints, menus, ...)
//! - The role/resource access tables
//! - Request and response payload types

pub mod access;
pub mod models;
