//! Shared utilities and common types for the Campus Portal backend.
//!
//! This crate provides common functionality used across all other crates:
//! - Cryptographic utilities (token hashing, signed download URLs)
//! - Password hashing with Argon2id
//! - JWT generation and validation
//! - Pagination parameters
//! - Common validation logic

pub mod crypto;
pub mod jwt;
pub mod pagination;
pub mod password;
pub mod validation;
