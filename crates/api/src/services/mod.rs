//! Application services used by route handlers.

pub mod activity;
pub mod auth;
pub mod storage;
