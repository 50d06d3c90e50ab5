//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Password hashing (Argon2id, salted, constant-time verification)
//! - Signed, time-bound bearer tokens (HS256 JWT)

pub mod password;
pub mod token;
