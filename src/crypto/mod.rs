//! Cryptographic functions for Tally
//!
//! Provides salted SHA-256 password digests for the credential store and a
//! zeroizing wrapper for passwords held in memory.

pub mod hasher;
pub mod secure_memory;

pub use hasher::{hash_password, verify_password, SaltedDigest};
pub use secure_memory::SecureString;
