//! Core types, hashing primitives and error handling

pub mod error;
pub mod hash;
pub mod types;
