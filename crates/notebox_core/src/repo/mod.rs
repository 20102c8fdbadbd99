//! Repository layer: persisted storage contracts and implementations.
//!
//! # Responsibility
//! - Model local persisted storage as a string key/value store.
//! - Own the serialized note snapshot kept under one key.
//!
//! # Invariants
//! - Writes are full-value overwrites; there are no partial updates.

pub mod kv_repo;
pub mod note_repo;
