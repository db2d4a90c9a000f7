//! Persistence layer: durable key/value store and the typed adapter above it.
//!
//! # Responsibility
//! - Define the key/value contract the rest of core persists through.
//! - Isolate SQLite and JSON encoding details from service orchestration.
//!
//! # Invariants
//! - Services reach storage only through `StorageAdapter`.
//! - Malformed persisted data is recovered, transport errors are returned.

pub mod kv_store;
pub mod storage_adapter;
