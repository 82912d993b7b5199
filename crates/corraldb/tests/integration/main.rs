//! Integration tests for CorralDB.
//!
//! These tests exercise the repository facade end to end against the
//! in-memory reference backend: CRUD, pagination, concurrency, and the
//! disabled gate.

mod common;

mod concurrency;
mod crud;
mod disabled;
mod pagination;
