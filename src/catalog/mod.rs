//! Project catalog operations.
//!
//! Each module owns one record kind and exposes free functions taking a
//! [`Store`](crate::core::store::Store). Reads borrow a fresh connection; writes
//! run inside one transaction each.

pub mod projects;
pub mod seed;
pub mod skills;
pub mod statuses;
