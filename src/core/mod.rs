//! Storage foundation for the project catalog: configuration, connections,
//! schema, and the shared error type.

pub mod config;
pub mod db;
pub mod error;
pub mod migration;
pub mod output;
pub mod pool;
pub mod schemas;
pub mod store;
pub mod time;
