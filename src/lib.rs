// Library root: re-exports all modules so integration tests and external
// consumers can access the crate's public API.

pub mod adapter;
pub mod config;
pub mod export;
pub mod standings;
