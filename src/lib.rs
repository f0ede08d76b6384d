// Library surface for integration tests and reuse.
// Keep this lean to avoid coupling to bin-only types in main.rs.
pub mod config;
pub mod deck;
pub mod history;
pub mod session;
pub mod study;
