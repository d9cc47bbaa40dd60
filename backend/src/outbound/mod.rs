//! Outbound adapters implementing the domain ports.
//!
//! - **persistence**: PostgreSQL-backed stores using Diesel ORM
//! - **memory**: in-memory stores for tests and dry runs
//!
//! Adapters translate between domain types and storage representations and
//! contain no business logic.

pub mod memory;
pub mod persistence;
