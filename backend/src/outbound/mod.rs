//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **identity**: the managed identity service over HTTP
//! - **persistence**: PostgreSQL-backed repositories using Diesel ORM
//! - **spreadsheet**: the registration webhook
//! - **memory**: in-process stand-ins used when nothing is configured
//!
//! Adapters are thin translators between domain types and wire or storage
//! representations. They contain no business logic.

pub mod identity;
pub mod memory;
pub mod persistence;
pub mod spreadsheet;
