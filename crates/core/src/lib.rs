//! Domain types and pure logic for the STS Clearance Hub client.
//!
//! This crate has no I/O and no internal dependencies: the client, session,
//! and console crates all build on the types, validation rules, and access
//! tables defined here.

pub mod activity;
pub mod countries;
pub mod document;
pub mod error;
pub mod message;
pub mod role;
pub mod room;
pub mod session;
pub mod summary;
pub mod tabs;
pub mod types;
pub mod vessel;
pub mod wizard;
