//! rusty-links/crates/rl-core/src/lib.rs
//!
//! The central domain logic and interface definitions for Rusty-Links.

pub mod error;
pub mod models;
pub mod ranking;
pub mod service;
pub mod traits;

// Re-exporting for easier access in other crates
pub use error::*;
pub use models::*;
pub use service::*;
pub use traits::*;
