//! Infrastructure Services
//!
//! - **client**: HTTP API client, token storage and the refreshing session
//! - **config**: Application configuration and its browser override
//! - **media**: Image picking behind a platform trait
//! - **navigation**: Route requests handed to the host router
//!
//! The services are WASM-first, using browser APIs and async traits
//! without Send/Sync bounds.

pub mod client;
pub mod config;
pub mod media;
pub mod navigation;
