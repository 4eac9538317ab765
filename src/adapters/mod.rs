//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to model data sources:
//! - `webapi` - USEEIO REST API client with response caching
//! - `memory` - In-memory model for offline use and testing

pub mod memory;
pub mod webapi;

pub use memory::InMemoryModel;
pub use webapi::{WebApiConfig, WebApiModel};
