//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `ModelReader` - Port for reading model metadata, matrices and results

mod model_reader;

pub use model_reader::{ModelError, ModelReader};
