//! USEEIO REST API adapter.

mod web_api_model;

pub use web_api_model::{WebApiConfig, WebApiModel};
