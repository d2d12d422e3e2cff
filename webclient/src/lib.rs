// exported modules
pub mod config;
pub mod error;
pub mod files;
pub mod model;

// client impls
pub mod client;

// re-exports
pub use client::ApiClient;
pub use config::*;
pub use error::*;
pub use files::SolutionFile;
pub use model::*;

pub use reqwest::{Response, StatusCode, Url};

// internal modules
mod util;
