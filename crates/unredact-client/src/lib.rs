//! Client side of the prediction service
//!
//! The rest of the workspace only depends on [`UnredactionClient`]; the HTTP
//! implementation is one of possibly many.

pub mod client;
pub mod error;
pub mod http;
pub mod protocol;

pub use client::UnredactionClient;
pub use error::{ClientError, Result};
pub use http::HttpUnredactionClient;
pub use protocol::{UnredactionRequest, UnredactionResponse};
