//! Slidepress API Library
//!
//! HTTP handlers, application state, and setup for the upload/convert service.

mod api_doc;
pub mod constants;
mod handlers;
pub mod services;
pub mod setup;
mod utils;

pub mod error;
pub mod state;

pub use error::HttpAppError;
pub use slidepress_infra::ErrorResponse;
