//! HTTP handlers

pub mod convert;
pub mod health;
pub mod root;
pub mod upload;
