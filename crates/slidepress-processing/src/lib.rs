//! Slidepress Processing Library
//!
//! Document conversion for Slidepress:
//!
//! - [`DocumentConverter`]: the external converter collaborator
//! - [`LibreOfficeConverter`]: headless LibreOffice implementation
//! - [`ConversionGateway`]: runs a converter against a stored upload and checks the result

pub mod converter;
pub mod gateway;

pub use converter::{DocumentConverter, LibreOfficeConverter};
pub use gateway::{ConversionError, ConversionGateway};
