//! Request-level workflows built on the stores and collaborators.

pub mod conversion;
pub mod delivery;

pub use conversion::convert_upload;
pub use delivery::{DeliveryResolver, RequestOrigin};
