//! Video Platform Vendor Client
//!
//! Pure HTTP client for the vendor's open video API.
//!
//! # Features
//! - Access token acquisition
//! - Live and playback stream addresses
//! - Device-local recording search (header-scoped, seconds)
//! - Cloud recording search (form body, milliseconds)
//! - Vendor status code lookup

pub mod client;
pub mod codes;
pub mod error;
pub mod service;
pub mod types;

pub use client::PlatformClient;
pub use error::PlatformError;
pub use service::VideoPlatform;
pub use types::*;
