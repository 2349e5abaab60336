// Vigil Provider Clients
//
// This crate contains the pure HTTP client for the vendor video platform.
// It knows the wire format of every endpoint the coordinator consumes and
// nothing about credentials lifecycles, catalogs or player sessions.
//
// Architecture:
// - vigil-providers: Pure HTTP client + wire types + vendor code table
// - vigil-core: credential manager, recording query engine, session manager
// - vigil: command-line front end

pub mod platform;

// Re-export client types for convenience
pub use platform::{PlatformClient, PlatformError, VideoPlatform};
