//! J TOK - short username availability scanner
//!
//! Enumerates every short alphanumeric name, probes each public profile page
//! and reports the names that look unregistered.

pub mod error;
pub mod report;
pub mod scan;
pub mod types;

// Re-export commonly used types
pub use error::{JTokError, Result};
pub use types::{ScanConfig, ScanSummary};

// Re-export main functionality
pub use scan::{Charset, HttpProber, Prober, UsernameSniper};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize the library
pub fn init() -> Result<()> {
    // Load .env file if it exists
    dotenv::dotenv().ok();
    Ok(())
}
