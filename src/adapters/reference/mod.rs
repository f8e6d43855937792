//! Reference Source Adapters
//!
//! Implementations of the ReferenceSource port.
//!
//! ## Available Adapters
//!
//! - **FileReferenceSource** - Reads a document from the local filesystem
//! - **HttpReferenceSource** - Fetches a document over HTTP(S)
//!
//! `source_for` picks the adapter from the location string.

mod file_source;
mod format;
mod http_source;

pub use file_source::FileReferenceSource;
pub use format::DocumentFormat;
pub use http_source::HttpReferenceSource;

use reqwest::Client;
use std::time::Duration;

use crate::ports::ReferenceSource;

/// Returns true if `location` should be fetched over HTTP.
pub fn is_remote(location: &str) -> bool {
    let lower = location.trim_start().to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

/// Builds the adapter for one source location.
///
/// `http://` and `https://` locations use the shared HTTP client, anything
/// else is treated as a filesystem path.
pub fn source_for(location: &str, timeout: Duration, client: &Client) -> Box<dyn ReferenceSource> {
    let location = location.trim();
    if is_remote(location) {
        Box::new(HttpReferenceSource::with_client(location, timeout, client.clone()))
    } else {
        Box::new(FileReferenceSource::new(location))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scheme_selects_adapter() {
        assert!(is_remote("https://example.test/data.json"));
        assert!(is_remote("HTTP://example.test/data.json"));
        assert!(!is_remote("data/nova_data.json"));
        assert!(!is_remote("/data/nova_data.json"));
        assert!(!is_remote("httpdocs/data.json"));
    }

    #[test]
    fn source_for_describes_location() {
        let client = Client::new();
        let remote = source_for("https://example.test/a.json", Duration::from_secs(1), &client);
        let local = source_for(" data/a.json ", Duration::from_secs(1), &client);

        assert_eq!(remote.describe(), "https://example.test/a.json");
        assert_eq!(local.describe(), "data/a.json");
    }
}
