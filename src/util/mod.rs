//! Utility functions for common operations.
//!
//! Currently just feed URL validation, performed locally before any remote
//! call is issued.
//!
//! # Examples
//!
//! ```
//! use folio::util::validate_feed_url;
//!
//! let url = validate_feed_url("https://example.com/feed.xml").unwrap();
//! assert_eq!(url.host_str(), Some("example.com"));
//! ```

mod url;

pub use url::{validate_feed_url, UrlValidationError};
