//! Utility functions shared by the fetch pipeline.
//!
//! - **URL validation**: parse request targets and reject schemes that cannot
//!   be fetched over HTTP
//!
//! # Examples
//!
//! ```
//! use newsfeed::util::{build_request_target, validate_url};
//!
//! let url = validate_url("https://content.guardianapis.com/search").unwrap();
//! assert_eq!(url.host_str(), Some("content.guardianapis.com"));
//!
//! // Malformed input is logged and yields no target
//! assert!(build_request_target("not a url").is_none());
//! ```

mod url_validator;

pub use url_validator::{build_request_target, validate_url, UrlValidationError};
