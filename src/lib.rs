//! Turn a pasted "copy as cURL" command into a request descriptor.
//!
//! ```
//! use curlpaste::parse_curl_command;
//!
//! let parsed = parse_curl_command("curl 'https://example.com' -H 'Accept: */*' -d 'a=1'");
//! assert_eq!(parsed.url, "https://example.com");
//! assert_eq!(parsed.method, "POST");
//! assert_eq!(parsed.body.as_deref(), Some("a=1"));
//! ```

pub mod curl;
pub mod error;
pub mod redact;
pub mod request;
#[cfg(test)]
mod test_util;

pub use curl::{ParsedCurlCommand, normalize_curl_text, parse_curl_command};
pub use error::{CurlError, Result};
pub use request::CurlRequest;
