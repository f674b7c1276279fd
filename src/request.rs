//! Caller-side validation of a parsed command.
//!
//! Parsing is lenient on purpose; this is where an unusable result (no url, a
//! url that does not parse) is rejected before it is stored as credentials or
//! replayed through the backend bridge.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::debug;
use url::Url;

use crate::curl::{COOKIE_HEADER, ParsedCurlCommand};
use crate::error::{CurlError, Result};
use crate::redact::redact_url;

/// A parsed command whose url is known to be usable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CurlRequest {
    pub url: Url,
    pub method: String,
    pub headers: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
}

impl CurlRequest {
    /// The value of the cookie header, whatever case its name was written in.
    pub fn cookie(&self) -> Option<&str> {
        self.headers
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(COOKIE_HEADER))
            .map(|(_, value)| value.as_str())
    }

    /// `Name: value` lines ready to hand to an HTTP client.
    ///
    /// The cookie header always comes last and is spelled `Cookie`.
    pub fn header_lines(&self) -> Vec<String> {
        let mut lines: Vec<String> = self
            .headers
            .iter()
            .filter(|(name, _)| !name.eq_ignore_ascii_case(COOKIE_HEADER))
            .map(|(name, value)| format!("{name}: {value}"))
            .collect();

        if let Some(cookies) = self.cookie() {
            lines.push(format!("{COOKIE_HEADER}: {cookies}"));
        }
        lines
    }
}

impl TryFrom<ParsedCurlCommand> for CurlRequest {
    type Error = CurlError;

    fn try_from(parsed: ParsedCurlCommand) -> Result<Self> {
        if parsed.url.trim().is_empty() {
            return Err(CurlError::MissingUrl);
        }

        let url = Url::parse(parsed.url.trim()).map_err(|source| CurlError::InvalidUrl {
            url: parsed.url.clone(),
            source,
        })?;
        debug!(url = %redact_url(url.as_str()), "validated curl request");

        Ok(Self {
            url,
            method: parsed.method.to_ascii_uppercase(),
            headers: parsed.headers,
            body: parsed.body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curl::parse_curl_command;
    use crate::test_util::headers;

    #[test]
    fn test_missing_url_is_rejected() {
        let parsed = parse_curl_command("curl");
        let err = CurlRequest::try_from(parsed).unwrap_err();
        assert!(matches!(err, CurlError::MissingUrl), "{err:?}");
    }

    #[test]
    fn test_invalid_url_is_rejected() {
        let parsed = parse_curl_command("curl 'not a url'");
        let err = CurlRequest::try_from(parsed).unwrap_err();
        assert!(matches!(err, CurlError::InvalidUrl { ref url, .. } if url == "not a url"));
        assert!(err.to_string().starts_with("invalid url \"not a url\""));
    }

    #[test]
    fn test_method_is_uppercased() {
        let parsed = ParsedCurlCommand {
            url: "https://example.com".into(),
            method: "patch".into(),
            ..Default::default()
        };
        let request = CurlRequest::try_from(parsed).unwrap();
        assert_eq!(request.method, "PATCH");
        assert_eq!(request.url.host_str(), Some("example.com"));
    }

    #[test]
    fn test_header_lines_put_cookie_last() {
        let request = CurlRequest {
            url: Url::parse("https://example.com").unwrap(),
            method: "GET".into(),
            headers: headers(&[
                ("Accept", "*/*"),
                ("cookie", "a=1; b=2"),
                ("X-Requested-With", "XMLHttpRequest"),
            ]),
            body: None,
        };
        assert_eq!(request.cookie(), Some("a=1; b=2"));
        assert_eq!(
            request.header_lines(),
            vec![
                "Accept: */*".to_string(),
                "X-Requested-With: XMLHttpRequest".to_string(),
                "Cookie: a=1; b=2".to_string(),
            ]
        );
    }

    #[test]
    fn test_request_from_pasted_command() {
        let parsed = parse_curl_command(
            "curl 'https://api.example.com/v1/items' -H 'Accept: application/json' -b 'sid=42' --data-raw '{\"q\":1}'",
        );
        let request = CurlRequest::try_from(parsed).unwrap();
        assert_eq!(request.url.path(), "/v1/items");
        assert_eq!(request.method, "GET");
        assert_eq!(request.body.as_deref(), Some("{\"q\":1}"));
        assert_eq!(
            request.header_lines(),
            vec!["Accept: application/json".to_string(), "Cookie: sid=42".to_string()]
        );
    }
}
