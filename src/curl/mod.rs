pub mod curl_parsers;
pub mod normalize;
pub mod parser;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::redact::{redact_header, redact_url};
use curl_parsers::{
    cookie_extract, datas_extract, headers_extract, is_curl, method_extract, url_extract,
};
pub use normalize::normalize_curl_text;

pub const DEFAULT_METHOD: &str = "GET";
pub const COOKIE_HEADER: &str = "Cookie";

/// The request described by a pasted curl command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedCurlCommand {
    /// Target endpoint, empty when none could be found.
    pub url: String,
    /// HTTP verb, never empty.
    pub method: String,
    /// Header name to value. Names keep the case they were written in.
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
    /// Data fragments joined by `\n`; `None` when the command carries none.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
}

impl Default for ParsedCurlCommand {
    fn default() -> Self {
        Self {
            url: String::new(),
            method: DEFAULT_METHOD.into(),
            headers: BTreeMap::new(),
            body: None,
        }
    }
}

impl ParsedCurlCommand {
    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    pub fn has_body(&self) -> bool {
        self.body.is_some()
    }
}

/// Parse a pasted curl command, best effort.
///
/// Never fails: anything that cannot be recognized is left at its default.
/// Text without a `curl` word gives `{url: "", method: "GET", headers: {},
/// body: None}` whatever else it contains. The word must stand on its own, so
/// a path such as `/usr/bin/curl` is not recognized.
pub fn parse_curl_command(input: &str) -> ParsedCurlCommand {
    let normalized = normalize_curl_text(input);
    trace!(
        raw_len = input.len(),
        normalized_len = normalized.len(),
        "normalized curl command"
    );

    if !is_curl(&normalized) {
        debug!("no curl command found");
        return ParsedCurlCommand::default();
    }

    let mut headers = BTreeMap::new();
    for (name, value) in headers_extract(&normalized) {
        trace!(header = name, value = %redact_header(name, value), "header");
        headers.insert(name.to_owned(), value.to_owned());
    }
    if let Some(cookie) = cookie_extract(&normalized).filter(|cookie| !cookie.is_empty()) {
        trace!(value = %redact_header(COOKIE_HEADER, cookie), "cookie");
        headers.insert(COOKIE_HEADER.to_owned(), cookie.to_owned());
    }

    let datas = datas_extract(&normalized);
    let body = (!datas.is_empty()).then(|| datas.join("\n"));

    let parsed = ParsedCurlCommand {
        url: url_extract(&normalized).to_owned(),
        method: method_extract(&normalized).to_owned(),
        headers,
        body,
    };

    debug!(
        url = %redact_url(&parsed.url),
        method = %parsed.method,
        headers = parsed.headers.len(),
        body_len = parsed.body.as_ref().map(String::len),
        "parsed curl command"
    );
    parsed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::headers;
    use rstest::*;

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case("wget 'https://example.com' -H 'A: b'")]
    #[case("hello world")]
    #[case("libcurl -X PUT -d x=1 -b 'a=1'")]
    fn test_missing_curl_gives_default(#[case] input: &str) {
        let parsed = parse_curl_command(input);
        assert_eq!(parsed, ParsedCurlCommand::default());
        assert_eq!(parsed.method, "GET");
    }

    #[test]
    fn test_last_header_wins() {
        let parsed = parse_curl_command(
            "curl 'https://api.example.com/x' -H 'Authorization: Bearer t1' -H 'Authorization: Bearer t2'",
        );
        assert_eq!(parsed.url, "https://api.example.com/x");
        assert_eq!(parsed.headers, headers(&[("Authorization", "Bearer t2")]));
    }

    #[test]
    fn test_cookie_flag_overwrites_cookie_header() {
        let parsed =
            parse_curl_command("curl 'https://x.com' -H 'Cookie: old=1' -b 'session=abc; theme=dark'");
        assert_eq!(parsed.headers, headers(&[("Cookie", "session=abc; theme=dark")]));
    }

    #[rstest]
    #[case("curl 'https://x.com' -b ''", &[])]
    #[case("curl 'https://x.com' -H 'Cookie: a=1' -b ''", &[("Cookie", "a=1")])]
    #[case("curl 'https://x.com' -b \"\" -H 'Accept: */*'", &[("Accept", "*/*")])]
    fn test_empty_cookie_flag_is_ignored(#[case] input: &str, #[case] expect: &[(&str, &str)]) {
        let parsed = parse_curl_command(input);
        assert_eq!(parsed.headers, headers(expect));
        assert!(parsed.headers.values().all(|value| !value.is_empty()));
    }

    #[test]
    fn test_header_lookup_ignores_case() {
        let parsed = parse_curl_command("curl 'https://x.com' -H 'content-type: text/plain'");
        assert_eq!(parsed.header("Content-Type"), Some("text/plain"));
        assert_eq!(parsed.header("Accept"), None);
        assert!(!parsed.has_body());
    }

    #[test]
    fn test_empty_data_gives_no_body() {
        let parsed = parse_curl_command("curl 'https://x.com' --data-raw ''");
        assert_eq!(parsed.body, None);
        assert_eq!(parsed.method, "GET");
    }

    #[test]
    fn test_serialize_omits_missing_body() {
        let parsed = parse_curl_command("curl https://example.com/path");
        let json = serde_json::to_value(&parsed).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "url": "https://example.com/path",
                "method": "GET",
                "headers": {},
            })
        );
    }

    #[test]
    fn test_deserialize_defaults() {
        let parsed: ParsedCurlCommand =
            serde_json::from_str(r#"{"url": "https://x.com", "method": "PUT"}"#).unwrap();
        assert_eq!(parsed.method, "PUT");
        assert!(parsed.headers.is_empty());
        assert_eq!(parsed.body, None);
    }
}
