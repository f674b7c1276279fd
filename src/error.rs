use thiserror::Error;

/// Reasons a parsed curl command cannot be turned into a request.
#[derive(Debug, Error)]
pub enum CurlError {
    #[error("no target url found in the curl command")]
    MissingUrl,

    #[error("invalid url {url:?}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
}

pub type Result<T> = std::result::Result<T, CurlError>;
