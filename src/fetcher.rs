use std::future::Future;

use encoding_rs::{Encoding, UTF_8};
use once_cell::sync::Lazy;
use regex::bytes::Regex;
use reqwest::{header::CONTENT_TYPE, Client, StatusCode};
use thiserror::Error;
use tracing::{debug, info};
use url::Url;

use crate::{config::FetchConfig, domain::PageText, text::strip_markup};

/// How far into the body a `<meta>` charset declaration is looked for.
const CHARSET_SNIFF_BYTES: usize = 1024;

static CHARSET_PARAM: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)charset\s*=\s*["']?([A-Za-z0-9_.:-]+)"#).expect("valid charset regex")
});

static META_CHARSET: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)<meta\b[^>]*?charset\s*=\s*["']?([A-Za-z0-9_.:-]+)"#)
        .expect("valid meta charset regex")
});

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("invalid url {url:?}: {reason}")]
    InvalidUrl { url: String, reason: String },
    #[error("request to {url} timed out")]
    Timeout { url: String },
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{url} answered with status {status}")]
    Status { url: String, status: StatusCode },
    #[error("{url} returned non-text content ({content_type})")]
    NotText { url: String, content_type: String },
    #[error("failed to read body from {url}: {source}")]
    Body {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

/// Retrieves one page and returns its human-readable text.
pub trait PageFetcher {
    fn fetch(&self, url: &str) -> impl Future<Output = Result<PageText, FetchError>> + Send;
}

/// Single GET per call, redirects followed, no retries and no caching.
pub struct HttpPageFetcher {
    client: Client,
    config: FetchConfig,
}

impl HttpPageFetcher {
    pub fn new(client: Client, config: FetchConfig) -> Self {
        Self { client, config }
    }

    async fn fetch_page(&self, raw_url: &str) -> Result<PageText, FetchError> {
        let url = parse_url(raw_url)?;
        debug!(target: "fetch", url = %url, "fetching page");

        let response = self
            .client
            .get(url.clone())
            .timeout(self.config.timeout)
            .send()
            .await
            .map_err(|err| transport_error(&url, err))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status,
            });
        }

        let mut header_charset = None;
        if let Some(value) = response.headers().get(CONTENT_TYPE) {
            let content_type = value
                .to_str()
                .map(str::to_ascii_lowercase)
                .unwrap_or_default();
            if !is_textual(&content_type) {
                return Err(FetchError::NotText {
                    url: url.to_string(),
                    content_type,
                });
            }
            header_charset = charset_label(CHARSET_PARAM.captures(content_type.as_bytes()));
        }

        let bytes = response.bytes().await.map_err(|err| {
            if err.is_timeout() {
                FetchError::Timeout {
                    url: url.to_string(),
                }
            } else {
                FetchError::Body {
                    url: url.to_string(),
                    source: err,
                }
            }
        })?;

        let (body, encoding) = decode_body(&bytes, header_charset.as_deref());
        let text = strip_markup(&body);
        info!(
            target: "fetch",
            url = %url,
            encoding = encoding.name(),
            body_bytes = bytes.len(),
            text_chars = text.chars().count(),
            "page fetched"
        );
        Ok(PageText::new(text))
    }
}

impl PageFetcher for HttpPageFetcher {
    fn fetch(&self, url: &str) -> impl Future<Output = Result<PageText, FetchError>> + Send {
        self.fetch_page(url)
    }
}

fn parse_url(raw_url: &str) -> Result<Url, FetchError> {
    let trimmed = raw_url.trim();
    let invalid = |reason: String| FetchError::InvalidUrl {
        url: raw_url.to_string(),
        reason,
    };
    if trimmed.is_empty() {
        return Err(invalid("empty url".to_string()));
    }
    let url = Url::parse(trimmed).map_err(|err| invalid(err.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme {}", url.scheme())));
    }
    Ok(url)
}

fn transport_error(url: &Url, err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        FetchError::Timeout {
            url: url.to_string(),
        }
    } else {
        FetchError::Transport {
            url: url.to_string(),
            source: err,
        }
    }
}

/// Decodes a page body. The `Content-Type` charset wins, then a byte order
/// mark, then a `<meta charset>` or `http-equiv` declaration near the top of
/// the document, then UTF-8. Undecodable bytes become U+FFFD.
fn decode_body(bytes: &[u8], header_charset: Option<&str>) -> (String, &'static Encoding) {
    let encoding = header_charset
        .and_then(|label| Encoding::for_label(label.as_bytes()))
        .or_else(|| Encoding::for_bom(bytes).map(|(encoding, _)| encoding))
        .or_else(|| sniff_meta_charset(bytes))
        .unwrap_or(UTF_8);
    let (text, used, had_errors) = encoding.decode(bytes);
    if had_errors {
        debug!(target: "fetch", encoding = used.name(), "body had undecodable bytes");
    }
    (text.into_owned(), used)
}

fn sniff_meta_charset(bytes: &[u8]) -> Option<&'static Encoding> {
    let head = &bytes[..bytes.len().min(CHARSET_SNIFF_BYTES)];
    charset_label(META_CHARSET.captures(head))
        .and_then(|label| Encoding::for_label(label.as_bytes()))
}

fn charset_label(captures: Option<regex::bytes::Captures<'_>>) -> Option<String> {
    captures
        .and_then(|caps| caps.get(1))
        .map(|label| String::from_utf8_lossy(label.as_bytes()).into_owned())
}

fn is_textual(content_type: &str) -> bool {
    content_type.starts_with("text/") || content_type.contains("html") || content_type.contains("xml")
}
