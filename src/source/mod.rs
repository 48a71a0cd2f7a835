//! Image listing resolution.
//!
//! The remote contents API is tried first. Any failure there (network error,
//! non-success status, malformed body) is logged and replaced by the local
//! directory index next to the hosting page. Only when both fail does the
//! caller see an error.
//!
//! Network access goes through [`ListingTransport`] so the resolver runs the
//! same against the browser's `fetch` and against in-memory test doubles.

mod error;
mod listing;

use std::future::Future;

use web_time::Instant;

use crate::config::SourceConfig;

pub use error::SourceError;
pub use listing::{ContentEntry, fallback_image_urls, parse_contents, remote_image_urls};

/// Status and body of a finished GET request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// 2xx statuses.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Network and document access needed to list images.
pub trait ListingTransport {
    /// Issue a GET request and collect the body as text.
    fn get(&self, url: &str) -> impl Future<Output = Result<HttpResponse, SourceError>>;

    /// Extract the `href` attribute of every `<a>` in an HTML document, in
    /// document order.
    fn anchor_hrefs(&self, html: &str) -> Result<Vec<String>, SourceError>;
}

/// Resolve the image URLs to display.
///
/// Single attempt, no retries. The remote failure is never surfaced; the
/// returned error is the fallback's.
pub async fn resolve_image_urls<T: ListingTransport>(
    source: &SourceConfig,
    transport: &T,
) -> Result<Vec<String>, SourceError> {
    let started = Instant::now();

    let urls = match fetch_remote(source, transport).await {
        Ok(urls) => urls,
        Err(e) => {
            log::warn!(
                "Remote listing unavailable ({}), falling back to {}",
                e,
                source.fallback_url()
            );
            fetch_fallback(source, transport).await?
        }
    };

    log::info!(
        "Resolved {} image URLs in {:.0?}",
        urls.len(),
        started.elapsed()
    );
    Ok(urls)
}

async fn fetch_remote<T: ListingTransport>(
    source: &SourceConfig,
    transport: &T,
) -> Result<Vec<String>, SourceError> {
    let url = source.api_url();
    log::debug!("Requesting remote listing {}", url);

    let response = checked_get(transport, &url).await?;
    let entries = parse_contents(&response.body)?;
    Ok(remote_image_urls(source, &entries))
}

async fn fetch_fallback<T: ListingTransport>(
    source: &SourceConfig,
    transport: &T,
) -> Result<Vec<String>, SourceError> {
    let url = source.fallback_url();
    log::debug!("Requesting directory index {}", url);

    let response = checked_get(transport, &url).await?;
    let hrefs = transport.anchor_hrefs(&response.body)?;
    Ok(fallback_image_urls(source, &hrefs))
}

async fn checked_get<T: ListingTransport>(
    transport: &T,
    url: &str,
) -> Result<HttpResponse, SourceError> {
    let response = transport.get(url).await?;
    if !response.is_success() {
        return Err(SourceError::Status {
            url: url.to_string(),
            status: response.status,
        });
    }
    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::HashMap;

    /// In-memory transport. Unknown URLs fail like an unreachable host, and
    /// the "HTML" is just one href per line.
    #[derive(Default)]
    struct MockTransport {
        responses: HashMap<String, HttpResponse>,
        requests: RefCell<Vec<String>>,
    }

    impl MockTransport {
        fn with(mut self, url: &str, response: HttpResponse) -> Self {
            self.responses.insert(url.to_string(), response);
            self
        }

        fn request_count(&self, url: &str) -> usize {
            self.requests.borrow().iter().filter(|u| *u == url).count()
        }
    }

    impl ListingTransport for MockTransport {
        async fn get(&self, url: &str) -> Result<HttpResponse, SourceError> {
            self.requests.borrow_mut().push(url.to_string());
            self.responses
                .get(url)
                .cloned()
                .ok_or_else(|| SourceError::transport(url, "unreachable"))
        }

        fn anchor_hrefs(&self, html: &str) -> Result<Vec<String>, SourceError> {
            if html.starts_with("<!broken") {
                return Err(SourceError::Html("broken document".to_string()));
            }
            Ok(html.lines().map(str::to_string).collect())
        }
    }

    fn init_logging() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    const API: &str = "https://api.github.com/repos/bjornelvar/pics/contents/images";
    const INDEX: &str = "./images/";

    #[test]
    fn test_remote_listing_is_preferred() {
        init_logging();
        const LISTING: &str =
            r#"[{ "type": "file", "name": "a.jpg", "download_url": "https://raw.test/a.jpg" }]"#;
        let transport = MockTransport::default().with(API, HttpResponse::new(200, LISTING));

        let urls = pollster::block_on(resolve_image_urls(&SourceConfig::default(), &transport))
            .expect("remote listing succeeds");

        assert_eq!(urls, vec!["https://raw.test/a.jpg"]);
        assert_eq!(transport.request_count(INDEX), 0);
    }

    #[test]
    fn test_not_found_falls_back_once() {
        init_logging();
        let transport = MockTransport::default()
            .with(API, HttpResponse::new(404, r#"{ "message": "Not Found" }"#))
            .with(INDEX, HttpResponse::new(200, "../\nb.png\nreadme.txt"));

        let urls = pollster::block_on(resolve_image_urls(&SourceConfig::default(), &transport))
            .expect("fallback succeeds");

        assert_eq!(urls, vec!["./images/b.png"]);
        assert_eq!(transport.request_count(API), 1);
        assert_eq!(transport.request_count(INDEX), 1);
    }

    #[test]
    fn test_malformed_remote_body_falls_back() {
        init_logging();
        let transport = MockTransport::default()
            .with(API, HttpResponse::new(200, "<html>rate limited</html>"))
            .with(INDEX, HttpResponse::new(200, "c.gif"));

        let urls = pollster::block_on(resolve_image_urls(&SourceConfig::default(), &transport))
            .expect("fallback succeeds");

        assert_eq!(urls, vec!["./images/c.gif"]);
    }

    #[test]
    fn test_unreachable_remote_falls_back() {
        init_logging();
        let transport = MockTransport::default().with(INDEX, HttpResponse::new(200, "d.jpeg"));

        let urls = pollster::block_on(resolve_image_urls(&SourceConfig::default(), &transport))
            .expect("fallback succeeds");

        assert_eq!(urls, vec!["./images/d.jpeg"]);
    }

    #[test]
    fn test_both_paths_fail() {
        init_logging();
        let transport = MockTransport::default()
            .with(API, HttpResponse::new(500, ""))
            .with(INDEX, HttpResponse::new(403, "forbidden"));

        let result = pollster::block_on(resolve_image_urls(&SourceConfig::default(), &transport));

        match result {
            Err(SourceError::Status { url, status }) => {
                assert_eq!(url, INDEX);
                assert_eq!(status, 403);
            }
            other => panic!("expected fallback status error, got {:?}", other),
        }
    }

    #[test]
    fn test_unparseable_index_is_an_error() {
        init_logging();
        let transport = MockTransport::default().with(INDEX, HttpResponse::new(200, "<!broken"));

        let result = pollster::block_on(resolve_image_urls(&SourceConfig::default(), &transport));
        assert!(matches!(result, Err(SourceError::Html(_))));
    }

    #[test]
    fn test_is_success() {
        assert!(HttpResponse::new(200, "").is_success());
        assert!(HttpResponse::new(204, "").is_success());
        assert!(!HttpResponse::new(304, "").is_success());
        assert!(!HttpResponse::new(404, "").is_success());
    }
}
