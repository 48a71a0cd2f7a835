//! Browser implementation of the listing transport.
//!
//! Requests go through `window.fetch`, and directory indexes are parsed with
//! the browser's own `DOMParser` instead of scanning markup by hand.

use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{DomParser, Element, Response, SupportedType, Window};

use crate::source::{HttpResponse, ListingTransport, SourceError};
use crate::wasm_dom::DomError;

/// `fetch` + `DOMParser` transport bound to the page's window.
pub struct BrowserTransport {
    window: Window,
}

impl BrowserTransport {
    pub fn new() -> Result<Self, DomError> {
        let window = web_sys::window().ok_or(DomError::NoDocument)?;
        Ok(Self { window })
    }
}

impl ListingTransport for BrowserTransport {
    async fn get(&self, url: &str) -> Result<HttpResponse, SourceError> {
        let response: Response = JsFuture::from(self.window.fetch_with_str(url))
            .await
            .map_err(|e| SourceError::transport(url, e))?
            .dyn_into()
            .map_err(|e| SourceError::transport(url, e))?;

        let status = response.status();
        let text = response.text().map_err(|e| SourceError::transport(url, e))?;
        let body = JsFuture::from(text)
            .await
            .map_err(|e| SourceError::transport(url, e))?
            .as_string()
            .unwrap_or_default();

        log::debug!("GET {} -> {} ({} bytes)", url, status, body.len());
        Ok(HttpResponse::new(status, body))
    }

    fn anchor_hrefs(&self, html: &str) -> Result<Vec<String>, SourceError> {
        let html_error = |e: wasm_bindgen::JsValue| SourceError::Html(format!("{:?}", e));

        let parser = DomParser::new().map_err(html_error)?;
        let document = parser
            .parse_from_string(html, SupportedType::TextHtml)
            .map_err(html_error)?;
        let anchors = document.query_selector_all("a[href]").map_err(html_error)?;

        let hrefs = (0..anchors.length())
            .filter_map(|i| anchors.item(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .filter_map(|anchor| anchor.get_attribute("href"))
            .collect::<Vec<_>>();

        log::debug!("Directory index has {} links", hrefs.len());
        Ok(hrefs)
    }
}
