//! SnapRoute REST API Client
//!
//! Plain unauthenticated HTTP GETs against the FlexSwitch `/public/v1/`
//! surface. Every state document is requested by concatenating the configured
//! URL prefix with a fixed path suffix (`state/platform`, `state/Ports`, ...).
//!
//! # Transport
//!
//! [`Transport`] is the single seam to the network: one GET, one fully
//! buffered body. The status code is not inspected; a non-2xx reply simply
//! hands its body to the decoder, which reports the malformed content.
//! No retries happen here.
//!
//! # Paging
//!
//! List documents carry `MoreExist`/`NextMarker`. [`SnapRouteClient::query_list`]
//! keeps requesting `?CurrentMarker=<NextMarker>` while the device reports more
//! objects, bounded by `max_pages`. A follow-up page whose `CurrentMarker` is
//! not the marker asked for is dropped and paging stops there.

use crate::error::{ExporterError, Result, TransportError};
use crate::snaproute::types::{decode, Entry, Envelope};
use serde::de::DeserializeOwned;
use std::future::Future;
use tracing::{debug, error, warn};

/// Raw response body or the reason none arrived
pub type FetchResult = std::result::Result<Vec<u8>, TransportError>;

/// Issues exactly one GET and returns the raw body
pub trait Transport: Send + Sync {
    fn fetch(&self, url: &str) -> impl Future<Output = FetchResult> + Send;
}

/// `reqwest` backed transport with the client defaults
#[derive(Debug, Clone, Default)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Transport for HttpTransport {
    async fn fetch(&self, url: &str) -> FetchResult {
        let response = self.client.get(url).send().await?;
        debug!("GET {} -> {}", url, response.status());
        let body = response.bytes().await?;
        Ok(body.to_vec())
    }
}

/// Fetch-and-decode front end used by the collectors
pub struct SnapRouteClient<T = HttpTransport> {
    base_url: String,
    max_pages: u32,
    transport: T,
}

impl SnapRouteClient<HttpTransport> {
    pub fn new(base_url: impl Into<String>, max_pages: u32) -> Self {
        Self::with_transport(base_url, max_pages, HttpTransport::new())
    }
}

impl<T: Transport> SnapRouteClient<T> {
    pub fn with_transport(base_url: impl Into<String>, max_pages: u32, transport: T) -> Self {
        Self {
            base_url: base_url.into(),
            max_pages: max_pages.max(1),
            transport,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Request URL for a state path. The prefix is used verbatim.
    pub fn url_for(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get(&self, url: &str) -> Result<Vec<u8>> {
        self.transport.fetch(url).await.map_err(|source| {
            error!("Error talking to SnapRoute at {}: {}", url, source);
            ExporterError::Transport {
                url: url.to_string(),
                source,
            }
        })
    }

    fn decode_body<D: DeserializeOwned>(domain: &'static str, url: &str, body: &[u8]) -> Result<D> {
        decode(domain, body).map_err(|e| {
            error!("Error unmarshalling {} from {}: {}", domain, url, e);
            error!("content: {}", String::from_utf8_lossy(body));
            ExporterError::Decode(e)
        })
    }

    /// Fetch and decode a single document
    pub async fn query<D: DeserializeOwned>(&self, domain: &'static str, path: &str) -> Result<D> {
        let url = self.url_for(path);
        let body = self.get(&url).await?;
        Self::decode_body(domain, &url, &body)
    }

    /// Fetch a list document, following `NextMarker` while `MoreExist` is set
    pub async fn query_list<P>(&self, domain: &'static str, path: &str) -> Result<Vec<Entry<P>>>
    where
        P: DeserializeOwned + Default,
    {
        let first_url = self.url_for(path);
        let mut url = first_url.clone();
        let mut entries = Vec::new();
        let mut pages = 0u32;
        let mut requested: Option<i64> = None;

        loop {
            let body = self.get(&url).await?;
            let page: Envelope<P> = Self::decode_body(domain, &url, &body)?;
            pages += 1;

            if let Some(marker) = requested {
                if page.current_marker != marker {
                    warn!(
                        "{}: asked for marker {} but got page at {}, stopping",
                        domain, marker, page.current_marker
                    );
                    break;
                }
            }

            let more = page.more_exist;
            let current = page.current_marker;
            let next = page.next_marker;
            entries.extend(page.objects);

            if !more {
                break;
            }
            if next <= current {
                warn!(
                    "{}: MoreExist set but NextMarker {} does not advance past {}, stopping",
                    domain, next, current
                );
                break;
            }
            if pages >= self.max_pages {
                warn!(
                    "{}: stopped after {} pages with more objects pending",
                    domain, pages
                );
                break;
            }
            url = format!("{}?CurrentMarker={}", first_url, next);
            requested = Some(next);
            debug!("{}: following NextMarker {}", domain, next);
        }

        Ok(entries)
    }
}

impl<T> std::fmt::Debug for SnapRouteClient<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SnapRouteClient")
            .field("base_url", &self.base_url)
            .field("max_pages", &self.max_pages)
            .finish()
    }
}

