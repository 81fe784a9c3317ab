//! Fetches query results from the Flipside analytics API.

use anyhow::{Context, Result};
use async_trait::async_trait;
use mockall::automock;
use reqwest::{
    header::{self, HeaderMap, HeaderValue},
    StatusCode,
};
use tracing::{debug, warn};

use crate::frame::{Frame, Record};

// Flipside sits behind a bot filter which turns away clients without a browser user agent.
const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_11_5) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/50.0.2661.102 Safari/537.36";

#[automock]
#[async_trait]
pub trait AnalyticsApi {
    /// Rows of a query result. Empty when the API answers with anything but a 200.
    async fn fetch_records(&self, url: &str) -> Result<Vec<Record>>;
}

/// Fetches `url` and builds a frame from its rows.
pub async fn fetch_frame(api: &(dyn AnalyticsApi + Send + Sync), url: &str) -> Result<Frame> {
    let records = api.fetch_records(url).await?;
    let frame = Frame::from_records(&records)
        .with_context(|| format!("failed to build frame from rows of {url}"))?;
    Ok(frame)
}

pub struct FlipsideHttp {
    client: reqwest::Client,
}

impl FlipsideHttp {
    pub fn new() -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(
            header::USER_AGENT,
            HeaderValue::from_static(BROWSER_USER_AGENT),
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .expect("static headers to make a valid client");

        Self { client }
    }
}

impl Default for FlipsideHttp {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AnalyticsApi for FlipsideHttp {
    async fn fetch_records(&self, url: &str) -> Result<Vec<Record>> {
        let res = self
            .client
            .get(url)
            .send()
            .await
            .with_context(|| format!("request to {url} failed"))?;

        if res.status() != StatusCode::OK {
            warn!(url, status = %res.status(), "analytics api did not return 200, using no rows");
            return Ok(vec![]);
        }

        let records = res
            .json::<Vec<Record>>()
            .await
            .with_context(|| format!("failed to decode rows from {url}"))?;

        debug!(url, rows = records.len(), "fetched analytics rows");

        Ok(records)
    }
}
