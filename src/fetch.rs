use reqwest::blocking::Client;
use reqwest::StatusCode;
use tracing::debug;

use crate::config::Settings;
use crate::error::FetchError;

/// Single-shot GETs. Anything other than 200 is an error; callers decide
/// whether that matters.
pub trait Fetch: Sync {
    fn text(&self, url: &str) -> Result<String, FetchError>;
    fn bytes(&self, url: &str) -> Result<Vec<u8>, FetchError>;
}

/// Blocking reqwest client with the configured timeout and User-Agent.
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(settings: &Settings) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(settings.timeout())
            .user_agent(settings.user_agent.clone())
            .build()?;
        Ok(Self { client })
    }

    fn get(&self, url: &str) -> Result<reqwest::blocking::Response, FetchError> {
        let resp = self.client.get(url).send().map_err(|source| FetchError::Request {
            url: url.to_string(),
            source,
        })?;
        let status = resp.status();
        debug!(%url, %status, "GET");
        if status != StatusCode::OK {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        Ok(resp)
    }
}

impl Fetch for HttpFetcher {
    fn text(&self, url: &str) -> Result<String, FetchError> {
        self.get(url)?.text().map_err(|source| FetchError::Request {
            url: url.to_string(),
            source,
        })
    }

    fn bytes(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        self.get(url)?
            .bytes()
            .map(|b| b.to_vec())
            .map_err(|source| FetchError::Request {
                url: url.to_string(),
                source,
            })
    }
}
