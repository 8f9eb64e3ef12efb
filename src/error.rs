use thiserror::Error;

/// Why a single GET did not produce a usable body.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(transparent)]
    Load(#[from] ::config::ConfigError),

    #[error("start year {start} is after end year {end}")]
    YearRange { start: u16, end: u16 },

    #[error("jobs must be at least 1")]
    NoJobs,

    #[error("base_url {0:?} is not an absolute URL")]
    BaseUrl(String),
}
