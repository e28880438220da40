use thiserror::Error;

/// Custom error type for the access module, allow us to differentiate between errors.
///
/// None of these are retried here, the caller decides.
///
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Bad configuration parameter: {0}")]
    BadParam(String),
    #[error("No such site {0}")]
    UnknownSite(String),
    #[error("No route {1} for site {0}")]
    BadRoute(String, String),
    #[error("Can not reach {0}: {1}")]
    Unavailable(String, String),
    #[error("HTTP Error({status}) from {url}")]
    Http { url: String, status: u16 },
    #[error("Malformed data from {0}: {1}")]
    Malformed(String, String),
    #[error("API error from {0}: {1}")]
    Api(String, String),
}
