use thiserror::Error;

/// Failure raised by the HTTP collaborator.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP {status} while fetching {url}")]
    Status { url: String, status: u16 },

    #[error("network error while fetching {url}: {reason}")]
    Network { url: String, reason: String },

    #[error("response from {url} exceeds {limit} bytes")]
    TooLarge { url: String, limit: u64 },
}

#[derive(Debug, Error)]
pub enum EssenceError {
    /// Passed through from the HTTP collaborator untouched.
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// The provider reached the source but found nothing embeddable.
    #[error("{provider} could not extract {url}: {reason}")]
    Extraction {
        provider: String,
        url: String,
        reason: String,
    },

    #[error("no provider matches {url}")]
    NoProvider { url: String },

    /// A tag name in a selector spec could not be compiled.
    #[error("invalid selector {selector}: {reason}")]
    InvalidSelector { selector: String, reason: String },

    #[error("invalid URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },
}

impl EssenceError {
    pub fn extraction(
        provider: impl Into<String>,
        url: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        EssenceError::Extraction {
            provider: provider.into(),
            url: url.into(),
            reason: reason.into(),
        }
    }
}

pub type Result<T, E = EssenceError> = std::result::Result<T, E>;
