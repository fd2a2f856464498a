use thiserror::Error;

/// Failure of a single provider adapter.
///
/// These are logged by the fallback loop and swallowed; callers of the lookup
/// service only ever see a [`LookupError`].
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("no API key configured for provider '{provider}'")]
    MissingCredential { provider: &'static str },

    #[error("{provider} request failed with status {status}: {body}")]
    UpstreamStatus {
        provider: &'static str,
        status: u16,
        body: String,
    },

    #[error("{provider} request timed out")]
    Timeout { provider: &'static str },

    #[error("{provider} request failed: {message}")]
    Transport {
        provider: &'static str,
        message: String,
    },

    #[error("failed to parse {provider} response: {message}")]
    MalformedPayload {
        provider: &'static str,
        message: String,
    },
}

impl ProviderError {
    pub fn from_reqwest(provider: &'static str, err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout { provider }
        } else {
            Self::Transport {
                provider,
                message: err.to_string(),
            }
        }
    }
}

/// Errors surfaced by [`crate::LookupService::get_weather`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    #[error("city must not be empty")]
    InvalidInput,

    #[error("weather is currently unavailable from every provider")]
    AllProvidersUnavailable,

    #[error("internal error: {0}")]
    Unexpected(String),
}
