// crates/worldmap-core/src/error.rs
use thiserror::Error;

/// Errors produced by the world map core.
///
/// The first five variants are the user-facing taxonomy: every one of them is
/// caught by the component that issued the request and turned into an inline
/// status message. The remaining variants are plumbing failures (parsing,
/// I/O, configuration) that callers usually wrap into one of the former.
#[derive(Debug, Error)]
pub enum MapError {
    /// Fetch rejected or answered with a non-success status.
    #[error("network error: {0}")]
    Network(String),

    /// The client-side timer fired before the response arrived.
    #[error("request timed out after {0} ms")]
    Timeout(u64),

    /// The request was deliberately cancelled. Never shown to the user.
    #[error("request aborted")]
    Aborted,

    /// A named region has no match in the loaded data.
    #[error("not found: {0}")]
    NotFound(String),

    /// A required page anchor is absent at initialization.
    #[error("missing element: #{0}")]
    MissingElement(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("configuration error: {0}")]
    Config(String),
}

impl MapError {
    /// `true` for errors that must be swallowed without any visible message.
    pub fn is_silent(&self) -> bool {
        matches!(self, MapError::Aborted)
    }
}

#[cfg(feature = "http")]
/// Transport failures are all [`MapError::Network`]. Callers that know
/// their timeout budget map `is_timeout()` to [`MapError::Timeout`] first.
impl From<reqwest::Error> for MapError {
    fn from(e: reqwest::Error) -> Self {
        MapError::Network(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, MapError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(feature = "http")]
    #[test]
    fn transport_errors_are_network_errors() {
        // Rejected while building the request; nothing goes on the wire.
        let Err(e) = reqwest::blocking::get("not a url") else {
            panic!("expected a builder error");
        };
        assert!(matches!(MapError::from(e), MapError::Network(_)));
    }

    #[test]
    fn only_aborts_are_silent() {
        assert!(MapError::Aborted.is_silent());
        assert!(!MapError::Timeout(3000).is_silent());
        assert!(!MapError::Network("503".into()).is_silent());
        assert!(!MapError::NotFound("Atlantis".into()).is_silent());
    }

    #[test]
    fn messages_name_the_subject() {
        assert_eq!(
            MapError::MissingElement("map".into()).to_string(),
            "missing element: #map"
        );
        assert_eq!(
            MapError::Timeout(3000).to_string(),
            "request timed out after 3000 ms"
        );
    }
}
