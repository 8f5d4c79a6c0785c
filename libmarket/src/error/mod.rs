//! Error types for the marketplace client.
//!
//! Every operation in the pipeline fails fast: errors are never recovered
//! locally and carry enough context to be shown to the operator verbatim.

use thiserror::Error;


/// Main error type for marketplace operations
#[derive(Error, Debug)]
pub enum MarketError {
    /// Invalid user input (unknown architecture, empty base URL, ...)
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    /// Network-related errors (connection, timeout, DNS, body read)
    #[error("Network error: {message}")]
    Network {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The API answered with a non-success HTTP status
    #[error("HTTP {status_code} from {url}: {message}")]
    Status {
        status_code: u16,
        url: String,
        message: String,
    },

    /// Response body is not JSON of the expected shape
    #[error("Decode error: {message}")]
    Decode {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Configuration errors (invalid config file, bad values)
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        path: Option<String>,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

/// Result type alias for marketplace operations
pub type Result<T> = std::result::Result<T, MarketError>;

impl MarketError {
    /// Creates a new invalid argument error.
    ///
    /// # Examples
    ///
    /// ```
    /// use libmarket::error::MarketError;
    ///
    /// let err = MarketError::invalid_argument("unknown architecture 'mips'");
    /// assert!(matches!(err, MarketError::InvalidArgument { .. }));
    /// ```
    pub fn invalid_argument<S: Into<String>>(message: S) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Creates a new network error.
    ///
    /// # Examples
    ///
    /// ```
    /// use libmarket::error::MarketError;
    ///
    /// let err = MarketError::network("connection refused");
    /// assert!(matches!(err, MarketError::Network { .. }));
    /// ```
    pub fn network<S: Into<String>>(message: S) -> Self {
        Self::Network {
            message: message.into(),
            source: None,
        }
    }

    /// Creates a new network error with a source error.
    pub fn network_with_source<S, E>(message: S, source: E) -> Self
    where
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Network {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Creates a new HTTP status error.
    ///
    /// # Examples
    ///
    /// ```
    /// use libmarket::error::MarketError;
    ///
    /// let err = MarketError::status(503, "https://api.example.com/images", "unavailable");
    /// assert!(matches!(err, MarketError::Status { status_code: 503, .. }));
    /// ```
    pub fn status<U, S>(status_code: u16, url: U, message: S) -> Self
    where
        U: Into<String>,
        S: Into<String>,
    {
        Self::Status {
            status_code,
            url: url.into(),
            message: message.into(),
        }
    }

    /// Creates a new decode error.
    pub fn decode<S: Into<String>>(message: S) -> Self {
        Self::Decode {
            message: message.into(),
            source: None,
        }
    }

    /// Creates a new decode error with a source error.
    ///
    /// # Examples
    ///
    /// ```
    /// use libmarket::error::MarketError;
    ///
    /// let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
    /// let err = MarketError::decode_with_source("invalid page body", json_err);
    /// assert!(matches!(err, MarketError::Decode { .. }));
    /// ```
    pub fn decode_with_source<S, E>(message: S, source: E) -> Self
    where
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Decode {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Creates a new configuration error.
    pub fn config<S: Into<String>>(message: S, path: Option<S>) -> Self {
        Self::Config {
            message: message.into(),
            path: path.map(|p| p.into()),
            source: None,
        }
    }

    /// Creates a new configuration error with a source error.
    pub fn config_with_source<S, E>(message: S, path: Option<S>, source: E) -> Self
    where
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Config {
            message: message.into(),
            path: path.map(|p| p.into()),
            source: Some(Box::new(source)),
        }
    }
}
