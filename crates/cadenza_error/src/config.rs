//! Errors from loading settings and the track library.

/// A setting or file that could not be loaded, with the call site that noticed.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Configuration Error: {} at line {} in {}", message, line, file)]
pub struct ConfigError {
    /// What is wrong with the configuration
    pub message: String,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl ConfigError {
    /// Create a new ConfigError with the given message at the current location.
    ///
    /// # Examples
    ///
    /// ```
    /// use cadenza_error::ConfigError;
    ///
    /// let err = ConfigError::new("Failed to parse track library: expected `[[tracks]]`");
    /// assert!(err.to_string().starts_with("Configuration Error: Failed to parse track library"));
    /// ```
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: location.line(),
            file: location.file(),
        }
    }

    /// A required setting that no layer provided.
    ///
    /// ```
    /// use cadenza_error::ConfigError;
    ///
    /// let err = ConfigError::missing("DISCORD_TOKEN");
    /// assert_eq!(err.message, "DISCORD_TOKEN is not set");
    /// ```
    #[track_caller]
    pub fn missing(key: &str) -> Self {
        Self::new(format!("{} is not set", key))
    }
}
