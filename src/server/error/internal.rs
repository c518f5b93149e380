use thiserror::Error;

/// Internal issues with the codebase indicating unexpected behavior & possible bugs
#[derive(Error, Debug)]
pub enum InternalError {
    /// A JSON column holds a value of an unexpected shape.
    ///
    /// Results in a 500 Internal Server Error with a generic message returned
    /// to client.
    #[error("Malformed JSON in column '{column}': {source}")]
    MalformedJsonColumn {
        /// Column that failed to decode
        column: &'static str,
        /// The underlying decode error
        #[source]
        source: serde_json::Error,
    },

    /// A stored enum column holds a value outside its choices.
    #[error("Unknown value '{value}' stored in column '{column}'")]
    UnknownChoice {
        /// Column that holds the value
        column: &'static str,
        /// The stored value
        value: String,
    },

    /// Password hashing or hash parsing failed.
    #[error("Password hash failure: {0}")]
    PasswordHash(String),
}
