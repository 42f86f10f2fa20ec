/// Result type of the library, [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The language table has no entry for the code.
    #[error("Language code unknown : {0}")]
    UnknownLanguageCode(String),

    #[error("invalid language table: {0}")]
    LanguageTable(#[from] serde_json::Error),

    #[error("invalid selector {0}")]
    Selector(String),

    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status} for {url}")]
    Status { url: String, status: u16 },
}
