use std::fmt;

use cube_core::CatalogueError;

#[derive(Debug)]
pub enum SessionError {
    Io(std::io::Error),
    Config(toml::de::Error),
    InvalidConfig(String),
    Catalogue(CatalogueError),
    /// The session loop has already exited.
    Closed,
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::Io(e) => write!(f, "I/O error: {e}"),
            SessionError::Config(e) => write!(f, "config error: {e}"),
            SessionError::InvalidConfig(msg) => write!(f, "invalid config: {msg}"),
            SessionError::Catalogue(e) => write!(f, "catalogue error: {e}"),
            SessionError::Closed => write!(f, "session closed"),
        }
    }
}

impl std::error::Error for SessionError {}

impl From<std::io::Error> for SessionError {
    fn from(e: std::io::Error) -> Self {
        SessionError::Io(e)
    }
}

impl From<toml::de::Error> for SessionError {
    fn from(e: toml::de::Error) -> Self {
        SessionError::Config(e)
    }
}

impl From<CatalogueError> for SessionError {
    fn from(e: CatalogueError) -> Self {
        SessionError::Catalogue(e)
    }
}

pub type Result<T> = std::result::Result<T, SessionError>;
