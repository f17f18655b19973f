use spirebot_core::SimError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("search root is already terminal")]
    TerminalRoot,
    #[error("no legal action at the search root")]
    NoLegalAction,
    #[error("simulation error: {0}")]
    Sim(#[from] SimError),
    #[error("io error: {0}")]
    Io(String),
    #[error("serialize error: {0}")]
    Serialize(String),
}

impl From<std::io::Error> for SearchError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value.to_string())
    }
}

impl From<serde_json::Error> for SearchError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialize(value.to_string())
    }
}
