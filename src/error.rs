use thiserror::Error;

#[derive(Error, Debug)]
pub enum ThreadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Unknown view mode: {0}")]
    UnknownViewMode(String),

    #[error("Agent not found: {0}")]
    AgentNotFound(String),

    #[error("Debate not found: {0}")]
    DebateNotFound(String),

    /// A debate with an empty panel cannot pick a speaker.
    #[error("Debate has no participants: {0}")]
    NoParticipants(String),
}

pub type Result<T> = std::result::Result<T, ThreadError>;
