use thiserror::Error;

#[derive(Error, Debug)]
pub enum QuizError {
    #[error("config parse error: {0}")]
    ConfigParse(String),

    #[error("invalid scenario table: {0}")]
    ScenarioTable(String),

    #[error("path does not exist: {0}")]
    PathNotFound(String),

    #[error("unknown action: {0}")]
    UnknownAction(String),

    #[error("invalid decision '{0}': expected ID=ACTION")]
    InvalidDecision(String),

    #[error("invalid transition: {event} while {phase}")]
    InvalidTransition { phase: String, event: String },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("toml parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("directory walk error: {0}")]
    Walk(#[from] walkdir::Error),
}

pub type Result<T> = std::result::Result<T, QuizError>;
