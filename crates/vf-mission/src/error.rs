use thiserror::Error;

#[derive(Debug, Error)]
pub enum MissionError {
    #[error("invalid mission parameter `{param}`: {reason}")]
    Invalid {
        param:  &'static str,
        reason: String,
    },

    #[error("unknown mission parameter `{0}`")]
    UnknownParameter(String),

    #[error("mission configuration parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("deployment plan parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type MissionResult<T> = Result<T, MissionError>;
