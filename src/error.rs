use thiserror::Error;

use crate::api::ApiError;
use crate::state_machine::FailureSource;
use crate::wizard::ValidationError;

#[derive(Debug, Error)]
pub enum MantraError {
    #[error("Config error: {0}")]
    Config(String),

    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("Generation limit reached. Please upgrade your plan. ({used}/{limit} used)")]
    QuotaExceeded { used: u32, limit: u32 },

    #[error("unknown voice '{0}'")]
    UnknownVoice(String),

    #[error("voice '{voice}' is not available in the {style} style")]
    VoiceUnavailable { voice: String, style: String },

    #[error("API error: {0}")]
    Api(#[from] ApiError),

    #[error("{0}")]
    Generation(#[from] FailureSource),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}
