use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("Generation failed. Please enter a topic.")]
    EmptyTopic,

    #[error("Generation failed. Topic is longer than {max} characters.")]
    TopicTooLong { max: usize },

    #[error("Generation failed (client). {message}")]
    Gateway { status: u16, message: String },

    #[error("Generation failed (client). {0}")]
    Transport(String),

    #[error("Generation failed (client). Invalid response: {0}")]
    InvalidResponse(String),
}

impl GenerationError {
    /// HTTP status reported by the gateway, when the failure came from one.
    pub fn status(&self) -> Option<u16> {
        match self {
            GenerationError::Gateway { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for GenerationError {
    fn from(error: reqwest::Error) -> Self {
        GenerationError::Transport(error.to_string())
    }
}
