use thiserror::Error;

use hero_widgets::ConfigError;

pub type Result<T> = std::result::Result<T, DemoError>;

#[derive(Debug, Error)]
pub enum DemoError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("logging setup failed: {0}")]
    Logging(#[from] tracing_subscriber::util::TryInitError),

    #[error("invalid argument: {message}")]
    InvalidArgument { message: String },

    #[error("{message}")]
    Exit { code: i32, message: String },
}

impl DemoError {
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Exit { code, .. } => *code,
            Self::InvalidArgument { .. } => 2,
            Self::Config(_) => 3,
            _ => 1,
        }
    }

    #[must_use]
    pub fn exit(code: i32, message: impl Into<String>) -> Self {
        Self::Exit {
            code,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::DemoError;
    use hero_widgets::ConfigError;

    #[test]
    fn exit_constructor_preserves_code_and_message() {
        let error = DemoError::exit(4, "stalled");
        assert_eq!(error.exit_code(), 4);
        assert_eq!(error.to_string(), "stalled");
    }

    #[test]
    fn config_errors_map_to_their_own_code() {
        let error = DemoError::from(ConfigError::Invalid {
            field: "timing.bounce",
            reason: "too bouncy".into(),
        });
        assert_eq!(error.exit_code(), 3);
        assert!(error.to_string().contains("timing.bounce"));
        assert_eq!(DemoError::invalid("fps").exit_code(), 2);
    }
}
