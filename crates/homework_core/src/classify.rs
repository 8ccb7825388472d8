use std::fmt;

use crate::SchemaError;

/// Transport-level failure classes reported by the status source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportFailure {
    HttpStatus(u16),
    Timeout,
    Network,
    Decode,
}

impl fmt::Display for TransportFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportFailure::HttpStatus(code) => write!(f, "api unavailable, status code {code}"),
            TransportFailure::Timeout => write!(f, "timeout"),
            TransportFailure::Network => write!(f, "network error"),
            TransportFailure::Decode => write!(f, "response decode failure"),
        }
    }
}

/// A failure raised by any stage of the poll pipeline.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PipelineError {
    #[error("missing required configuration: {0}")]
    Config(String),
    #[error("endpoint rejected the api token: {0}")]
    Auth(String),
    #[error("api request failed ({kind}): {message}")]
    Transport {
        kind: TransportFailure,
        message: String,
    },
    #[error(transparent)]
    Schema(#[from] SchemaError),
    #[error("undocumented homework status `{0}`")]
    UnknownStatus(String),
    #[error("bot failed to send the message: {0}")]
    Delivery(String),
    #[error("{0}")]
    Unexpected(String),
}

impl PipelineError {
    pub fn transport(kind: TransportFailure, message: impl Into<String>) -> Self {
        Self::Transport {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Config,
    Auth,
    Transport,
    Schema,
    UnknownStatus,
    Delivery,
    Unexpected,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ErrorKind::Config => "config",
            ErrorKind::Auth => "auth",
            ErrorKind::Transport => "transport",
            ErrorKind::Schema => "schema",
            ErrorKind::UnknownStatus => "unknown status",
            ErrorKind::Delivery => "delivery",
            ErrorKind::Unexpected => "unexpected",
        };
        f.write_str(label)
    }
}

/// What the poll loop does with a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// Stop the process.
    Fatal,
    /// Log only.
    Suppressible,
    /// Log and relay to the operator through the messaging channel.
    Notifiable,
}

/// Log level a classified failure is reported at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Debug,
    Error,
    Critical,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind} failure: {message}")]
pub struct ClassifiedError {
    pub kind: ErrorKind,
    pub disposition: Disposition,
    pub message: String,
}

impl ClassifiedError {
    pub fn severity(&self) -> Severity {
        match self.kind {
            ErrorKind::Schema | ErrorKind::UnknownStatus => Severity::Debug,
            ErrorKind::Transport | ErrorKind::Delivery => Severity::Error,
            ErrorKind::Config | ErrorKind::Auth | ErrorKind::Unexpected => Severity::Critical,
        }
    }

    pub fn is_fatal(&self) -> bool {
        self.disposition == Disposition::Fatal
    }

    /// Text relayed to the operator for a notifiable failure.
    pub fn operator_message(&self) -> String {
        format!("Bot failure: {}", self.message)
    }
}

/// Maps a pipeline failure to its kind and disposition.
pub fn classify(error: &PipelineError) -> ClassifiedError {
    let (kind, disposition) = match error {
        PipelineError::Config(_) => (ErrorKind::Config, Disposition::Fatal),
        PipelineError::Auth(_) => (ErrorKind::Auth, Disposition::Fatal),
        PipelineError::Transport { .. } => (ErrorKind::Transport, Disposition::Suppressible),
        PipelineError::Schema(_) => (ErrorKind::Schema, Disposition::Suppressible),
        PipelineError::UnknownStatus(_) => (ErrorKind::UnknownStatus, Disposition::Suppressible),
        PipelineError::Delivery(_) => (ErrorKind::Delivery, Disposition::Suppressible),
        PipelineError::Unexpected(_) => (ErrorKind::Unexpected, Disposition::Notifiable),
    };
    ClassifiedError {
        kind,
        disposition,
        message: error.to_string(),
    }
}
