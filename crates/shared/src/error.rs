use thiserror::Error;

/// Which user operation a failure belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Load,
    Update,
    Create,
    Export,
}

/// The single error kind shown to the user. Failures are terminal for one operation only.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct OperationFailed {
    pub operation: Operation,
    pub message: String,
}

impl OperationFailed {
    pub fn new(operation: Operation, message: impl Into<String>) -> Self {
        Self {
            operation,
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}
