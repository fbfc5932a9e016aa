//! Application error type.
//!
//! Every fallible operation in the crate returns `Result<_, AppError>`. The
//! error carries a [`ErrorKind`] so callers (and tests) can tell a singular
//! normal-equation system apart from, say, a malformed dataset record, plus the
//! process exit code the `creg` binary should use when the error reaches `main`.

/// Failure categories surfaced by the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A record is missing a required field or carries a non-finite number.
    MalformedInput,
    /// `XᵀX` is singular or too ill-conditioned to solve.
    SingularMatrix,
    /// Gradient descent hit its iteration cap or diverged.
    NonConvergence,
    /// Matrix/vector shapes disagree.
    DimensionMismatch,
    /// Invalid hyperparameters or CLI options.
    InvalidConfig,
    /// Filesystem or (de)serialization failure.
    Io,
}

impl ErrorKind {
    pub fn exit_code(self) -> u8 {
        match self {
            ErrorKind::InvalidConfig | ErrorKind::Io => 2,
            ErrorKind::MalformedInput | ErrorKind::DimensionMismatch => 3,
            ErrorKind::SingularMatrix | ErrorKind::NonConvergence => 4,
        }
    }
}

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    kind: ErrorKind,
    message: String,
}

impl AppError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            exit_code: kind.exit_code(),
            kind,
            message: message.into(),
        }
    }

    pub fn malformed_input(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::MalformedInput, message)
    }

    pub fn singular_matrix(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::SingularMatrix, message)
    }

    pub fn non_convergence(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NonConvergence, message)
    }

    pub fn dimension_mismatch(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::DimensionMismatch, message)
    }

    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidConfig, message)
    }

    pub fn io(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Io, message)
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("kind", &self.kind)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_follow_kind() {
        assert_eq!(AppError::invalid_config("x").exit_code(), 2);
        assert_eq!(AppError::malformed_input("x").exit_code(), 3);
        assert_eq!(AppError::singular_matrix("x").exit_code(), 4);
        assert_eq!(AppError::non_convergence("x").kind(), ErrorKind::NonConvergence);
    }

    #[test]
    fn display_is_the_message() {
        let err = AppError::dimension_mismatch("X has 3 rows, Y has 2");
        assert_eq!(err.to_string(), "X has 3 rows, Y has 2");
    }
}
