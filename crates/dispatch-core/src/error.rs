use std::fmt;
use std::path::PathBuf;

/// Machine-readable error codes for scripting-friendly decision making.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    InvalidIncident,
    DuplicateTicket,
    RecordNotFound,
    CorruptStore,
    PersistenceFailed,
}

impl ErrorCode {
    /// Stable code identifier (`E####`) for machine parsing.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::InvalidIncident => "E1001",
            Self::DuplicateTicket => "E1002",
            Self::RecordNotFound => "E2001",
            Self::CorruptStore => "E3001",
            Self::PersistenceFailed => "E3002",
        }
    }

    /// Short human-facing summary for logs and terminal output.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::InvalidIncident => "Invalid incident text",
            Self::DuplicateTicket => "Ticket already logged today",
            Self::RecordNotFound => "Record not found",
            Self::CorruptStore => "Backing document unreadable",
            Self::PersistenceFailed => "Backing document write failed",
        }
    }

    /// Optional remediation hint that can be surfaced to operators.
    #[must_use]
    pub const fn hint(self) -> Option<&'static str> {
        match self {
            Self::InvalidIncident => {
                Some("Incident text must be non-empty and contain 'INC'.")
            }
            Self::DuplicateTicket => None,
            Self::RecordNotFound => Some("Run `dsp list` to see current record ids."),
            Self::CorruptStore => {
                Some("Inspect or restore the month's JSON document before retrying.")
            }
            Self::PersistenceFailed => Some("Check disk space and write permissions."),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Errors raised at the store boundary.
///
/// Every failed operation leaves the in-memory collection and the backing
/// document consistent with each other.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Incident text missing or lacking the "INC" substring.
    #[error("incident text '{0}' must be non-empty and contain 'INC'")]
    InvalidIncident(String),

    /// The same incident text was already logged on the same calendar day.
    #[error("incident '{0}' was already logged today")]
    DuplicateTicket(String),

    /// Delete targeted an id that is not in the collection.
    #[error("no record with id {0}")]
    RecordNotFound(u64),

    /// The backing document could not be read or parsed.
    #[error("backing document {} is corrupt: {reason}", path.display())]
    CorruptStore { path: PathBuf, reason: String },

    /// Writing the backing document failed; the mutation was rolled back.
    #[error("failed to persist backing document {}: {reason}", path.display())]
    Persistence { path: PathBuf, reason: String },
}

impl StoreError {
    /// Machine-readable code associated with this error.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::InvalidIncident(_) => ErrorCode::InvalidIncident,
            Self::DuplicateTicket(_) => ErrorCode::DuplicateTicket,
            Self::RecordNotFound(_) => ErrorCode::RecordNotFound,
            Self::CorruptStore { .. } => ErrorCode::CorruptStore,
            Self::Persistence { .. } => ErrorCode::PersistenceFailed,
        }
    }

    /// Optional remediation hint for operators.
    #[must_use]
    pub const fn hint(&self) -> Option<&'static str> {
        self.code().hint()
    }
}

#[cfg(test)]
mod tests {
    use super::{ErrorCode, StoreError};
    use std::collections::HashSet;
    use std::path::PathBuf;

    #[test]
    fn all_codes_are_unique() {
        let all = [
            ErrorCode::InvalidIncident,
            ErrorCode::DuplicateTicket,
            ErrorCode::RecordNotFound,
            ErrorCode::CorruptStore,
            ErrorCode::PersistenceFailed,
        ];

        let mut seen = HashSet::new();
        for code in all {
            assert!(seen.insert(code.code()), "duplicate code {}", code.code());
        }
    }

    #[test]
    fn code_format_is_machine_friendly() {
        let code = ErrorCode::DuplicateTicket.code();
        assert_eq!(code.len(), 5);
        assert!(code.starts_with('E'));
        assert!(code.chars().skip(1).all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn errors_carry_the_offending_detail() {
        let err = StoreError::RecordNotFound(42);
        assert_eq!(err.to_string(), "no record with id 42");
        assert_eq!(err.code(), ErrorCode::RecordNotFound);

        let err = StoreError::Persistence {
            path: PathBuf::from("/tmp/dispatch_2024-05.json"),
            reason: "disk full".into(),
        };
        assert!(err.to_string().contains("dispatch_2024-05.json"));
        assert!(err.to_string().contains("disk full"));
    }
}
