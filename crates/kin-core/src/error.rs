use std::fmt;

/// Machine-readable error codes for scripted callers of the store and CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    NotInitialized,
    ConfigParseError,
    SelfRelation,
    CycleDetected,
    UnknownRelationCode,
    MalformedSnapshot,
    StoreReadFailed,
    StoreWriteFailed,
    LockContention,
    InternalUnexpected,
}

impl ErrorCode {
    /// Stable code identifier (`E####`) for machine parsing.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::NotInitialized => "E1001",
            Self::ConfigParseError => "E1002",
            Self::SelfRelation => "E2001",
            Self::CycleDetected => "E2002",
            Self::UnknownRelationCode => "E2003",
            Self::MalformedSnapshot => "E3001",
            Self::StoreReadFailed => "E5001",
            Self::StoreWriteFailed => "E5002",
            Self::LockContention => "E5003",
            Self::InternalUnexpected => "E9001",
        }
    }

    /// Short human-facing summary for logs and terminal output.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::NotInitialized => "Project not initialized",
            Self::ConfigParseError => "Config file parse error",
            Self::SelfRelation => "Entry cannot be related to itself",
            Self::CycleDetected => "Entry would become its own ancestor",
            Self::UnknownRelationCode => "Unknown relation code",
            Self::MalformedSnapshot => "Stored entries are not valid JSON",
            Self::StoreReadFailed => "Entry store read failed",
            Self::StoreWriteFailed => "Entry store write failed",
            Self::LockContention => "Lock contention",
            Self::InternalUnexpected => "Internal unexpected error",
        }
    }

    /// Optional remediation hint that can be surfaced to users and scripts.
    #[must_use]
    pub const fn hint(self) -> Option<&'static str> {
        match self {
            Self::NotInitialized => Some("Run `kin init` to initialize this directory."),
            Self::ConfigParseError => Some("Fix syntax in .kin/config.toml and retry."),
            Self::SelfRelation => Some("Link two different entries."),
            Self::CycleDetected => Some(
                "Detach one of the existing links, or set `cycles = \"warn\"` under [graph].",
            ),
            Self::UnknownRelationCode => {
                Some("Use one of: d, u, dd, uu, du, ud, ddu, dud, udd, duu, uud, udu.")
            }
            Self::MalformedSnapshot => {
                Some("Restore .kin/entries.json from a backup or re-import with `kin import`.")
            }
            Self::StoreReadFailed | Self::StoreWriteFailed => {
                Some("Check that the data directory exists and is writable.")
            }
            Self::LockContention => Some("Retry after the other `kin` process releases its lock."),
            Self::InternalUnexpected => Some("Retry once. If persistent, report a bug with logs."),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::ErrorCode;
    use std::collections::HashSet;

    const ALL: [ErrorCode; 10] = [
        ErrorCode::NotInitialized,
        ErrorCode::ConfigParseError,
        ErrorCode::SelfRelation,
        ErrorCode::CycleDetected,
        ErrorCode::UnknownRelationCode,
        ErrorCode::MalformedSnapshot,
        ErrorCode::StoreReadFailed,
        ErrorCode::StoreWriteFailed,
        ErrorCode::LockContention,
        ErrorCode::InternalUnexpected,
    ];

    #[test]
    fn all_codes_are_unique() {
        let mut seen = HashSet::new();
        for code in ALL {
            assert!(seen.insert(code.code()), "duplicate code {}", code.code());
        }
    }

    #[test]
    fn code_format_is_machine_friendly() {
        for code in ALL {
            let code = code.code();
            assert_eq!(code.len(), 5);
            assert!(code.starts_with('E'));
            assert!(code.chars().skip(1).all(|c| c.is_ascii_digit()));
        }
    }

    #[test]
    fn display_matches_code() {
        assert_eq!(ErrorCode::CycleDetected.to_string(), "E2002");
    }
}
