//! Error types for formation parsing, option validation and selection

/// Errors raised by the team-building pipeline
#[derive(Debug, thiserror::Error)]
pub enum LineupError {
    #[error("Invalid format: Please use a format like X-X-X[-X][-X], where X is between 1 and 5 (got '{0}')")]
    InvalidFormat(String),

    #[error("Invalid numbers: Total players must equal 10 and defenders must be at least 3 (got '{0}')")]
    InvalidQuota(String),

    #[error("Invalid orientation '{0}': expected 1 (forward) or 2 (midfielder)")]
    InvalidOrientation(String),

    #[error("Invalid sort option '{0}': expected 1 (skill), 2 (age) or 3 (random)")]
    InvalidSortOption(String),

    #[error("Invalid age option '{0}': expected 1 (young) or 2 (old)")]
    InvalidAgeOption(String),

    #[error("Player '{player}' has a malformed {field} value: '{value}'")]
    MalformedPlayerRecord {
        player: String,
        field: String,
        value: String,
    },

    #[error("Missing required column: {0}")]
    MissingColumn(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, LineupError>;
