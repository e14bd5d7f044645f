use thiserror::Error;

/// Why a single event could not be scored.
///
/// Every variant is local and recoverable: nothing was applied, the caller
/// still holds the state it had before the call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScoringError {
    #[error("malformed result \"{raw}\" for {competitor}")]
    MalformedResult { competitor: String, raw: String },

    #[error("unrecognised event type \"{0}\" (expected \"high\" or \"low\")")]
    InvalidEventType(String),

    #[error("competitor {0} has more than one entry")]
    DuplicateEntry(String),

    #[error("{entries} entries submitted for a field of {competitors} competitors")]
    TooManyEntries { entries: usize, competitors: usize },
}

/// Why an operation on a [`Competition`](crate::session::Competition) was rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error(transparent)]
    Scoring(#[from] ScoringError),

    #[error("event {sequence} no longer scores after the edit: {source}")]
    Rescore {
        sequence: u32,
        #[source]
        source: ScoringError,
    },

    #[error("competitor {0} is entered twice")]
    DuplicateCompetitor(String),

    #[error("competitor names must not be empty")]
    EmptyName,

    #[error("unknown competitor: {0}")]
    UnknownCompetitor(String),

    #[error("unknown event: {0}")]
    UnknownEvent(u32),

    #[error("no results entered")]
    NoResults,
}
