use thiserror::Error;

/// Errors reported by the parse entry point.
///
/// Every failure is returned as a value; the library never panics on
/// malformed registry text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WhoisParseError {
    /// The text matched none of the domain/IP/AS extraction heuristics.
    #[error("unrecognized whois response")]
    Unrecognized,

    /// The registry positively answered that the queried object does not
    /// exist ("No match", "Not found", ...).
    #[error("domain is not found")]
    DomainNotFound,

    /// An AS record without an AS number is unusable.
    #[error("AS number is missing")]
    AsNumberMissing,

    /// An AS record without a handle is unusable.
    #[error("AS handle is missing")]
    AsHandleMissing,
}

pub type Result<T> = std::result::Result<T, WhoisParseError>;
